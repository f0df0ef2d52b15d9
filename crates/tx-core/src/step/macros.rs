//! Macro utilitaria para declarar pipelines sin boilerplate de builder.
//!
//! Exportada en la raíz del crate para poder usarla como:
//!   use tx_core::pipeline;
//!
//! Forma soportada (las cuatro palabras de adapter, en cualquier orden):
//!
//! ```ignore
//! let pipe = pipeline! {
//!     step "validate_order" => |s| validate(s),
//!     map "price_order" => |s| price(s),
//!     try "charge_card" ["gateway_timeout", "card_declined"] => |s| charge(s),
//!     tee "record_audit" => |s| audit(s),
//! }?;
//! ```
//!
//! Expande a la cadena equivalente de `PipelineBuilder` y termina en
//! `build()`, por lo que el resultado es `Result<Pipeline, CoreTxError>` y
//! las invariantes (nombres únicos, `try` con clases declaradas) se validan
//! igual que a mano.

#[macro_export]
macro_rules! pipeline {
    // Fin de la acumulación (con y sin coma final).
    (@acc $builder:expr $(,)?) => { $builder };

    // step (continue)
    (@acc $builder:expr, step $name:literal => $f:expr $(, $($rest:tt)*)?) => {
        $crate::pipeline!(@acc $builder.step($name, $f) $(, $($rest)*)?)
    };
    // map
    (@acc $builder:expr, map $name:literal => $f:expr $(, $($rest:tt)*)?) => {
        $crate::pipeline!(@acc $builder.map_step($name, $f) $(, $($rest)*)?)
    };
    // try con clases declaradas
    (@acc $builder:expr, try $name:literal [ $($kind:expr),+ $(,)? ] => $f:expr $(, $($rest:tt)*)?) => {
        $crate::pipeline!(@acc $builder.try_step($name, [$($kind),+], $f) $(, $($rest)*)?)
    };
    // tee
    (@acc $builder:expr, tee $name:literal => $f:expr $(, $($rest:tt)*)?) => {
        $crate::pipeline!(@acc $builder.tee_step($name, $f) $(, $($rest)*)?)
    };

    // Entrada: arranca el builder y delega en las reglas @acc.
    ( $($body:tt)+ ) => {
        $crate::pipeline!(@acc $crate::pipeline::PipelineBuilder::new(), $($body)+).build()
    };
}
