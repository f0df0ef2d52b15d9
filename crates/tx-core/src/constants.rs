//! Constantes del core de transacciones.
//!
//! Valores estáticos que participan en el cálculo del `definition_hash` de un
//! pipeline. Cambios aquí invalidan hashes previos por diseño: una versión
//! nueva del motor debe producir identidades nuevas aunque la definición no
//! cambie.

/// Versión lógica del motor de transacciones. Entra en el input del hashing
/// de definiciones (`Pipeline::definition_hash`). Mantener estable mientras
/// no haya cambios incompatibles en la semántica de los adapters.
pub const PIPELINE_VERSION: &str = "T1.0";
