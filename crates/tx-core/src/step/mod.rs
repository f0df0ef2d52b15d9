//! Definiciones relacionadas a Steps.
//!
//! Un step es la unidad nombrada de trabajo del pipeline. Este módulo define:
//! - `StepDef` y `StepBody`: step con nombre + cuerpo según adapter.
//! - `AdapterKind`: los cuatro tipos de adapter como enum cerrado.
//! - `ErrorKind` / `StepException`: la moneda "lanzable" del adapter `try`.
//! - `apply_step`: aplicación de la política de adapter (único lugar donde
//!   vive la propagación de fallos).

pub mod apply;
pub mod definition;
pub mod macros; // macro `pipeline!` para declarar pipelines sin boilerplate

pub use apply::apply_step;
pub use definition::{AdapterKind, ContinueFn, ErrorKind, FailureValue, MapFn, StepBody, StepDef,
                     StepException, TeeFn, TryFn};
