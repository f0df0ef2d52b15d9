//! Aplicación de la política de adapter sobre un step.
//!
//! Toda la política de propagación de fallos vive aquí: cambiar la
//! criticidad de un step (p. ej. volver falible una transformación pura) es
//! cambiar su adapter en la declaración del pipeline, no reescribir el step.

use crate::outcome::Outcome;
use crate::state::State;

use super::definition::{FailureValue, StepBody, StepDef};

/// Ejecuta `step` sobre `state` bajo la política de su adapter.
///
/// Contratos por adapter:
/// - `continue`: el step decide; su `Outcome` es el resultado.
/// - `map`: infalible por contrato; un panic dentro es defecto del step y se
///   propaga sin capturar.
/// - `try`: `Err` con clase declarada se vuelve `Failure`; clase NO declarada
///   es error de programación (clasificación incorrecta del adapter) y
///   produce panic.
/// - `tee`: se ejecuta por su efecto; el estado sigue intacto. Panics se
///   propagan igual que en `map`.
pub fn apply_step(step: &StepDef, state: &State) -> Outcome<State, FailureValue> {
    match &step.body {
        StepBody::Continue(run) => run(state),
        StepBody::Map(run) => Outcome::Success(run(state)),
        StepBody::Try { run, declared } => match run(state) {
            Ok(next) => Outcome::Success(next),
            Err(exc) if declared.contains(&exc.kind) => Outcome::Failure(exc.into_failure_value()),
            Err(exc) => panic!("undeclared error kind '{}' escaped try step '{}'",
                               exc.kind, step.name()),
        },
        StepBody::Tee(run) => {
            run(state);
            Outcome::Success(state.clone())
        }
    }
}
