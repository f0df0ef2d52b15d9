//! Dispatcher: enruta un `Outcome` terminado hacia exactamente un handler.
//!
//! La tabla es una lista ordenada de entradas (no un lookup plano) y la
//! selección respeta la precedencia documentada:
//! 1. éxito → primer handler de éxito (sin handler: no-op);
//! 2. fallo → primer handler cuyo valor de fallo coincide estructuralmente;
//! 3. si no, primer handler por nombre del step que falló;
//! 4. si no, el fallback; sin fallback el fallo se descarta y `dispatch`
//!    lo reporta como `Dropped` (los callers deben registrar siempre un
//!    fallback; `dispatch_recorded` deja el descarte en la traza).
//!
//! Los handlers son funciones ordinarias sin contrato de retorno: existen por
//! su efecto (render, log, notificación). Por dispatch se ejecuta a lo sumo
//! uno.

use uuid::Uuid;

use crate::event::{EventStore, TxEventKind};
use crate::outcome::Outcome;
use crate::pipeline::StepFailure;
use crate::state::State;
use crate::step::FailureValue;

/// Handler del caso de éxito: recibe el estado final.
pub type StateHandler = Box<dyn Fn(&State)>;
/// Handler de fallo (por valor o por step): recibe el payload del fallo.
pub type FailureHandler = Box<dyn Fn(&FailureValue)>;
/// Handler de último recurso: recibe el fallo etiquetado completo.
pub type FallbackHandler = Box<dyn Fn(&StepFailure)>;

enum HandlerEntry {
    Success(StateHandler),
    ForValue(FailureValue, FailureHandler),
    ForStep(String, FailureHandler),
    Fallback(FallbackHandler),
}

/// Tabla de handlers. Se construye justo antes de despachar y no se
/// persiste; el orden de registro sólo desempata dentro de un mismo nivel de
/// precedencia.
#[derive(Default)]
pub struct HandlerTable {
    entries: Vec<HandlerEntry>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Handler del caso de éxito global.
    pub fn on_success<F: Fn(&State) + 'static>(mut self, handler: F) -> Self {
        self.entries.push(HandlerEntry::Success(Box::new(handler)));
        self
    }

    /// Handler para un valor de fallo específico (igualdad estructural).
    pub fn on_failure_value<F>(mut self, value: FailureValue, handler: F) -> Self
        where F: Fn(&FailureValue) + 'static
    {
        self.entries.push(HandlerEntry::ForValue(value, Box::new(handler)));
        self
    }

    /// Handler para cualquier fallo originado en el step nombrado.
    pub fn on_step<F>(mut self, step_name: impl Into<String>, handler: F) -> Self
        where F: Fn(&FailureValue) + 'static
    {
        self.entries.push(HandlerEntry::ForStep(step_name.into(), Box::new(handler)));
        self
    }

    /// Fallback para fallos que nada anterior atendió.
    pub fn otherwise<F: Fn(&StepFailure) + 'static>(mut self, handler: F) -> Self {
        self.entries.push(HandlerEntry::Fallback(Box::new(handler)));
        self
    }
}

/// Qué nivel de la tabla atendió el dispatch (gancho para tests y trazas;
/// los handlers en sí no devuelven nada).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// Éxito atendido por un handler de éxito.
    Success,
    /// Éxito sin handler registrado: no-op deliberado.
    SuccessUnhandled,
    /// Fallo atendido por igualdad de valor.
    MatchedFailureValue,
    /// Fallo atendido por nombre de step.
    MatchedStep,
    /// Fallo atendido por el fallback.
    Fallback,
    /// Fallo sin handler alguno: descartado. Smell de diseño del caller.
    Dropped,
}

/// Selecciona e invoca exactamente un handler según la precedencia
/// documentada. Primer match gana dentro de cada nivel.
pub fn dispatch(outcome: &Outcome<State, StepFailure>, handlers: &HandlerTable) -> Dispatched {
    match outcome {
        Outcome::Success(state) => {
            for entry in &handlers.entries {
                if let HandlerEntry::Success(h) = entry {
                    h(state);
                    return Dispatched::Success;
                }
            }
            Dispatched::SuccessUnhandled
        }
        Outcome::Failure(failure) => {
            for entry in &handlers.entries {
                if let HandlerEntry::ForValue(value, h) = entry {
                    if *value == failure.error {
                        h(&failure.error);
                        return Dispatched::MatchedFailureValue;
                    }
                }
            }
            for entry in &handlers.entries {
                if let HandlerEntry::ForStep(step_name, h) = entry {
                    if *step_name == failure.step {
                        h(&failure.error);
                        return Dispatched::MatchedStep;
                    }
                }
            }
            for entry in &handlers.entries {
                if let HandlerEntry::Fallback(h) = entry {
                    h(failure);
                    return Dispatched::Fallback;
                }
            }
            Dispatched::Dropped
        }
    }
}

/// Como `dispatch`, pero deja constancia en el `EventStore` cuando un fallo
/// termina descartado, bajo el `tx_id` del run que lo produjo.
pub fn dispatch_recorded<E: EventStore>(outcome: &Outcome<State, StepFailure>,
                                        handlers: &HandlerTable,
                                        tx_id: Uuid,
                                        store: &mut E)
                                        -> Dispatched {
    let dispatched = dispatch(outcome, handlers);
    if dispatched == Dispatched::Dropped {
        if let Outcome::Failure(failure) = outcome {
            store.append_kind(tx_id,
                              TxEventKind::FailureDropped { step_name: failure.step.clone(),
                                                            error: failure.error.clone() });
        }
    }
    dispatched
}
