//! Pipeline: secuencia ordenada de steps adaptados + loop de ejecución.
//!
//! Rol en el flujo:
//! - La definición (orden, nombres, adapters) queda fija en construcción; el
//!   `definition_hash` identifica esa forma.
//! - `run` es el fold con corte temprano: ningún step se ejecuta después del
//!   primer fallo (stop-on-failure). Esa garantía es la razón de existir del
//!   pipeline frente a llamadas secuenciales ingenuas.
//! - `run_recorded` añade la traza de eventos append-only al estilo del
//!   `EventStore`.

mod builder;

pub use builder::PipelineBuilder;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::event::{EventStore, TxEventKind};
use crate::hashing::hash_value;
use crate::outcome::Outcome;
use crate::state::State;
use crate::step::{apply_step, FailureValue, StepDef};

/// Fallo terminal de un run: valor de fallo etiquetado con el step que lo
/// produjo, para que el dispatcher pueda enrutar por nombre de step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: String,
    pub error: FailureValue,
}

/// Secuencia inmutable de steps con nombre único. Stateless: compartirla
/// entre hilos y correrla concurrentemente es seguro; cada run posee su
/// propio `State`.
pub struct Pipeline {
    steps: Vec<StepDef>,
    definition_hash: String,
}

impl Pipeline {
    /// Builder vacío (forma ergonómica: macro `pipeline!`).
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub(crate) fn from_steps(steps: Vec<StepDef>) -> Self {
        let shape: Vec<_> = steps.iter()
                                 .map(|s| json!({ "name": s.name(),
                                                  "adapter": format!("{:?}", s.adapter_kind()) }))
                                 .collect();
        let definition_hash = hash_value(&json!({
                                  "pipeline_version": crate::constants::PIPELINE_VERSION,
                                  "steps": shape,
                              }));
        Self { steps, definition_hash }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nombres de step en orden de declaración (= orden de ejecución).
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Hash estable de la forma del pipeline (versión + nombres + adapters).
    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    /// Ejecuta los steps en orden declarado, enhebrando el estado.
    ///
    /// Corta en el primer fallo: el `Failure` queda etiquetado con el nombre
    /// del step que falló y los steps posteriores NO se ejecutan. Un pipeline
    /// vacío devuelve `Success(initial)` sin cambios.
    pub fn run(&self, initial: State) -> Outcome<State, StepFailure> {
        let mut current = initial;
        for step in &self.steps {
            match apply_step(step, &current) {
                Outcome::Success(next) => current = next,
                Outcome::Failure(error) => {
                    return Outcome::Failure(StepFailure { step: step.name().to_string(), error })
                }
            }
        }
        Outcome::Success(current)
    }

    /// Como `run`, pero registra la traza del run en el `EventStore` bajo un
    /// `tx_id` nuevo, que se devuelve junto al resultado.
    pub fn run_recorded<E: EventStore>(&self,
                                       initial: State,
                                       store: &mut E)
                                       -> (Uuid, Outcome<State, StepFailure>) {
        let tx_id = Uuid::new_v4();
        store.append_kind(tx_id,
                          TxEventKind::PipelineStarted { definition_hash: self.definition_hash
                                                                              .clone(),
                                                         step_count: self.steps.len() });

        let mut current = initial;
        for (step_index, step) in self.steps.iter().enumerate() {
            store.append_kind(tx_id,
                              TxEventKind::StepStarted { step_index,
                                                         step_name: step.name().to_string(),
                                                         adapter: step.adapter_kind() });
            match apply_step(step, &current) {
                Outcome::Success(next) => {
                    let keys_added = next.keys()
                                         .filter(|k| !current.contains_key(k))
                                         .map(|k| k.to_string())
                                         .collect();
                    store.append_kind(tx_id,
                                      TxEventKind::StepFinished { step_index,
                                                                  step_name: step.name()
                                                                                 .to_string(),
                                                                  keys_added });
                    current = next;
                }
                Outcome::Failure(error) => {
                    store.append_kind(tx_id,
                                      TxEventKind::StepFailed { step_index,
                                                                step_name: step.name().to_string(),
                                                                error: error.clone() });
                    return (tx_id,
                            Outcome::Failure(StepFailure { step: step.name().to_string(), error }));
                }
            }
        }

        let final_keys = current.keys().map(|k| k.to_string()).collect();
        store.append_kind(tx_id, TxEventKind::PipelineCompleted { final_keys });
        (tx_id, Outcome::Success(current))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
         .field("steps", &self.step_names())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}
