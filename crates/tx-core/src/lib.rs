//! tx-core: Motor de transacciones por steps con corte railway (T1)
//!
//! Un `Pipeline` ejecuta una secuencia ordenada de steps con nombre sobre un
//! `State` acumulativo; cada step, según su adapter (`continue`/`map`/`try`/
//! `tee`), continúa el run con estado aumentado o lo aborta con un valor de
//! fallo etiquetado. El `dispatch` final enruta el `Outcome` terminado hacia
//! exactamente un handler (por éxito, por valor de fallo o por step).

pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod outcome;
pub mod pipeline;
pub mod state;
pub mod step;

pub use dispatch::{dispatch, dispatch_recorded, Dispatched, HandlerTable};
pub use errors::CoreTxError;
pub use event::{EventStore, InMemoryEventStore, TxEvent, TxEventKind};
pub use outcome::Outcome;
pub use pipeline::{Pipeline, PipelineBuilder, StepFailure};
pub use state::State;
pub use step::{apply_step, AdapterKind, ErrorKind, FailureValue, StepBody, StepDef, StepException};
