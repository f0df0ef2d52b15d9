//! Builder de `Pipeline`.
//!
//! Acumula triples (nombre, adapter, step) en orden de declaración y valida
//! las invariantes de construcción en `build`:
//! - nombres únicos dentro del pipeline (necesario para despachar por step);
//! - `try` declara al menos una clase de error.
//!
//! La ordenación queda fija aquí; no hay reordenación en runtime.

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::errors::CoreTxError;
use crate::outcome::Outcome;
use crate::state::State;
use crate::step::{ErrorKind, FailureValue, StepBody, StepDef, StepException};

use super::Pipeline;

#[derive(Default)]
pub struct PipelineBuilder {
    steps: Vec<StepDef>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Step `continue`: operación de negocio falible que devuelve su propio
    /// `Outcome`.
    pub fn step<F>(mut self, name: impl Into<String>, run: F) -> Self
        where F: Fn(&State) -> Outcome<State, FailureValue> + Send + Sync + 'static
    {
        self.steps.push(StepDef::new(name, StepBody::Continue(Box::new(run))));
        self
    }

    /// Step `map`: transformación pura asumida infalible.
    pub fn map_step<F>(mut self, name: impl Into<String>, run: F) -> Self
        where F: Fn(&State) -> State + Send + Sync + 'static
    {
        self.steps.push(StepDef::new(name, StepBody::Map(Box::new(run))));
        self
    }

    /// Step `try`: captura las clases declaradas y las convierte en
    /// `Failure`; cualquier otra clase se trata como defecto.
    pub fn try_step<F, I, K>(mut self, name: impl Into<String>, declared: I, run: F) -> Self
        where F: Fn(&State) -> Result<State, StepException> + Send + Sync + 'static,
              I: IntoIterator<Item = K>,
              K: Into<ErrorKind>
    {
        let declared: BTreeSet<ErrorKind> = declared.into_iter().map(Into::into).collect();
        self.steps.push(StepDef::new(name, StepBody::Try { run: Box::new(run), declared }));
        self
    }

    /// Step `tee`: sólo efecto colateral; el retorno se descarta y el estado
    /// pasa intacto.
    pub fn tee_step<F>(mut self, name: impl Into<String>, run: F) -> Self
        where F: Fn(&State) + Send + Sync + 'static
    {
        self.steps.push(StepDef::new(name, StepBody::Tee(Box::new(run))));
        self
    }

    /// Valida invariantes y congela la definición.
    pub fn build(self) -> Result<Pipeline, CoreTxError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.name()) {
                return Err(CoreTxError::DuplicateStepName(step.name().to_string()));
            }
            if let Some(declared) = step.declared_kinds() {
                if declared.is_empty() {
                    return Err(CoreTxError::EmptyDeclaredKinds(step.name().to_string()));
                }
            }
        }
        Ok(Pipeline::from_steps(self.steps))
    }
}
