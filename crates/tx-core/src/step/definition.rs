//! Definición de un step y de su política de adapter.
//!
//! Un step es una unidad de trabajo con nombre único dentro de su pipeline.
//! El adapter es la ÚNICA pieza que decide cómo el retorno del step alimenta
//! el control de flujo; por eso los cuatro tipos viven en un enum cerrado
//! (`StepBody`) y el loop del pipeline hace match sobre ellos, en vez de una
//! jerarquía polimórfica abierta.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::outcome::Outcome;
use crate::state::State;

/// Valor de fallo de negocio. JSON arbitrario: el dispatcher lo compara
/// estructuralmente, así que un motivo simbólico es un string JSON y una
/// colección de errores de validación es un objeto/array.
pub type FailureValue = Value;

/// Tipo de adapter de un step (introspección y eventos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterKind {
    /// El step devuelve su propio `Outcome`; puede abortar el pipeline.
    Continue,
    /// Transformación pura asumida infalible.
    Map,
    /// Transformación con recuperación de errores declarados.
    Try,
    /// Sólo efecto colateral; el retorno se descarta.
    Tee,
}

/// Clase de error declarable ante un adapter `try` (p. ej.
/// `"gateway_timeout"`). Ordenable para vivir en `BTreeSet` y serializable
/// para viajar en eventos.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorKind(String);

impl ErrorKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ErrorKind {
    fn from(kind: &str) -> Self {
        Self(kind.to_string())
    }
}

impl From<String> for ErrorKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unidad "lanzable" por un step bajo adapter `try`: una clase (`kind`) más
/// detalle JSON libre. Si la clase está declarada, el adapter la convierte en
/// `Failure`; si no, es un error de programación y el run entero aborta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepException {
    pub kind: ErrorKind,
    pub detail: Value,
}

impl StepException {
    pub fn new(kind: impl Into<ErrorKind>, detail: Value) -> Self {
        Self { kind: kind.into(), detail }
    }

    /// Representación como valor de fallo una vez capturada por su adapter.
    pub fn into_failure_value(self) -> FailureValue {
        json!({ "kind": self.kind.as_str(), "detail": self.detail })
    }
}

/// Firma de un step bajo adapter `continue`.
pub type ContinueFn = dyn Fn(&State) -> Outcome<State, FailureValue> + Send + Sync;
/// Firma de un step bajo adapter `map`.
pub type MapFn = dyn Fn(&State) -> State + Send + Sync;
/// Firma de un step bajo adapter `try`.
pub type TryFn = dyn Fn(&State) -> Result<State, StepException> + Send + Sync;
/// Firma de un step bajo adapter `tee`.
pub type TeeFn = dyn Fn(&State) + Send + Sync;

/// Cuerpo del step: los cuatro adapters como enum cerrado.
pub enum StepBody {
    Continue(Box<ContinueFn>),
    Map(Box<MapFn>),
    Try {
        run: Box<TryFn>,
        /// Clases de error que este adapter captura. Invariante: no vacío
        /// (lo garantiza `PipelineBuilder::build`).
        declared: BTreeSet<ErrorKind>,
    },
    Tee(Box<TeeFn>),
}

/// Step con nombre + cuerpo adaptado. Stateless y reutilizable: correr el
/// mismo `StepDef` N veces no acumula nada en él.
pub struct StepDef {
    name: String,
    pub(crate) body: StepBody,
}

impl StepDef {
    pub(crate) fn new(name: impl Into<String>, body: StepBody) -> Self {
        Self { name: name.into(), body }
    }

    /// Nombre estable y único dentro del pipeline.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adapter_kind(&self) -> AdapterKind {
        match self.body {
            StepBody::Continue(_) => AdapterKind::Continue,
            StepBody::Map(_) => AdapterKind::Map,
            StepBody::Try { .. } => AdapterKind::Try,
            StepBody::Tee(_) => AdapterKind::Tee,
        }
    }

    /// Clases declaradas (vacío salvo para `try`).
    pub fn declared_kinds(&self) -> Option<&BTreeSet<ErrorKind>> {
        match &self.body {
            StepBody::Try { declared, .. } => Some(declared),
            _ => None,
        }
    }
}

impl fmt::Debug for StepDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDef")
         .field("name", &self.name)
         .field("adapter", &self.adapter_kind())
         .finish()
    }
}
