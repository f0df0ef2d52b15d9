//! Errores propios del core (construcción y acceso; nunca fallos de negocio).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errores del core. Los fallos de negocio de un step NO viven aquí: esos son
/// datos (`FailureValue`) y viajan dentro de un `Outcome::Failure`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreTxError {
    #[error("invalid access: outcome is not {expected}")]
    InvalidAccess { expected: String },
    #[error("duplicate step name: {0}")]
    DuplicateStepName(String),
    #[error("try step '{0}' must declare at least one error kind")]
    EmptyDeclaredKinds(String),
    #[error("state payload must be a JSON object")]
    StateNotAnObject,
    #[error("internal: {0}")]
    Internal(String),
}

impl CoreTxError {
    /// Acceso inválido a la variante indicada ("success" | "failure").
    pub(crate) fn invalid_access(expected: &str) -> Self {
        CoreTxError::InvalidAccess { expected: expected.to_string() }
    }
}
