//! Resultado de dos variantes (`Success` / `Failure`) que atraviesa todo el
//! pipeline.
//!
//! Rol en el flujo:
//! - Cada step (vía su adapter) produce un `Outcome<State, FailureValue>`.
//! - `Pipeline::run` devuelve un `Outcome<State, StepFailure>` final.
//! - El dispatcher enruta ese `Outcome` terminado hacia exactamente un
//!   handler.
//!
//! Es un value object inmutable: una vez construido no hay mutación, y la
//! igualdad es estructural (variante + payload) para facilitar tests.

use serde::{Deserialize, Serialize};

use crate::errors::CoreTxError;

/// Unión etiquetada éxito/fallo. Exactamente una variante poblada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome<S, E> {
    /// El trabajo continuó: transporta el estado acumulado.
    Success(S),
    /// El trabajo abortó: transporta el motivo del fallo.
    Failure(E),
}

impl<S, E> Outcome<S, E> {
    /// Constructor de la variante de éxito.
    pub fn success(state: S) -> Self {
        Outcome::Success(state)
    }

    /// Constructor de la variante de fallo.
    pub fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Acceso chequeado al estado. Falla con `InvalidAccess` sobre `Failure`.
    pub fn state(&self) -> Result<&S, CoreTxError> {
        match self {
            Outcome::Success(s) => Ok(s),
            Outcome::Failure(_) => Err(CoreTxError::invalid_access("success")),
        }
    }

    /// Acceso chequeado al error. Falla con `InvalidAccess` sobre `Success`.
    pub fn error(&self) -> Result<&E, CoreTxError> {
        match self {
            Outcome::Success(_) => Err(CoreTxError::invalid_access("failure")),
            Outcome::Failure(e) => Ok(e),
        }
    }

    /// Variante consumidora de `state()`.
    pub fn into_state(self) -> Result<S, CoreTxError> {
        match self {
            Outcome::Success(s) => Ok(s),
            Outcome::Failure(_) => Err(CoreTxError::invalid_access("success")),
        }
    }

    /// Variante consumidora de `error()`.
    pub fn into_error(self) -> Result<E, CoreTxError> {
        match self {
            Outcome::Success(_) => Err(CoreTxError::invalid_access("failure")),
            Outcome::Failure(e) => Ok(e),
        }
    }

    /// Transforma el payload de éxito dejando el fallo intacto.
    pub fn map<T, F: FnOnce(S) -> T>(self, op: F) -> Outcome<T, E> {
        match self {
            Outcome::Success(s) => Outcome::Success(op(s)),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Transforma el payload de fallo dejando el éxito intacto.
    pub fn map_err<F, O: FnOnce(E) -> F>(self, op: O) -> Outcome<S, F> {
        match self {
            Outcome::Success(s) => Outcome::Success(s),
            Outcome::Failure(e) => Outcome::Failure(op(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_reflect_variant() {
        let ok: Outcome<i32, &str> = Outcome::success(7);
        let bad: Outcome<i32, &str> = Outcome::failure("nope");
        assert!(ok.is_success() && !ok.is_failure());
        assert!(bad.is_failure() && !bad.is_success());
    }

    #[test]
    fn checked_access_fails_on_wrong_variant() {
        let ok: Outcome<i32, &str> = Outcome::success(7);
        assert_eq!(ok.state(), Ok(&7));
        assert_eq!(ok.error(),
                   Err(CoreTxError::InvalidAccess { expected: "failure".to_string() }));

        let bad: Outcome<i32, &str> = Outcome::failure("nope");
        assert_eq!(bad.error(), Ok(&"nope"));
        assert_eq!(bad.into_state(),
                   Err(CoreTxError::InvalidAccess { expected: "success".to_string() }));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Outcome::<i32, &str>::success(1), Outcome::success(1));
        assert_ne!(Outcome::<i32, &str>::success(1), Outcome::failure("x"));
        assert_eq!(Outcome::<i32, &str>::failure("x"), Outcome::failure("x"));
    }

    #[test]
    fn map_touches_only_its_side() {
        let ok: Outcome<i32, &str> = Outcome::success(2);
        assert_eq!(ok.map(|n| n * 10), Outcome::success(20));

        let bad: Outcome<i32, &str> = Outcome::failure("boom");
        assert_eq!(bad.map(|n| n * 10), Outcome::failure("boom"));
        let relabeled: Outcome<i32, String> =
            Outcome::<i32, &str>::failure("boom").map_err(|e| format!("tagged:{e}"));
        assert_eq!(relabeled, Outcome::failure("tagged:boom".to_string()));
    }
}
