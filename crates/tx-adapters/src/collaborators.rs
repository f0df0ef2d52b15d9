//! Colaboradores externos falsos para el flujo de checkout.
//!
//! Todos son deterministas y en memoria: el directorio de clientes responde
//! por token, la pasarela de pago responde según un comportamiento fijado al
//! construirla, y el audit log acumula líneas bajo un `Mutex` para poder
//! compartirse entre el step `tee` y las aserciones de los tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};
use tx_core::StepException;

/// Clase declarada: la pasarela no respondió a tiempo.
pub const GATEWAY_TIMEOUT: &str = "gateway_timeout";
/// Clase declarada: la tarjeta fue rechazada.
pub const CARD_DECLINED: &str = "card_declined";

/// Directorio de clientes indexado por token de sesión.
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: HashMap<String, Value>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self { customers: HashMap::new() }
    }

    /// Registra un cliente bajo su token (estilo builder para tests/demos).
    pub fn with_customer(mut self, token: impl Into<String>, record: Value) -> Self {
        self.customers.insert(token.into(), record);
        self
    }

    pub fn lookup(&self, token: &str) -> Option<Value> {
        self.customers.get(token).cloned()
    }
}

/// Contrato de cobro. El step `charge_card` sólo conoce este trait; las
/// clases de error que puede devolver son las que su adapter `try` declara.
pub trait PaymentGateway: Send + Sync {
    fn charge(&self, customer: &Value, amount_cents: u64) -> Result<Value, StepException>;
}

/// Comportamiento fijo de la pasarela falsa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeBehavior {
    /// Aprueba y devuelve un recibo.
    Approve,
    /// Devuelve la clase declarada `gateway_timeout`.
    Timeout,
    /// Devuelve la clase declarada `card_declined`.
    Decline,
    /// Devuelve una clase NO declarada: simula el defecto de clasificación.
    Crash,
}

/// Pasarela determinista para tests y demo. Cuenta los intentos de cobro
/// para poder verificar el corte temprano del pipeline.
pub struct FakePaymentGateway {
    behavior: ChargeBehavior,
    attempts: Mutex<Vec<u64>>,
}

impl FakePaymentGateway {
    pub fn with_behavior(behavior: ChargeBehavior) -> Self {
        Self { behavior, attempts: Mutex::new(Vec::new()) }
    }

    pub fn approving() -> Self {
        Self::with_behavior(ChargeBehavior::Approve)
    }

    /// Cantidad de cobros intentados (exitosos o no).
    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().expect("attempts lock").len()
    }
}

impl PaymentGateway for FakePaymentGateway {
    fn charge(&self, customer: &Value, amount_cents: u64) -> Result<Value, StepException> {
        self.attempts.lock().expect("attempts lock").push(amount_cents);
        match self.behavior {
            ChargeBehavior::Approve => Ok(json!({
                "receipt_id": format!("rcpt-{amount_cents}"),
                "customer_id": customer.get("id").cloned().unwrap_or(Value::Null),
                "amount_cents": amount_cents,
            })),
            ChargeBehavior::Timeout => {
                Err(StepException::new(GATEWAY_TIMEOUT, json!({ "after_ms": 3000 })))
            }
            ChargeBehavior::Decline => {
                Err(StepException::new(CARD_DECLINED, json!({ "code": 51 })))
            }
            ChargeBehavior::Crash => {
                Err(StepException::new("gateway_wire_corruption", json!(null)))
            }
        }
    }
}

/// Sumidero de auditoría del step `tee`. Compartible (`Mutex`) porque el
/// pipeline puede correr desde varios hilos.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Mutex<Vec<String>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, line: impl Into<String>) {
        self.entries.lock().expect("audit lock").push(line.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("audit lock").clone()
    }
}
