//! Tipos de evento de un run y estructura `TxEvent`.
//!
//! Rol en el flujo:
//! - Cada `run_recorded` emite eventos a un `EventStore` append-only.
//! - La traza permite auditar qué steps corrieron, qué claves añadió cada
//!   uno y dónde cortó el run, sin inspeccionar estado mutable.
//! - El enum `TxEventKind` es el contrato observable del motor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::step::{AdapterKind, FailureValue};

/// Tipos de eventos emitidos por el motor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TxEventKind {
    /// Apertura del run: fija el `definition_hash` y la cantidad de steps.
    /// Invariante: debe ser el primer evento de un `tx_id`.
    PipelineStarted { definition_hash: String, step_count: usize },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted {
        step_index: usize,
        step_name: String,
        adapter: AdapterKind,
    },
    /// Un step terminó correctamente; `keys_added` son las claves nuevas que
    /// su estado de salida aporta respecto al de entrada.
    StepFinished {
        step_index: usize,
        step_name: String,
        keys_added: Vec<String>,
    },
    /// Un step falló. El run no continúa (stop-on-failure).
    StepFailed {
        step_index: usize,
        step_name: String,
        error: FailureValue,
    },
    /// Cierre exitoso del run con el conjunto final de claves del estado.
    PipelineCompleted { final_keys: Vec<String> },
    /// Un fallo terminó sin handler que lo atendiera (ver dispatcher). Señal
    /// de diseño: los callers deben registrar siempre un fallback.
    FailureDropped { step_name: String, error: FailureValue },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxEvent {
    pub seq: u64, // asignado por el EventStore (orden de append)
    pub tx_id: Uuid,
    pub kind: TxEventKind,
    pub ts: DateTime<Utc>, // metadato de traza (no participa en hashes)
}
