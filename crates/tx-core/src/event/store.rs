use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{TxEvent, TxEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts).
    fn append_kind(&mut self, tx_id: Uuid, kind: TxEventKind) -> TxEvent;
    /// Lista eventos de un run (orden ascendente por seq).
    fn list(&self, tx_id: Uuid) -> Vec<TxEvent>;
}

pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<TxEvent>>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self { inner: HashMap::new() }
    }
}

impl InMemoryEventStore {
    /// Vista compacta de la traza de un run, útil en tests:
    /// P = started, S = step started, F = step finished, X = step failed,
    /// C = completed, D = failure dropped.
    pub fn variants(&self, tx_id: Uuid) -> Vec<&'static str> {
        self.list(tx_id)
            .iter()
            .map(|e| match e.kind {
                TxEventKind::PipelineStarted { .. } => "P",
                TxEventKind::StepStarted { .. } => "S",
                TxEventKind::StepFinished { .. } => "F",
                TxEventKind::StepFailed { .. } => "X",
                TxEventKind::PipelineCompleted { .. } => "C",
                TxEventKind::FailureDropped { .. } => "D",
            })
            .collect()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, tx_id: Uuid, kind: TxEventKind) -> TxEvent {
        let vec = self.inner.entry(tx_id).or_default();
        let seq = vec.len() as u64;
        let ev = TxEvent { seq, tx_id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, tx_id: Uuid) -> Vec<TxEvent> {
        self.inner.get(&tx_id).cloned().unwrap_or_default()
    }
}
