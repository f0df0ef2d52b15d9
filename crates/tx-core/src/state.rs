//! Estado acumulado del pipeline.
//!
//! `State` es un mapa string → JSON con semántica de actualización inmutable:
//! un step recibe `&State` y produce un `State` nuevo vía `with`. Las claves
//! sólo se añaden o reemplazan, nunca se borran; los steps posteriores
//! dependen de que el conjunto de claves crezca de forma monótona.
//!
//! El payload es `serde_json::Value` neutro: el core no interpreta la
//! semántica de lo que los steps acumulan (`params`, `customer`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreTxError;

/// Mapa inmutable-por-convención de claves de transacción.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    entries: Map<String, Value>,
}

impl State {
    /// Estado vacío (punto de partida habitual de un `run`).
    pub fn new() -> Self {
        Self { entries: Map::new() }
    }

    /// Copia con la clave añadida o reemplazada. Nunca borra claves.
    pub fn with(&self, key: impl Into<String>, value: Value) -> State {
        let mut entries = self.entries.clone();
        entries.insert(key.into(), value);
        State { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Claves presentes, en orden de inserción.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Representación JSON del estado completo (para eventos y handlers).
    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

impl From<Map<String, Value>> for State {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl TryFrom<Value> for State {
    type Error = CoreTxError;

    /// Sólo objetos JSON son estados válidos.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(CoreTxError::StateNotAnObject),
        }
    }
}
