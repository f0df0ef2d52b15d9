//! JSON canónico minimal: objetos con claves ordenadas, sin whitespace.
//! Suficiente para dar identidad estable a definiciones de pipeline.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => serde_json::to_string(s).unwrap(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(to_canonical_json).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let sorted: BTreeMap<&String, String> =
                map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let inner: Vec<String> = sorted.into_iter()
                                           .map(|(k, v)| {
                                               format!("{}:{}",
                                                       serde_json::to_string(k).unwrap(),
                                                       v)
                                           })
                                           .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}
