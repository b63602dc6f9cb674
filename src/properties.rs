use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;

use crate::error::BridgeResult;

/// String-keyed property storage owned by the host framework.
///
/// The bridge only ever reads: effect file path, timeline bounds and the
/// `producer.<name>.*` configuration all live here. Writes stay on the host
/// side of the boundary.
pub trait PropertyStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// All entries whose key starts with `prefix`, with the prefix stripped.
    /// Used to pass `producer.<name>.*` configuration through onto a newly
    /// created media source.
    fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, String)>;

    /// Integer frame position, defaulting to 0 for absent or malformed
    /// values as the host framework does.
    fn get_position(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    fn get_double(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

/// In-memory `PropertyStore` for embedders and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryProperties {
    entries: BTreeMap<String, String>,
}

impl MemoryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Build a store from a JSON object. String, integer, float and bool
    /// values are accepted and stored as strings, matching the host
    /// framework's stringly-typed property system.
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        let parsed: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).context("parse property JSON object")?;
        let mut store = Self::new();
        for (key, value) in parsed {
            let rendered = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => other.to_string(),
            };
            store.set(key, rendered);
        }
        Ok(store)
    }
}

impl PropertyStore for MemoryProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k[prefix.len()..].to_string(), v.clone()))
            .collect()
    }
}

/// Named parameters the render engine may query while painting a scene.
pub trait ParameterSource: Send + Sync {
    fn number_parameter(&self, name: &str) -> f64;
    fn string_parameter(&self, name: &str) -> Option<String>;
}

/// Read-only adapter exposing host properties to the render engine.
pub struct PropertyParameters {
    properties: Arc<dyn PropertyStore>,
}

impl PropertyParameters {
    pub fn new(properties: Arc<dyn PropertyStore>) -> Self {
        Self { properties }
    }
}

impl ParameterSource for PropertyParameters {
    fn number_parameter(&self, name: &str) -> f64 {
        self.properties.get_double(name)
    }

    fn string_parameter(&self, name: &str) -> Option<String> {
        self.properties.get(name)
    }
}
