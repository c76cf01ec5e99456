//! Command context: a small heterogeneous map read through per-verb typed accessors.

use std::collections::BTreeMap;

use mate_core::ParamError;
use serde::{Deserialize, Serialize};

/// One context value. Shapes no verb reads (`null`, arrays, objects) are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ContextValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ContextValue::Other(serde_json::Value::Null))
    }

    fn describe(&self) -> String {
        match self {
            ContextValue::Bool(b) => format!("bool {b}"),
            ContextValue::Number(n) => format!("number {n}"),
            ContextValue::Text(s) => format!("string {s:?}"),
            ContextValue::Other(value) => mate_exec::params::describe(value),
        }
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Number(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Text(value.to_string())
    }
}

/// Keys are looked up in order, so camelCase and snake_case spellings can share one accessor.
/// `null` reads as absent. A present value of the wrong type is an error, never a silent
/// default, and only for keys an accessor actually reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, ContextValue>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn first<'a, 'k>(&'a self, keys: &[&'k str]) -> Option<(&'k str, &'a ContextValue)> {
        keys.iter()
            .find_map(|key| {
                self.0
                    .get(*key)
                    .filter(|value| !value.is_null())
                    .map(|value| (*key, value))
            })
    }

    pub fn number(&self, keys: &[&str]) -> Result<Option<f32>, ParamError> {
        match self.first(keys) {
            None => Ok(None),
            Some((_, ContextValue::Number(n))) => Ok(Some(*n as f32)),
            Some((key, other)) => Err(ParamError::new(key, "number", other.describe())),
        }
    }

    pub fn text(&self, keys: &[&str]) -> Result<Option<&str>, ParamError> {
        match self.first(keys) {
            None => Ok(None),
            Some((_, ContextValue::Text(s))) => Ok(Some(s.as_str())),
            Some((key, other)) => Err(ParamError::new(key, "string", other.describe())),
        }
    }

    pub fn flag(&self, keys: &[&str]) -> Result<Option<bool>, ParamError> {
        match self.first(keys) {
            None => Ok(None),
            Some((_, ContextValue::Bool(b))) => Ok(Some(*b)),
            Some((key, other)) => Err(ParamError::new(key, "bool", other.describe())),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
