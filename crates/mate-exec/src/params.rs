//! Typed reads from a JSON parameter map.
//!
//! Absent keys (and explicit `null`) read as `None`; a present key of the wrong type is a
//! [`ParamError`].

use mate_core::{ParamError, Vec3};
use serde_json::{Map, Value};

pub type Params = Map<String, Value>;

pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

fn present<'a>(params: &'a Params, key: &str) -> Option<&'a Value> {
    params.get(key).filter(|v| !v.is_null())
}

pub fn number(params: &Params, key: &str) -> Result<Option<f32>, ParamError> {
    match present(params, key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|n| Some(n as f32))
            .ok_or_else(|| ParamError::new(key, "number", n.to_string())),
        Some(other) => Err(ParamError::new(key, "number", describe(other))),
    }
}

pub fn text(params: &Params, key: &str) -> Result<Option<String>, ParamError> {
    match present(params, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ParamError::new(key, "string", describe(other))),
    }
}

/// `[x, y, z]` or `{"x": .., "y": .., "z": ..}`.
pub fn point(params: &Params, key: &str) -> Result<Option<Vec3>, ParamError> {
    match present(params, key) {
        None => Ok(None),
        Some(value) => value_to_point(value)
            .map(Some)
            .ok_or_else(|| ParamError::new(key, "point [x, y, z]", describe(value))),
    }
}

pub fn points(params: &Params, key: &str) -> Result<Option<Vec<Vec3>>, ParamError> {
    match present(params, key) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                value_to_point(item)
                    .ok_or_else(|| ParamError::new(key, "list of points", describe(item)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(ParamError::new(key, "list of points", describe(other))),
    }
}

fn value_to_point(value: &Value) -> Option<Vec3> {
    let coord = |v: &Value| v.as_f64().map(|n| n as f32);
    match value {
        Value::Array(items) if items.len() == 3 => Some(Vec3::new(
            coord(&items[0])?,
            coord(&items[1])?,
            coord(&items[2])?,
        )),
        Value::Object(map) => Some(Vec3::new(
            coord(map.get("x")?)?,
            coord(map.get("y")?)?,
            coord(map.get("z")?)?,
        )),
        _ => None,
    }
}
