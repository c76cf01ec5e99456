/// A parameter was present but had the wrong shape.
///
/// Absent parameters fall back to documented defaults; a present parameter of the wrong type is
/// reported instead of being silently replaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parameter `{key}`: expected {expected}, found {found}")]
pub struct ParamError {
    pub key: String,
    pub expected: &'static str,
    pub found: String,
}

impl ParamError {
    pub fn new(key: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expected,
            found: found.into(),
        }
    }
}
