use mate_core::ParamError;
use mate_exec::PlanError;

/// Why an inbound message or command could not be used as given.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown message type `{0}`")]
    UnknownType(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("context {0}")]
    Context(#[from] ParamError),
    #[error("plan rejected: {0}")]
    Plan(#[from] PlanError),
}
