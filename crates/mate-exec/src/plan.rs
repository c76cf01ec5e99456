use mate_core::ParamError;
use serde::{Deserialize, Serialize};

use crate::step::StepError;
use crate::{ExecutorConfig, RawStep, Step};

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("malformed plan: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("step {index} ({action}): {source}")]
    Param {
        index: usize,
        action: String,
        #[source]
        source: ParamError,
    },
    #[error("step {index} ({action}): missing `{key}`")]
    MissingParam {
        index: usize,
        action: String,
        key: &'static str,
    },
}

/// Wire form of a plan: `{"sequence": [{"action": .., "params": {..}}, ..]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPlan {
    #[serde(default)]
    pub sequence: Vec<RawStep>,
}

/// Ordered steps, consumed strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub id: String,
    pub steps: Vec<Step>,
}

impl ExecutionPlan {
    /// Plan with a generated id.
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), steps)
    }

    pub fn with_id(id: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Type every raw step. The whole plan is rejected on the first bad step.
    pub fn from_raw(
        id: Option<String>,
        raw: &RawPlan,
        config: &ExecutorConfig,
    ) -> Result<Self, PlanError> {
        let steps = raw
            .sequence
            .iter()
            .enumerate()
            .map(|(index, step)| {
                Step::from_raw(step, config).map_err(|err| match err {
                    StepError::Param(source) => PlanError::Param {
                        index,
                        action: step.action.clone(),
                        source,
                    },
                    StepError::Missing(key) => PlanError::MissingParam {
                        index,
                        action: step.action.clone(),
                        key,
                    },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match id {
            Some(id) => Self::with_id(id, steps),
            None => Self::new(steps),
        })
    }

    /// Parse a `{"sequence": [...]}` document.
    pub fn from_json(json: &str, config: &ExecutorConfig) -> Result<Self, PlanError> {
        let raw: RawPlan = serde_json::from_str(json)?;
        Self::from_raw(None, &raw, config)
    }
}
