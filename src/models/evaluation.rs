use serde::{Deserialize, Serialize};

use super::{id, EntityId};

/// A performance evaluation. Only its status matters to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EntityId,
    #[serde(default, deserialize_with = "id::optional")]
    pub employee_id: Option<EntityId>,
    pub status: EvaluationStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    #[serde(alias = "PENDENTE")]
    Pending,
    #[serde(alias = "CONCLUIDA", alias = "CONCLUIDO", alias = "COMPLETED")]
    Complete,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Complete => "COMPLETE",
        }
    }
}
