use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{dates, id, EntityId};

/// An entry in an employee's salary history.
///
/// Append-only: entries are never edited, a raise is a new entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub id: EntityId,
    pub amount: f64,
    pub effective_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(with = "dates::strict")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalaryRecordInput {
    pub amount: f64,
    pub effective_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A free-text note about an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeNote {
    pub id: EntityId,
    #[serde(default, deserialize_with = "id::optional")]
    pub author_id: Option<EntityId>,
    /// Absent for notes written by the system.
    #[serde(default)]
    pub author_name: Option<String>,
    pub note: String,
    #[serde(with = "dates::strict")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub note: String,
}
