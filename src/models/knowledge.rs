use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{dates, EntityId};

/// A knowledge item: course, certification, language, tool or methodology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Knowledge {
    pub id: EntityId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Free-form kind (`TECNICO`, `CERTIFICACAO`, `CURSO`, ...).
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "nivel_minimo", default)]
    pub minimum_level: Option<String>,
    #[serde(rename = "categoria", alias = "area", default)]
    pub category: Option<String>,
    /// How long an acquired certification stays valid. `0` or absent means forever.
    #[serde(rename = "validade_meses", default)]
    pub validity_months: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Input for creating a knowledge item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateKnowledgeInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "nivel_minimo", skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "validade_meses", skip_serializing_if = "Option::is_none")]
    pub validity_months: Option<u32>,
}

/// Input for updating a knowledge item. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateKnowledgeInput {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "nivel_minimo", skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "validade_meses", skip_serializing_if = "Option::is_none")]
    pub validity_months: Option<u32>,
}

/// Link between an employee and a knowledge item (a "vínculo").
///
/// Tracks where the employee stands on acquiring it: desired, in progress,
/// obtained, expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vinculo {
    pub id: EntityId,
    pub employee_id: EntityId,
    pub knowledge_id: EntityId,
    pub status: String,
    /// Completion percentage, 0.0 to 100.0.
    #[serde(rename = "progresso", default)]
    pub progress: Option<f64>,
    #[serde(rename = "data_inicio", default, with = "dates::lenient")]
    pub started_on: Option<DateTime<Utc>>,
    #[serde(rename = "data_limite", default, with = "dates::lenient")]
    pub due_on: Option<DateTime<Utc>>,
    #[serde(rename = "data_obtencao", default, with = "dates::lenient")]
    pub obtained_on: Option<DateTime<Utc>>,
    #[serde(rename = "data_expiracao", default, with = "dates::lenient")]
    pub expires_on: Option<DateTime<Utc>>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "employee_nome", default)]
    pub employee_name: Option<String>,
    #[serde(rename = "knowledge_nome", default)]
    pub knowledge_name: Option<String>,
}

/// Input for linking an employee to a knowledge item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVinculoInput {
    pub employee_id: EntityId,
    pub knowledge_id: EntityId,
    /// Defaults to `DESEJADO` on the backend when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "progresso", skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(rename = "data_inicio", skip_serializing_if = "Option::is_none")]
    pub started_on: Option<NaiveDate>,
    #[serde(rename = "data_limite", skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

