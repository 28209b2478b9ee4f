use serde::{Deserialize, Serialize};

use super::{id, EntityId};

/// A business area (top of the org chart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: EntityId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Employee responsible for the area.
    #[serde(rename = "responsavel_id", default, deserialize_with = "id::optional")]
    pub owner_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A team within an area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: EntityId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    pub area_id: EntityId,
    #[serde(default, deserialize_with = "id::optional")]
    pub manager_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Input for creating or replacing an area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "responsavel_id", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Input for creating or replacing a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub area_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
