use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier of a backend record.
///
/// Older tables use integer keys and newer ones UUIDs, sometimes for the same
/// resource depending on the deployment. Both shapes decode and round-trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        match id.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(id.to_string()),
        }
    }
}

/// Optional references where the backend sends `""` for "unset".
pub fn optional<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<EntityId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !matches!(id, EntityId::Text(s) if s.trim().is_empty())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "optional")]
        manager_id: Option<EntityId>,
    }

    #[test]
    fn decodes_numbers_and_strings() {
        let n: EntityId = serde_json::from_value(json!(42)).unwrap();
        let s: EntityId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, EntityId::Number(42));
        assert_eq!(s.to_string(), "a1b2");
    }

    #[test]
    fn empty_reference_is_none() {
        let h: Holder = serde_json::from_value(json!({ "manager_id": "" })).unwrap();
        assert!(h.manager_id.is_none());

        let h: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(h.manager_id.is_none());

        let h: Holder = serde_json::from_value(json!({ "manager_id": 7 })).unwrap();
        assert_eq!(h.manager_id, Some(EntityId::Number(7)));
    }

    #[test]
    fn from_str_prefers_numbers() {
        assert_eq!(EntityId::from("12"), EntityId::Number(12));
        assert_eq!(EntityId::from("x-12"), EntityId::Text("x-12".to_string()));
    }
}
