//! Per-record decoding for list responses.
//!
//! A list endpoint can return one malformed row among many valid ones. These
//! helpers drop the bad row with a warning instead of failing the whole list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode each element on its own, skipping the ones that do not fit `T`.
pub fn decode_each<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed {} at index {}: {}", kind, index, e);
                None
            }
        })
        .collect()
}

/// `deserialize_with` form of [`decode_each`]. `null` is an empty list.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(decode_each(values, std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmployeeStatus};
    use serde_json::json;

    #[test]
    fn bad_rows_are_dropped_good_rows_kept() {
        let employees: Vec<Employee> = decode_each(
            vec![
                json!({ "id": 1, "nome": null, "status": "ATIVO" }),
                json!({ "id": 2, "nome": "Ana", "status": "ATIVO" }),
                json!({ "id": 3, "nome": "Bia", "status": "APOSENTADO" }),
                json!("not even an object"),
            ],
            "employee",
        );

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, "Ana");
        assert_eq!(employees[0].status, EmployeeStatus::Active);
    }

    #[test]
    fn null_list_is_empty() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "skip_invalid")]
            employees: Vec<Employee>,
        }

        let h: Holder = serde_json::from_value(json!({ "employees": null })).unwrap();
        assert!(h.employees.is_empty());
    }
}
