use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{dates, id, EntityId};

/// Employment status as reported by the backend.
///
/// The backend speaks Portuguese (`ATIVO`, `FERIAS`, `AFASTADO`, `INATIVO`);
/// both spellings decode. An unknown status is a decode error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    #[serde(alias = "ATIVO")]
    Active,
    #[serde(alias = "FERIAS")]
    Vacation,
    #[serde(alias = "AFASTADO")]
    Leave,
    #[serde(alias = "INATIVO", alias = "DESLIGADO")]
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Vacation => "VACATION",
            Self::Leave => "LEAVE",
            Self::Inactive => "INACTIVE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" | "ATIVO" => Some(Self::Active),
            "VACATION" | "FERIAS" => Some(Self::Vacation),
            "LEAVE" | "AFASTADO" => Some(Self::Leave),
            "INACTIVE" | "INATIVO" | "DESLIGADO" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// The slice of an employee record the alert engine looks at.
///
/// Optional dates that fail to parse decode as `None`, which the rules read
/// as "condition not met".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    #[serde(alias = "nome", alias = "nome_completo")]
    pub name: String,
    pub status: EmployeeStatus,
    #[serde(default, alias = "data_admissao", with = "dates::lenient")]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "id::optional")]
    pub manager_id: Option<EntityId>,
    #[serde(default, alias = "proximo_pdi", with = "dates::lenient")]
    pub next_pdi: Option<DateTime<Utc>>,
    #[serde(default, alias = "proxima_1x1", with = "dates::lenient")]
    pub next_one_on_one: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Full employee record as served by `/api/employees/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EntityId,
    #[serde(rename = "nome_completo", alias = "nome")]
    pub full_name: String,
    pub cpf: String,
    #[serde(default)]
    pub rg: Option<String>,
    #[serde(rename = "data_nascimento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "estado_civil", default)]
    pub marital_status: Option<String>,
    #[serde(rename = "email_pessoal", default)]
    pub personal_email: Option<String>,
    #[serde(rename = "email_corporativo", alias = "email")]
    pub work_email: String,
    #[serde(rename = "telefone_pessoal", default)]
    pub personal_phone: Option<String>,
    #[serde(rename = "telefone_corporativo", alias = "telefone", default)]
    pub work_phone: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "departamento", default)]
    pub department: Option<String>,
    #[serde(rename = "data_admissao", default, with = "dates::lenient")]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(rename = "salario", default)]
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    #[serde(default, deserialize_with = "id::optional")]
    pub manager_id: Option<EntityId>,
    #[serde(default, deserialize_with = "id::optional")]
    pub team_id: Option<EntityId>,
}

/// Input for creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    pub cpf: String,
    #[serde(rename = "email_corporativo")]
    pub work_email: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "data_admissao", skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(rename = "data_nascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "salario", skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    /// Defaults to `Active` on the backend when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<EntityId>,
}

/// Input for updating an employee. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeInput {
    #[serde(rename = "nome_completo", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "cargo", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "departamento", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(rename = "email_corporativo", skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(rename = "salario", skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn decodes_portuguese_wire_names() {
        let id = Uuid::new_v4().to_string();
        let employee: Employee = serde_json::from_value(json!({
            "id": id,
            "nome": "Ana Souza",
            "status": "FERIAS",
            "data_admissao": "2024-01-15",
            "proximo_pdi": null
        }))
        .unwrap();

        assert_eq!(employee.name, "Ana Souza");
        assert_eq!(employee.status, EmployeeStatus::Vacation);
        assert!(employee.hire_date.is_some());
        assert!(employee.next_pdi.is_none());
        assert!(employee.manager_id.is_none());
    }

    #[test]
    fn malformed_optional_date_decodes_as_none() {
        let employee: Employee = serde_json::from_value(json!({
            "id": Uuid::new_v4().to_string(),
            "name": "Bruno",
            "status": "ACTIVE",
            "next_pdi": "next tuesday"
        }))
        .unwrap();

        assert!(employee.next_pdi.is_none());
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        let result: Result<Employee, _> = serde_json::from_value(json!({
            "id": Uuid::new_v4().to_string(),
            "name": "Carla",
            "status": "SABBATICAL"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_name_is_a_decode_error() {
        let result: Result<Employee, _> = serde_json::from_value(json!({
            "id": Uuid::new_v4().to_string(),
            "nome": null,
            "status": "ATIVO"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn status_from_str_accepts_both_spellings() {
        assert_eq!(EmployeeStatus::from_str("afastado"), Some(EmployeeStatus::Leave));
        assert_eq!(EmployeeStatus::from_str("LEAVE"), Some(EmployeeStatus::Leave));
        assert_eq!(EmployeeStatus::from_str("other"), None);
    }

    #[test]
    fn update_input_omits_unset_fields() {
        let input = UpdateEmployeeInput {
            role: Some("Engineer".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({ "cargo": "Engineer" }));
    }
}
