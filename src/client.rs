//! HTTP client for the Gestão 360 REST backend.
//!
//! One method per backend operation. Every 2xx body is decoded into its typed
//! model; anything that does not decode is a [`ClientError::Decode`], never a
//! half-filled record. Employee and evaluation listings decode row by row and
//! drop malformed rows instead. The bearer token comes from the [`Session`] handed to
//! [`HrClient::from_session`].

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alerts::Snapshot;
use crate::config::AppConfig;
use crate::models::*;
use crate::session::Session;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unauthorized: sign in again")]
    Unauthorized,

    #[error("Forbidden: your role cannot do this")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

const UNKNOWN_ERROR: &str = "unknown error";

/// FastAPI error body: `detail` is either a message or a list of field errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

/// Pull a human-readable message out of an error body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Detail::Message(msg),
        }) => msg,
        Ok(ErrorBody {
            detail: Detail::Fields(fields),
        }) if !fields.is_empty() => fields
            .iter()
            .map(|f| {
                let path: Vec<String> = f
                    .loc
                    .iter()
                    .map(|part| match part {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                format!("{}: {}", path.join("."), f.msg)
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => UNKNOWN_ERROR.to_string(),
    }
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound(error_detail(body)),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(error_detail(body))
        }
        _ => ClientError::Server {
            status: status.as_u16(),
            detail: error_detail(body),
        },
    }
}

/// `{"success": true, "data": ...}` wrapper used by the areas, teams,
/// vinculos and alerts routes.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct EmployeeQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    employee_id: Option<&'a EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
}

impl<'a> EmployeeQuery<'a> {
    fn employee(employee_id: Option<&'a EntityId>) -> Self {
        Self {
            employee_id,
            year: None,
        }
    }
}

/// HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct HrClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HrClient {
    pub fn new(config: &AppConfig, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn from_session(config: &AppConfig, session: &Session) -> Result<Self, ClientError> {
        Self::new(config, session.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with the bearer header when signed in.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Decode a 2xx body, or map the status to a [`ClientError`].
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            tracing::warn!("Backend answered {}: {}", status, body);
            Err(status_error(status, &body))
        }
    }

    /// Handle a response whose body is ignored (204 No Content and friends).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Backend answered {}: {}", status, body);
            Err(status_error(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path).send().await?;
        self.handle_response(response).await
    }

    async fn get_with<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn get_enveloped<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.get(path).await?;
        Ok(envelope.data)
    }

    async fn get_enveloped_with<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.get_with(path, query).await?;
        Ok(envelope.data)
    }

    /// Send a body and ignore whatever acknowledgement comes back.
    async fn send_ack<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let response = self.request(method, path).json(body).send().await?;
        self.handle_empty_response(response).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, path).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.request(Method::DELETE, path).send().await?;
        self.handle_empty_response(response).await
    }

    // ============================================================
    // Auth
    // ============================================================

    /// Exchange credentials for a token. The client itself stays unchanged;
    /// store the token in the session and rebuild.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let input = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/api/auth/login", &input).await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("/api/auth/me").await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.request(Method::POST, "/api/auth/logout").send().await?;
        self.handle_empty_response(response).await
    }

    // ============================================================
    // Employees
    // ============================================================

    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, ClientError> {
        let rows: Vec<serde_json::Value> = self.get("/api/employees").await?;
        Ok(records::decode_each(rows, "employee"))
    }

    /// The same listing decoded as the slim view the alert rules read.
    /// Malformed rows are skipped with a warning.
    pub async fn list_employee_snapshots(&self) -> Result<Vec<Employee>, ClientError> {
        let rows: Vec<serde_json::Value> = self.get("/api/employees").await?;
        Ok(records::decode_each(rows, "employee"))
    }

    pub async fn get_employee(&self, id: &EntityId) -> Result<EmployeeRecord, ClientError> {
        self.get(&format!("/api/employees/{}", id)).await
    }

    pub async fn create_employee(
        &self,
        input: &CreateEmployeeInput,
    ) -> Result<EmployeeRecord, ClientError> {
        self.send_json(Method::POST, "/api/employees", input).await
    }

    pub async fn update_employee(
        &self,
        id: &EntityId,
        input: &UpdateEmployeeInput,
    ) -> Result<EmployeeRecord, ClientError> {
        self.send_json(Method::PUT, &format!("/api/employees/{}", id), input)
            .await
    }

    pub async fn delete_employee(&self, id: &EntityId) -> Result<(), ClientError> {
        self.delete(&format!("/api/employees/{}", id)).await
    }

    // ============================================================
    // Evaluations
    // ============================================================

    /// Evaluations, one malformed row at a time. Deployments without the
    /// evaluations route answer 404, which reads as "no evaluations".
    pub async fn list_evaluations(&self) -> Result<Vec<Evaluation>, ClientError> {
        match self.get::<Vec<serde_json::Value>>("/evaluations").await {
            Ok(rows) => Ok(records::decode_each(rows, "evaluation")),
            Err(ClientError::NotFound(detail)) => {
                tracing::warn!("Evaluations unavailable ({}), assuming none", detail);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    // ============================================================
    // Areas & teams
    // ============================================================

    pub async fn list_areas(&self) -> Result<Vec<Area>, ClientError> {
        self.get_enveloped("/areas").await
    }

    pub async fn get_area(&self, id: &EntityId) -> Result<Area, ClientError> {
        self.get_enveloped(&format!("/areas/{}", id)).await
    }

    /// The backend only acknowledges writes to areas and teams; re-list to
    /// see the stored record.
    pub async fn create_area(&self, input: &AreaInput) -> Result<(), ClientError> {
        self.send_ack(Method::POST, "/areas", input).await
    }

    pub async fn update_area(&self, id: &EntityId, input: &AreaInput) -> Result<(), ClientError> {
        self.send_ack(Method::PUT, &format!("/areas/{}", id), input)
            .await
    }

    pub async fn delete_area(&self, id: &EntityId) -> Result<(), ClientError> {
        self.delete(&format!("/areas/{}", id)).await
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, ClientError> {
        self.get_enveloped("/teams").await
    }

    pub async fn get_team(&self, id: &EntityId) -> Result<Team, ClientError> {
        self.get_enveloped(&format!("/teams/{}", id)).await
    }

    pub async fn create_team(&self, input: &TeamInput) -> Result<(), ClientError> {
        self.send_ack(Method::POST, "/teams", input).await
    }

    pub async fn update_team(&self, id: &EntityId, input: &TeamInput) -> Result<(), ClientError> {
        self.send_ack(Method::PUT, &format!("/teams/{}", id), input)
            .await
    }

    pub async fn delete_team(&self, id: &EntityId) -> Result<(), ClientError> {
        self.delete(&format!("/teams/{}", id)).await
    }

    // ============================================================
    // Knowledge & vinculos
    // ============================================================

    pub async fn list_knowledge(&self) -> Result<Vec<Knowledge>, ClientError> {
        self.get("/knowledge").await
    }

    pub async fn get_knowledge(&self, id: &EntityId) -> Result<Knowledge, ClientError> {
        self.get(&format!("/knowledge/{}", id)).await
    }

    pub async fn create_knowledge(
        &self,
        input: &CreateKnowledgeInput,
    ) -> Result<Knowledge, ClientError> {
        self.send_json(Method::POST, "/knowledge", input).await
    }

    pub async fn update_knowledge(
        &self,
        id: &EntityId,
        input: &UpdateKnowledgeInput,
    ) -> Result<Knowledge, ClientError> {
        self.send_json(Method::PUT, &format!("/knowledge/{}", id), input)
            .await
    }

    pub async fn list_vinculos(
        &self,
        employee_id: Option<&EntityId>,
    ) -> Result<Vec<Vinculo>, ClientError> {
        self.get_enveloped_with("/employee-knowledge", &EmployeeQuery::employee(employee_id))
            .await
    }

    pub async fn get_vinculo(&self, id: &EntityId) -> Result<Vinculo, ClientError> {
        self.get_enveloped(&format!("/employee-knowledge/{}", id))
            .await
    }

    pub async fn create_vinculo(&self, input: &CreateVinculoInput) -> Result<(), ClientError> {
        self.send_ack(Method::POST, "/employee-knowledge", input)
            .await
    }

    // ============================================================
    // Day-offs
    // ============================================================

    pub async fn list_day_offs(
        &self,
        employee_id: &EntityId,
        year: Option<i32>,
    ) -> Result<Vec<DayOff>, ClientError> {
        let query = EmployeeQuery {
            employee_id: Some(employee_id),
            year,
        };
        self.get_with("/day-offs", &query).await
    }

    pub async fn create_day_off(&self, input: &CreateDayOffInput) -> Result<DayOff, ClientError> {
        input.validate()?;
        self.send_json(Method::POST, "/day-offs", input).await
    }

    pub async fn update_day_off(
        &self,
        id: &EntityId,
        input: &UpdateDayOffInput,
    ) -> Result<DayOff, ClientError> {
        input.validate()?;
        self.send_json(Method::PATCH, &format!("/day-offs/{}", id), input)
            .await
    }

    pub async fn delete_day_off(&self, id: &EntityId) -> Result<(), ClientError> {
        self.delete(&format!("/day-offs/{}", id)).await
    }

    // ============================================================
    // One-on-ones
    // ============================================================

    pub async fn list_one_on_ones(
        &self,
        employee_id: Option<&EntityId>,
    ) -> Result<Vec<OneOnOne>, ClientError> {
        self.get_with("/one-on-ones", &EmployeeQuery::employee(employee_id))
            .await
    }

    pub async fn create_one_on_one(
        &self,
        input: &CreateOneOnOneInput,
    ) -> Result<OneOnOne, ClientError> {
        input.validate()?;
        self.send_json(Method::POST, "/one-on-ones", input).await
    }

    pub async fn update_one_on_one(
        &self,
        id: &EntityId,
        input: &UpdateOneOnOneInput,
    ) -> Result<OneOnOne, ClientError> {
        input.validate()?;
        self.send_json(Method::PATCH, &format!("/one-on-ones/{}", id), input)
            .await
    }

    pub async fn delete_one_on_one(&self, id: &EntityId) -> Result<(), ClientError> {
        self.delete(&format!("/one-on-ones/{}", id)).await
    }

    // ============================================================
    // PDI logs
    // ============================================================

    pub async fn list_pdi_logs(
        &self,
        employee_id: Option<&EntityId>,
    ) -> Result<Vec<PdiLog>, ClientError> {
        self.get_with("/pdi", &EmployeeQuery::employee(employee_id))
            .await
    }

    pub async fn create_pdi_log(&self, input: &CreatePdiLogInput) -> Result<PdiLog, ClientError> {
        input.validate()?;
        self.send_json(Method::POST, "/pdi", input).await
    }

    pub async fn update_pdi_log(
        &self,
        id: &EntityId,
        input: &UpdatePdiLogInput,
    ) -> Result<PdiLog, ClientError> {
        input.validate()?;
        self.send_json(Method::PATCH, &format!("/pdi/{}", id), input)
            .await
    }

    pub async fn delete_pdi_log(&self, id: &EntityId) -> Result<(), ClientError> {
        self.delete(&format!("/pdi/{}", id)).await
    }

    // ============================================================
    // Salary history & notes
    // ============================================================

    pub async fn list_salary_history(
        &self,
        employee_id: &EntityId,
    ) -> Result<Vec<SalaryRecord>, ClientError> {
        self.get(&format!("/employees/{}/salary-history", employee_id))
            .await
    }

    pub async fn create_salary_record(
        &self,
        employee_id: &EntityId,
        input: &CreateSalaryRecordInput,
    ) -> Result<SalaryRecord, ClientError> {
        let path = format!("/employees/{}/salary-history", employee_id);
        self.send_json(Method::POST, &path, input).await
    }

    pub async fn list_notes(&self, employee_id: &EntityId) -> Result<Vec<EmployeeNote>, ClientError> {
        self.get(&format!("/employees/{}/notes", employee_id)).await
    }

    pub async fn create_note(
        &self,
        employee_id: &EntityId,
        input: &CreateNoteInput,
    ) -> Result<EmployeeNote, ClientError> {
        if input.note.trim().is_empty() {
            return Err(ValidationError::Missing("note").into());
        }
        let path = format!("/employees/{}/notes", employee_id);
        self.send_json(Method::POST, &path, input).await
    }

    pub async fn delete_note(
        &self,
        employee_id: &EntityId,
        note_id: &EntityId,
    ) -> Result<(), ClientError> {
        self.delete(&format!("/employees/{}/notes/{}", employee_id, note_id))
            .await
    }

    // ============================================================
    // Stored alerts (inbox)
    // ============================================================

    pub async fn list_alerts(&self, unread_only: bool) -> Result<Vec<StoredAlert>, ClientError> {
        if unread_only {
            self.get_enveloped_with("/alerts", &[("is_read", false)])
                .await
        } else {
            self.get_enveloped("/alerts").await
        }
    }

    pub async fn alert_summary(&self) -> Result<AlertSummary, ClientError> {
        self.get_enveloped("/alerts/summary").await
    }

    pub async fn mark_alert_read(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .request(Method::PATCH, &format!("/alerts/{}/read", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub async fn mark_all_alerts_read(&self) -> Result<(), ClientError> {
        let response = self
            .request(Method::PATCH, "/alerts/read-all")
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub async fn delete_alert(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/alerts/{}", id)).await
    }

    // ============================================================
    // Dashboard snapshot
    // ============================================================

    /// Fetch everything the alert engine reads, concurrently. The first
    /// failure fails the whole snapshot; a missing evaluations route does not
    /// count as a failure.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, ClientError> {
        let (employees, evaluations, pdis, one_on_ones) = tokio::try_join!(
            self.list_employee_snapshots(),
            self.list_evaluations(),
            self.list_pdi_logs(None),
            self.list_one_on_ones(None),
        )?;
        tracing::debug!(
            "Fetched snapshot: {} employees, {} evaluations, {} PDIs, {} 1:1s",
            employees.len(),
            evaluations.len(),
            pdis.len(),
            one_on_ones.len()
        );
        Ok(Snapshot {
            employees,
            evaluations,
            pdis,
            one_on_ones,
        })
    }
}
