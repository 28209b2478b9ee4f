//! Scheduled per-employee records: day-offs, one-on-ones and PDI logs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{dates, EntityId};

/// Input rejected before it is sent to the backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} ({done}) cannot be earlier than {reference_field} ({reference})")]
    DateOrder {
        field: &'static str,
        done: NaiveDate,
        reference_field: &'static str,
        reference: NaiveDate,
    },

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is too long ({len} > {max} characters)")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

fn check_order(
    field: &'static str,
    done: Option<NaiveDate>,
    reference_field: &'static str,
    reference: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (done, reference) {
        (Some(done), Some(reference)) if done < reference => Err(ValidationError::DateOrder {
            field,
            done,
            reference_field,
            reference,
        }),
        _ => Ok(()),
    }
}

fn check_len(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field,
            len: v.chars().count(),
            max,
        }),
        _ => Ok(()),
    }
}

// ============================================================
// Day-offs
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayOffStatus {
    #[serde(rename = "AGENDADO")]
    Scheduled,
    #[serde(rename = "REALIZADO")]
    Taken,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOff {
    pub id: EntityId,
    pub employee_id: EntityId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    pub status: DayOffStatus,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDayOffInput {
    pub employee_id: EntityId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DayOffStatus>,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateDayOffInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("reason", self.reason.as_deref(), 150)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDayOffInput {
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DayOffStatus>,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateDayOffInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("reason", self.reason.as_deref(), 150)
    }
}

// ============================================================
// One-on-ones
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OneOnOneStatus {
    #[serde(rename = "AGENDADO")]
    Scheduled,
    #[serde(rename = "CONCLUIDO")]
    Done,
    #[serde(rename = "ATRASADO")]
    Late,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

/// A scheduled one-on-one meeting between an employee and their manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneOnOne {
    pub id: EntityId,
    pub employee_id: EntityId,
    #[serde(rename = "data_agendada", with = "dates::strict")]
    pub scheduled_for: DateTime<Utc>,
    #[serde(rename = "data_realizada", default, with = "dates::lenient")]
    pub held_on: Option<DateTime<Utc>>,
    pub status: OneOnOneStatus,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    /// Whether the meeting reviewed the employee's PDI.
    #[serde(rename = "pdi_alinhado", default)]
    pub pdi_aligned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOneOnOneInput {
    pub employee_id: EntityId,
    #[serde(rename = "data_agendada")]
    pub scheduled_for: NaiveDate,
    #[serde(rename = "data_realizada", skip_serializing_if = "Option::is_none")]
    pub held_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OneOnOneStatus>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "pdi_alinhado")]
    pub pdi_aligned: bool,
}

impl CreateOneOnOneInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_order(
            "held_on",
            self.held_on,
            "scheduled_for",
            Some(self.scheduled_for),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOneOnOneInput {
    #[serde(rename = "data_agendada", skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<NaiveDate>,
    #[serde(rename = "data_realizada", skip_serializing_if = "Option::is_none")]
    pub held_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OneOnOneStatus>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "pdi_alinhado", skip_serializing_if = "Option::is_none")]
    pub pdi_aligned: Option<bool>,
}

impl UpdateOneOnOneInput {
    /// Only checks ordering when both dates are part of the update.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_order("held_on", self.held_on, "scheduled_for", self.scheduled_for)
    }
}

// ============================================================
// PDI logs
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PdiStatus {
    #[serde(rename = "EM_ANDAMENTO")]
    InProgress,
    #[serde(rename = "CONCLUIDO")]
    Done,
    #[serde(rename = "ATRASADO")]
    Late,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

/// One goal of an employee's individual development plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdiLog {
    pub id: EntityId,
    pub employee_id: EntityId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    pub status: PdiStatus,
    #[serde(rename = "data_planejada", with = "dates::strict")]
    pub planned_for: DateTime<Utc>,
    #[serde(rename = "data_realizada", default, with = "dates::lenient")]
    pub done_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePdiLogInput {
    pub employee_id: EntityId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PdiStatus>,
    #[serde(rename = "data_planejada")]
    pub planned_for: NaiveDate,
    #[serde(rename = "data_realizada", skip_serializing_if = "Option::is_none")]
    pub done_on: Option<NaiveDate>,
}

impl CreatePdiLogInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Missing("title"));
        }
        check_len("title", Some(&self.title), 120)?;
        check_order("done_on", self.done_on, "planned_for", Some(self.planned_for))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePdiLogInput {
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PdiStatus>,
    #[serde(rename = "data_planejada", skip_serializing_if = "Option::is_none")]
    pub planned_for: Option<NaiveDate>,
    #[serde(rename = "data_realizada", skip_serializing_if = "Option::is_none")]
    pub done_on: Option<NaiveDate>,
}

impl UpdatePdiLogInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("title", self.title.as_deref(), 120)?;
        check_order("done_on", self.done_on, "planned_for", self.planned_for)
    }
}
