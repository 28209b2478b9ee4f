use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates;

/// A derived dashboard notification.
///
/// Alerts are never stored or edited: the engine rebuilds the whole list on
/// every run. `id` is a deterministic key (e.g. `pdi-overdue-42`), so the same
/// condition yields the same id across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub category: AlertCategory,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    /// Dashboard route to act on the alert.
    pub link: Option<String>,
    pub actionable: bool,
}

/// Visual severity of an alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Error,
    Warning,
    Info,
    Success,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
        }
    }
}

/// Alert priority. Ordering is `High < Medium < Low`, which is the display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "high" | "alta" => Some(Self::High),
            "medium" | "media" | "média" => Some(Self::Medium),
            "low" | "baixa" => Some(Self::Low),
            _ => None,
        }
    }
}

/// What area of HR an alert is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Hierarchy,
    Onboarding,
    Pdi,
    OneToOne,
    Evaluation,
    Hr,
    System,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchy => "HIERARCHY",
            Self::Onboarding => "ONBOARDING",
            Self::Pdi => "PDI",
            Self::OneToOne => "ONE_TO_ONE",
            Self::Evaluation => "EVALUATION",
            Self::Hr => "HR",
            Self::System => "SYSTEM",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "HIERARCHY" => Some(Self::Hierarchy),
            "ONBOARDING" => Some(Self::Onboarding),
            "PDI" => Some(Self::Pdi),
            "ONE_TO_ONE" | "1:1" => Some(Self::OneToOne),
            "EVALUATION" => Some(Self::Evaluation),
            "HR" => Some(Self::Hr),
            "SYSTEM" => Some(Self::System),
            _ => None,
        }
    }
}

// ============================================================
// Stored alerts (backend inbox)
// ============================================================

/// Priority scale used by the backend's stored alerts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoredPriority {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

/// A persisted alert from `/alerts`. Unlike [`Alert`], these carry read state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAlert {
    pub id: i64,
    /// Backend alert type (`pdi_deadline`, `birthday`, `system`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: StoredPriority,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "dates::strict")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub action_url: Option<String>,
}

/// Counters from `/alerts/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: u64,
    pub unread: u64,
    #[serde(default)]
    pub by_priority: BTreeMap<String, u64>,
}
