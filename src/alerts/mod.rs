//! Alert derivation engine.
//!
//! Turns a [`Snapshot`] of fetched HR data into a prioritized list of
//! [`Alert`]s. The engine is a pure function: no I/O, no stored state, and
//! identical inputs always produce identical output. Read/dismissed state
//! belongs to the backend's stored alerts and is never consulted here.

pub mod rules;
mod view;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{records, Alert, Employee, Evaluation, OneOnOne, PdiLog};

pub use rules::{Rule, RULES};
pub use view::{categories, AlertCounts, AlertFilter};

/// Everything the dashboard fetched before computing alerts.
///
/// `pdis` and `one_on_ones` are carried for views; the current rules read
/// the per-employee `next_pdi` / `next_one_on_one` dates instead.
///
/// Decoding drops malformed rows one by one, so a single bad record never
/// empties the whole dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "records::skip_invalid")]
    pub employees: Vec<Employee>,
    #[serde(default, deserialize_with = "records::skip_invalid")]
    pub evaluations: Vec<Evaluation>,
    #[serde(default, deserialize_with = "records::skip_invalid")]
    pub pdis: Vec<PdiLog>,
    #[serde(default, deserialize_with = "records::skip_invalid")]
    pub one_on_ones: Vec<OneOnOne>,
}

/// Run every rule against `snapshot` as of `now`.
///
/// The result is sorted by priority (high first). Sorting is stable, so
/// alerts of equal priority keep rule order. When no rule fires the list is
/// exactly one all-clear alert.
pub fn derive_alerts(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = RULES.iter().flat_map(|rule| rule(snapshot, now)).collect();

    if alerts.is_empty() {
        alerts.push(rules::all_clear(now));
    }

    alerts.sort_by_key(|alert| alert.priority);

    tracing::debug!(
        "Derived {} alert(s) from {} employee(s), {} evaluation(s)",
        alerts.len(),
        snapshot.employees.len(),
        snapshot.evaluations.len()
    );

    alerts
}

/// [`derive_alerts`] against the wall clock.
pub fn derive_alerts_now(snapshot: &Snapshot) -> Vec<Alert> {
    derive_alerts(snapshot, Utc::now())
}
