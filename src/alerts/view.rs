use serde::Serialize;

use crate::models::{Alert, AlertCategory, Priority};

/// Priority and category filter from the dashboard's filter bar.
/// `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub priority: Option<Priority>,
    pub category: Option<AlertCategory>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.priority.map_or(true, |p| alert.priority == p)
            && self.category.map_or(true, |c| alert.category == c)
    }

    /// Alerts passing the filter, in their original order.
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Distinct categories present in `alerts`, in first-seen order.
pub fn categories(alerts: &[Alert]) -> Vec<AlertCategory> {
    let mut seen = Vec::new();
    for alert in alerts {
        if !seen.contains(&alert.category) {
            seen.push(alert.category);
        }
    }
    seen
}

/// Per-priority totals for the summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl AlertCounts {
    pub fn tally<'a>(alerts: impl IntoIterator<Item = &'a Alert>) -> Self {
        let mut counts = Self::default();
        for alert in alerts {
            match alert.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
