//! The individual alert rules.
//!
//! Every rule is a pure `fn(&Snapshot, now) -> Vec<Alert>`. Rules never look
//! at each other's output; the engine concatenates and sorts.

use chrono::{DateTime, Duration, Utc};

use super::Snapshot;
use crate::models::{
    Alert, AlertCategory, AlertKind, Employee, EmployeeStatus, EvaluationStatus, Priority,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Window, in days, for "due soon" PDIs and one-on-ones.
pub const DUE_SOON_DAYS: i64 = 7;
/// Days after hire during which an employee counts as a recent hire.
pub const RECENT_HIRE_DAYS: i64 = 7;
/// Length of the probation period.
pub const PROBATION_DAYS: i64 = 90;
/// How far ahead of the probation end the reminder fires.
pub const PROBATION_NOTICE_DAYS: i64 = 15;

/// Signature shared by all rules.
pub type Rule = fn(&Snapshot, DateTime<Utc>) -> Vec<Alert>;

/// All rules in emission order. The order only matters for ties after
/// sorting by priority.
pub const RULES: &[Rule] = &[
    missing_manager,
    recent_hires,
    pdi_deadlines,
    one_on_one_deadlines,
    pending_evaluations,
    missing_pdi,
    on_vacation,
    on_leave,
    probation_ending,
];

// ============================================================
// Date helpers
// ============================================================

/// Whole days in `d`, rounded up (`1.2` days is 2, `-1.2` days is -1).
pub(crate) fn ceil_days(d: Duration) -> i64 {
    let ms = d.num_milliseconds();
    ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) > 0)
}

/// Whole days in `d`, rounded down.
pub(crate) fn floor_days(d: Duration) -> i64 {
    d.num_milliseconds().div_euclid(DAY_MS)
}

/// Where a target date sits relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deadline {
    /// In `(now, now + 7 days]`, with whole days remaining.
    DueSoon(i64),
    /// Strictly before `now`, with whole days overdue.
    Overdue(i64),
}

/// Classify a deadline. Returns `None` when it is exactly `now` or further
/// out than the due-soon window. A date can only land in one bucket, which is
/// what keeps the due-soon and overdue alerts for one employee exclusive.
pub(crate) fn classify_deadline(date: DateTime<Utc>, now: DateTime<Utc>) -> Option<Deadline> {
    if date < now {
        return Some(Deadline::Overdue(ceil_days(now - date)));
    }
    let horizon = now
        .checked_add_signed(Duration::days(DUE_SOON_DAYS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    if date > now && date <= horizon {
        Some(Deadline::DueSoon(ceil_days(date - now)))
    } else {
        None
    }
}

fn names<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> String {
    employees
        .into_iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================
// Rules
// ============================================================

pub fn missing_manager(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let count = snapshot
        .employees
        .iter()
        .filter(|e| e.is_active() && e.manager_id.is_none())
        .count();
    if count == 0 {
        return vec![];
    }

    vec![Alert {
        id: "missing-manager".to_string(),
        kind: AlertKind::Warning,
        category: AlertCategory::Hierarchy,
        title: format!("{} employee(s) without a manager", count),
        message: format!(
            "There are {} active employees with no manager assigned. This can block evaluations and 1:1s.",
            count
        ),
        priority: Priority::High,
        timestamp: now,
        link: Some("/dashboard/employees".to_string()),
        actionable: true,
    }]
}

pub fn recent_hires(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let hires: Vec<&Employee> = snapshot
        .employees
        .iter()
        .filter(|e| e.is_active())
        .filter(|e| {
            e.hire_date
                .map(|hired| (0..=RECENT_HIRE_DAYS).contains(&floor_days(now - hired)))
                .unwrap_or(false)
        })
        .collect();
    if hires.is_empty() {
        return vec![];
    }

    vec![Alert {
        id: "recent-hires".to_string(),
        kind: AlertKind::Info,
        category: AlertCategory::Onboarding,
        title: format!("{} new employee(s)", hires.len()),
        message: format!(
            "{} started recently. Schedule a welcome 1:1!",
            names(hires.iter().copied())
        ),
        priority: Priority::Medium,
        timestamp: now,
        link: Some("/dashboard/one-on-ones".to_string()),
        actionable: true,
    }]
}

pub fn pdi_deadlines(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    snapshot
        .employees
        .iter()
        .filter_map(|e| {
            let deadline = classify_deadline(e.next_pdi?, now)?;
            let link = Some(format!("/dashboard/pdi?employee={}", e.id));
            Some(match deadline {
                Deadline::DueSoon(days) => Alert {
                    id: format!("pdi-due-{}", e.id),
                    kind: AlertKind::Warning,
                    category: AlertCategory::Pdi,
                    title: format!("{}'s PDI is due soon", e.name),
                    message: format!(
                        "The PDI is due in {} days. Review actions and progress.",
                        days
                    ),
                    priority: Priority::Medium,
                    timestamp: now,
                    link,
                    actionable: true,
                },
                Deadline::Overdue(days) => Alert {
                    id: format!("pdi-overdue-{}", e.id),
                    kind: AlertKind::Error,
                    category: AlertCategory::Pdi,
                    title: format!("{}'s PDI is overdue", e.name),
                    message: format!("The PDI has been overdue for {} days. Update it now!", days),
                    priority: Priority::High,
                    timestamp: now,
                    link,
                    actionable: true,
                },
            })
        })
        .collect()
}

pub fn one_on_one_deadlines(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    snapshot
        .employees
        .iter()
        .filter_map(|e| {
            let date = e.next_one_on_one?;
            let deadline = classify_deadline(date, now)?;
            let day = date.format("%d/%m/%Y");
            Some(match deadline {
                Deadline::DueSoon(days) => Alert {
                    id: format!("one-on-one-due-{}", e.id),
                    kind: AlertKind::Info,
                    category: AlertCategory::OneToOne,
                    title: format!("1:1 with {} coming up", e.name),
                    message: format!(
                        "Meeting scheduled for {} (in {} days). Prepare the topics!",
                        day, days
                    ),
                    priority: Priority::Medium,
                    timestamp: now,
                    link: Some("/dashboard/one-on-ones".to_string()),
                    actionable: true,
                },
                Deadline::Overdue(days) => Alert {
                    id: format!("one-on-one-overdue-{}", e.id),
                    kind: AlertKind::Warning,
                    category: AlertCategory::OneToOne,
                    title: format!("1:1 with {} is late", e.name),
                    message: format!(
                        "The meeting should have happened on {} ({} days ago). Reschedule it!",
                        day, days
                    ),
                    priority: Priority::High,
                    timestamp: now,
                    link: Some("/dashboard/one-on-ones".to_string()),
                    actionable: true,
                },
            })
        })
        .collect()
}

pub fn pending_evaluations(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let count = snapshot
        .evaluations
        .iter()
        .filter(|ev| ev.status == EvaluationStatus::Pending)
        .count();
    if count == 0 {
        return vec![];
    }

    vec![Alert {
        id: "pending-evaluations".to_string(),
        kind: AlertKind::Warning,
        category: AlertCategory::Evaluation,
        title: format!("{} pending evaluation(s)", count),
        message: "Some evaluations are waiting to be completed. Finish them to give employees feedback."
            .to_string(),
        priority: Priority::High,
        timestamp: now,
        link: Some("/dashboard/evaluations".to_string()),
        actionable: true,
    }]
}

pub fn missing_pdi(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let count = snapshot
        .employees
        .iter()
        .filter(|e| e.is_active() && e.next_pdi.is_none())
        .count();
    if count == 0 {
        return vec![];
    }

    vec![Alert {
        id: "missing-pdi".to_string(),
        kind: AlertKind::Warning,
        category: AlertCategory::Pdi,
        title: format!("{} employee(s) without a PDI", count),
        message: "Active employees need an Individual Development Plan. Create PDIs to track their growth."
            .to_string(),
        priority: Priority::Medium,
        timestamp: now,
        link: Some("/dashboard/pdi".to_string()),
        actionable: true,
    }]
}

pub fn on_vacation(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let away: Vec<&Employee> = snapshot
        .employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Vacation)
        .collect();
    if away.is_empty() {
        return vec![];
    }

    vec![Alert {
        id: "on-vacation".to_string(),
        kind: AlertKind::Info,
        category: AlertCategory::Hr,
        title: format!("{} employee(s) on vacation", away.len()),
        message: format!("{} currently on vacation.", names(away.iter().copied())),
        priority: Priority::Low,
        timestamp: now,
        link: None,
        actionable: false,
    }]
}

pub fn on_leave(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    let away: Vec<&Employee> = snapshot
        .employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Leave)
        .collect();
    if away.is_empty() {
        return vec![];
    }

    vec![Alert {
        id: "on-leave".to_string(),
        kind: AlertKind::Warning,
        category: AlertCategory::Hr,
        title: format!("{} employee(s) on leave", away.len()),
        message: format!(
            "{} on leave. Check their status and expected return.",
            names(away.iter().copied())
        ),
        priority: Priority::Medium,
        timestamp: now,
        link: Some("/dashboard/employees".to_string()),
        actionable: true,
    }]
}

pub fn probation_ending(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Alert> {
    snapshot
        .employees
        .iter()
        .filter(|e| e.is_active())
        .filter_map(|e| {
            // Hire dates near the end of the calendar have no probation end.
            let end = e.hire_date?.checked_add_signed(Duration::days(PROBATION_DAYS))?;
            let days_left = ceil_days(end - now);
            if days_left <= 0 || days_left > PROBATION_NOTICE_DAYS {
                return None;
            }
            Some(Alert {
                id: format!("probation-ending-{}", e.id),
                kind: AlertKind::Warning,
                category: AlertCategory::Evaluation,
                title: format!("{}'s probation period is ending", e.name),
                message: format!(
                    "{} days left in the probation period. Run the evaluation and decide on the permanent hire.",
                    days_left
                ),
                priority: Priority::High,
                timestamp: now,
                link: Some("/dashboard/evaluations".to_string()),
                actionable: true,
            })
        })
        .collect()
}

/// Emitted only when every other rule came back empty.
pub fn all_clear(now: DateTime<Utc>) -> Alert {
    Alert {
        id: "all-clear".to_string(),
        kind: AlertKind::Success,
        category: AlertCategory::System,
        title: "Everything is running smoothly!".to_string(),
        message: "No pending items or alerts right now. Keep up the good work!".to_string(),
        priority: Priority::Low,
        timestamp: now,
        link: None,
        actionable: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, Evaluation};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn employee(id: i64, name: &str, status: EmployeeStatus) -> Employee {
        Employee {
            id: EntityId::Number(id),
            name: name.to_string(),
            status,
            hire_date: Some(now() - Duration::days(400)),
            manager_id: Some(EntityId::Number(1)),
            next_pdi: Some(now() + Duration::days(60)),
            next_one_on_one: None,
        }
    }

    fn snapshot(employees: Vec<Employee>) -> Snapshot {
        Snapshot {
            employees,
            ..Default::default()
        }
    }

    #[test]
    fn ceil_and_floor_days() {
        assert_eq!(ceil_days(Duration::days(3)), 3);
        assert_eq!(ceil_days(Duration::hours(49)), 3);
        assert_eq!(ceil_days(Duration::hours(-36)), -1);
        assert_eq!(ceil_days(Duration::zero()), 0);
        assert_eq!(floor_days(Duration::hours(47)), 1);
        assert_eq!(floor_days(Duration::hours(-1)), -1);
    }

    #[test]
    fn classify_deadline_buckets() {
        let n = now();
        assert_eq!(classify_deadline(n, n), None);
        assert_eq!(classify_deadline(n + Duration::days(7), n), Some(Deadline::DueSoon(7)));
        assert_eq!(classify_deadline(n + Duration::days(8), n), None);
        assert_eq!(classify_deadline(n - Duration::hours(1), n), Some(Deadline::Overdue(1)));
        assert_eq!(classify_deadline(n - Duration::days(3), n), Some(Deadline::Overdue(3)));
    }

    #[test]
    fn missing_manager_counts_only_active() {
        let mut a = employee(2, "Ana", EmployeeStatus::Active);
        a.manager_id = None;
        let mut b = employee(3, "Bia", EmployeeStatus::Leave);
        b.manager_id = None;

        let alerts = missing_manager(&snapshot(vec![a, b]), now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "1 employee(s) without a manager");
        assert_eq!(alerts[0].priority, Priority::High);
    }

    #[test]
    fn recent_hires_window_is_inclusive() {
        let mut today = employee(2, "Ana", EmployeeStatus::Active);
        today.hire_date = Some(now());
        let mut week = employee(3, "Bia", EmployeeStatus::Active);
        week.hire_date = Some(now() - Duration::days(7));
        let mut old = employee(4, "Caio", EmployeeStatus::Active);
        old.hire_date = Some(now() - Duration::days(8));
        let mut future = employee(5, "Duda", EmployeeStatus::Active);
        future.hire_date = Some(now() + Duration::days(2));

        let alerts = recent_hires(&snapshot(vec![today, week, old, future]), now());
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.starts_with("Ana, Bia started"));
    }

    #[test]
    fn one_on_one_overdue_mentions_date() {
        let mut e = employee(2, "Ana", EmployeeStatus::Active);
        e.next_one_on_one = Some(now() - Duration::days(2));

        let alerts = one_on_one_deadlines(&snapshot(vec![e]), now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "one-on-one-overdue-2");
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert!(alerts[0].message.contains("13/06/2024"));
    }

    #[test]
    fn pending_evaluations_ignores_completed() {
        let s = Snapshot {
            evaluations: vec![
                Evaluation {
                    id: EntityId::Number(1),
                    employee_id: None,
                    status: EvaluationStatus::Complete,
                },
                Evaluation {
                    id: EntityId::Number(2),
                    employee_id: None,
                    status: EvaluationStatus::Pending,
                },
            ],
            ..Default::default()
        };
        let alerts = pending_evaluations(&s, now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "1 pending evaluation(s)");
    }

    #[test]
    fn vacation_alert_is_not_actionable() {
        let alerts = on_vacation(
            &snapshot(vec![employee(2, "Ana", EmployeeStatus::Vacation)]),
            now(),
        );
        assert_eq!(alerts.len(), 1);
        assert!(!alerts[0].actionable);
        assert!(alerts[0].link.is_none());
        assert_eq!(alerts[0].priority, Priority::Low);
    }

    #[test]
    fn probation_reminder_window() {
        let mut closing = employee(2, "Ana", EmployeeStatus::Active);
        closing.hire_date = Some(now() - Duration::days(80));
        let mut early = employee(3, "Bia", EmployeeStatus::Active);
        early.hire_date = Some(now() - Duration::days(60));
        let mut last_day = employee(4, "Caio", EmployeeStatus::Active);
        last_day.hire_date = Some(now() - Duration::days(90));

        let alerts = probation_ending(&snapshot(vec![closing, early, last_day]), now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "probation-ending-2");
        assert!(alerts[0].message.starts_with("10 days left"));
    }

    #[test]
    fn probation_notice_starts_fifteen_days_out() {
        let mut fifteen_left = employee(2, "Ana", EmployeeStatus::Active);
        fifteen_left.hire_date = Some(now() - Duration::days(75));
        let mut sixteen_left = employee(3, "Bia", EmployeeStatus::Active);
        sixteen_left.hire_date = Some(now() - Duration::days(74));

        let alerts = probation_ending(&snapshot(vec![fifteen_left, sixteen_left]), now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "probation-ending-2");
        assert!(alerts[0].message.starts_with("15 days left"));
    }

    #[test]
    fn away_employees_skip_onboarding_rules() {
        let mut statuses = vec![];
        for (id, status) in [(2, EmployeeStatus::Vacation), (3, EmployeeStatus::Leave)] {
            let mut new_hire = employee(id, "Ana", status);
            new_hire.hire_date = Some(now() - Duration::days(2));
            statuses.push(new_hire);
            let mut probation = employee(id + 10, "Bia", status);
            probation.hire_date = Some(now() - Duration::days(80));
            statuses.push(probation);
        }
        let s = snapshot(statuses);

        assert!(recent_hires(&s, now()).is_empty());
        assert!(probation_ending(&s, now()).is_empty());
    }

    #[test]
    fn far_future_dates_do_not_overflow() {
        let mut e = employee(2, "Ana", EmployeeStatus::Active);
        e.hire_date = Some(DateTime::<Utc>::MAX_UTC);
        e.next_pdi = Some(DateTime::<Utc>::MAX_UTC);
        e.next_one_on_one = Some(DateTime::<Utc>::MAX_UTC);
        let s = snapshot(vec![e]);

        assert!(probation_ending(&s, now()).is_empty());
        assert!(pdi_deadlines(&s, now()).is_empty());
        assert!(recent_hires(&s, now()).is_empty());

        let late_now = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        assert_eq!(
            classify_deadline(DateTime::<Utc>::MAX_UTC, late_now),
            Some(Deadline::DueSoon(1))
        );
    }

    #[test]
    fn missing_dates_never_fire_date_rules() {
        let mut e = employee(2, "Ana", EmployeeStatus::Active);
        e.hire_date = None;
        e.next_pdi = None;
        e.next_one_on_one = None;
        let s = snapshot(vec![e]);

        assert!(recent_hires(&s, now()).is_empty());
        assert!(pdi_deadlines(&s, now()).is_empty());
        assert!(one_on_one_deadlines(&s, now()).is_empty());
        assert!(probation_ending(&s, now()).is_empty());
    }
}
