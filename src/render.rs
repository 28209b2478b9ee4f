//! Plain-text rendering for the `g360` terminal dashboard.

use crate::alerts::AlertCounts;
use crate::models::{Alert, AlertKind, EmployeeRecord, StoredAlert, StoredPriority, User};

const ERROR: char = '✗';
const WARNING: char = '▲';
const INFO: char = '•';
const SUCCESS: char = '✓';

const UNREAD: char = '●';
const READ: char = '○';

fn kind_symbol(kind: AlertKind) -> char {
    match kind {
        AlertKind::Error => ERROR,
        AlertKind::Warning => WARNING,
        AlertKind::Info => INFO,
        AlertKind::Success => SUCCESS,
    }
}

/// Render derived alerts with a summary line.
///
/// Example output:
/// ```text
/// 3 alerts (high 2, medium 1, low 0)
///
/// ✗ [HIGH] Employees without a manager
///     2 employee(s) have no manager assigned.
///     → /dashboard/employees
/// ```
pub fn render_alerts<'a>(alerts: impl IntoIterator<Item = &'a Alert>) -> String {
    let alerts: Vec<&Alert> = alerts.into_iter().collect();
    let counts = AlertCounts::tally(alerts.iter().copied());

    let mut output = format!(
        "{} alert{} (high {}, medium {}, low {})\n",
        counts.total(),
        if counts.total() == 1 { "" } else { "s" },
        counts.high,
        counts.medium,
        counts.low
    );

    for alert in alerts {
        output.push('\n');
        output.push_str(&format!(
            "{} [{}] {}\n",
            kind_symbol(alert.kind),
            alert.priority.as_str(),
            alert.title
        ));
        output.push_str(&format!("    {}\n", alert.message));
        if let Some(ref link) = alert.link {
            output.push_str(&format!("    → {}\n", link));
        }
    }
    output
}

/// One line per employee: name, role, status.
pub fn render_employees(employees: &[EmployeeRecord]) -> String {
    if employees.is_empty() {
        return "No employees.\n".to_string();
    }
    let width = employees
        .iter()
        .map(|e| e.full_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for employee in employees {
        let pad = width - employee.full_name.chars().count();
        output.push_str(&format!(
            "{}{}  {:<9} {}\n",
            employee.full_name,
            " ".repeat(pad),
            employee.status.as_str(),
            employee.role
        ));
    }
    output
}

fn stored_priority_label(priority: StoredPriority) -> &'static str {
    match priority {
        StoredPriority::Critical => "CRITICAL",
        StoredPriority::High => "HIGH",
        StoredPriority::Medium => "MEDIUM",
        StoredPriority::Low => "LOW",
        StoredPriority::Info => "INFO",
    }
}

/// The backend alert inbox, unread entries marked.
pub fn render_inbox(alerts: &[StoredAlert]) -> String {
    if alerts.is_empty() {
        return "Inbox is empty.\n".to_string();
    }
    let mut output = String::new();
    for alert in alerts {
        let mark = if alert.is_read { READ } else { UNREAD };
        output.push_str(&format!(
            "{} #{} [{}] {} ({})\n",
            mark,
            alert.id,
            stored_priority_label(alert.priority),
            alert.title,
            alert.created_at.format("%d/%m/%Y %H:%M")
        ));
        match alert.employee_name {
            Some(ref name) => output.push_str(&format!("    {}: {}\n", name, alert.message)),
            None => output.push_str(&format!("    {}\n", alert.message)),
        }
    }
    output
}

pub fn render_user(user: &User) -> String {
    format!("{} <{}> ({})\n", user.full_name, user.email, user.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertCategory, EmployeeStatus, EntityId, Priority};
    use chrono::{DateTime, Utc};

    fn alert(kind: AlertKind, priority: Priority, link: Option<&str>) -> Alert {
        Alert {
            id: "x".to_string(),
            kind,
            category: AlertCategory::Hierarchy,
            title: "Employees without a manager".to_string(),
            message: "2 employee(s) have no manager assigned.".to_string(),
            priority,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            link: link.map(str::to_string),
            actionable: true,
        }
    }

    #[test]
    fn alerts_render_with_summary_and_link() {
        let alerts = vec![alert(
            AlertKind::Error,
            Priority::High,
            Some("/dashboard/employees"),
        )];
        let output = render_alerts(&alerts);
        assert_eq!(
            output,
            "1 alert (high 1, medium 0, low 0)\n\
             \n\
             ✗ [HIGH] Employees without a manager\n\
             \x20   2 employee(s) have no manager assigned.\n\
             \x20   → /dashboard/employees\n"
        );
    }

    #[test]
    fn alert_without_link_has_no_arrow() {
        let alerts = vec![alert(AlertKind::Success, Priority::Low, None)];
        let output = render_alerts(&alerts);
        assert!(output.contains("✓ [LOW]"));
        assert!(!output.contains('→'));
    }

    #[test]
    fn empty_inbox() {
        assert_eq!(render_inbox(&[]), "Inbox is empty.\n");
    }

    #[test]
    fn inbox_marks_unread() {
        let stored = StoredAlert {
            id: 7,
            kind: "pdi_deadline".to_string(),
            priority: StoredPriority::Critical,
            title: "PDI overdue".to_string(),
            message: "Review the plan".to_string(),
            employee_name: Some("Ana".to_string()),
            is_read: false,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            action_url: None,
        };
        let output = render_inbox(&[stored]);
        assert!(output.starts_with("● #7 [CRITICAL] PDI overdue (01/01/1970 00:00)\n"));
        assert!(output.contains("    Ana: Review the plan\n"));
    }

    #[test]
    fn employees_are_aligned() {
        let record = |name: &str, status| EmployeeRecord {
            id: EntityId::Number(1),
            full_name: name.to_string(),
            cpf: "000".to_string(),
            rg: None,
            birth_date: None,
            marital_status: None,
            personal_email: None,
            work_email: "x@example.com".to_string(),
            personal_phone: None,
            work_phone: None,
            address: None,
            role: "Dev".to_string(),
            department: None,
            hire_date: None,
            salary: None,
            status,
            manager_id: None,
            team_id: None,
        };
        let output = render_employees(&[
            record("Ana", EmployeeStatus::Active),
            record("Bruno Lima", EmployeeStatus::Vacation),
        ]);
        assert_eq!(
            output,
            "Ana         ACTIVE    Dev\nBruno Lima  VACATION  Dev\n"
        );
    }
}
