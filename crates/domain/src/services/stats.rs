//! Dashboard statistics over the member roster and the finance ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::finance::{summarize, LedgerEntry};
use crate::models::member::MemberRecord;
use crate::services::classify::classify;
use shared::validation::parse_amount_or_zero;

/// The stat-card figures shown on the members dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_members: usize,
    pub live_members: usize,
    pub expired_members: usize,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub due_amount: f64,
    pub total_earning: f64,
    pub total_expense: f64,
    pub profit_loss: f64,
}

/// Computes dashboard figures from the operator's members and ledger.
///
/// Member amounts are summed with the same lenient parse the intake form
/// uses; live/expired counts come from the expiry-based classifier, not
/// the stored status field. Profit/loss is collected payments plus ledger
/// earnings, minus ledger expenses.
pub fn compute_dashboard(
    members: &[MemberRecord],
    entries: &[LedgerEntry],
    now: DateTime<Utc>,
) -> DashboardStats {
    let buckets = classify(members, now);
    let ledger = summarize(entries);

    let total_amount: f64 = members
        .iter()
        .map(|m| parse_amount_or_zero(&m.total_amount))
        .sum();
    let paid_amount: f64 = members
        .iter()
        .map(|m| parse_amount_or_zero(&m.paid_amount))
        .sum();
    let due_amount: f64 = members
        .iter()
        .map(|m| parse_amount_or_zero(&m.due_amount))
        .sum();

    DashboardStats {
        total_members: members.len(),
        live_members: buckets.live_count(),
        expired_members: buckets.expired_count(),
        total_amount,
        paid_amount,
        due_amount,
        total_earning: ledger.total_earning,
        total_expense: ledger.total_expense,
        profit_loss: paid_amount + ledger.total_earning - ledger.total_expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::EntryKind;
    use crate::models::member::MemberStatus;
    use chrono::Duration;
    use uuid::Uuid;

    fn member(total: &str, paid: &str, due: &str, live: bool, now: DateTime<Utc>) -> MemberRecord {
        MemberRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            full_name: "Stat Member".to_string(),
            address: "Somewhere".to_string(),
            contact_number: "6666666".to_string(),
            email: "s@example.com".to_string(),
            admission_date: now,
            expiry_date: Some(if live {
                now + Duration::days(10)
            } else {
                now - Duration::days(10)
            }),
            status: MemberStatus::Live,
            seat_number: String::new(),
            profile_image: None,
            document: None,
            due_amount: due.to_string(),
            total_amount: total.to_string(),
            paid_amount: paid.to_string(),
            plan_id: None,
            plan: None,
            created_at: now,
        }
    }

    fn entry(kind: EntryKind, amount: f64, now: DateTime<Utc>) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            description: "entry".to_string(),
            amount,
            kind,
            created_at: now,
        }
    }

    #[test]
    fn test_dashboard_figures() {
        let now = Utc::now();
        let members = vec![
            member("2000", "600", "1400.00", true, now),
            member("600", "600", "0.00", true, now),
            member("bad", "600", "0.00", false, now),
        ];
        let entries = vec![entry(EntryKind::Expense, 1200.0, now)];

        let stats = compute_dashboard(&members, &entries, now);
        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.live_members, 2);
        assert_eq!(stats.expired_members, 1);
        assert_eq!(stats.total_amount, 2600.0);
        assert_eq!(stats.paid_amount, 1800.0);
        assert_eq!(stats.due_amount, 1400.0);
        assert_eq!(stats.total_expense, 1200.0);
        assert_eq!(stats.profit_loss, 600.0);
    }

    #[test]
    fn test_dashboard_empty() {
        let stats = compute_dashboard(&[], &[], Utc::now());
        assert_eq!(stats.total_members, 0);
        assert_eq!(stats.profit_loss, 0.0);
    }
}
