//! Roster view filtering: classify loaded records as live or expired.
//!
//! Pure functions over a snapshot of the loaded list; nothing here
//! re-fetches or mutates. The stored `status` field plays no part in this
//! classification — the two notions of "expired" are deliberately kept
//! independent, matching the stored data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::member::MemberRecord;

/// The view selected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RosterView {
    #[default]
    All,
    Live,
    Expired,
}

/// Classified subsets of a loaded roster.
#[derive(Debug, Clone)]
pub struct RosterBuckets {
    pub live: Vec<MemberRecord>,
    pub expired: Vec<MemberRecord>,
    pub total: usize,
}

impl RosterBuckets {
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn expired_count(&self) -> usize {
        self.expired.len()
    }

    /// Records for the selected view, in loaded order.
    pub fn view(&self, view: RosterView, all: &[MemberRecord]) -> Vec<MemberRecord> {
        match view {
            RosterView::All => all.to_vec(),
            RosterView::Live => self.live.clone(),
            RosterView::Expired => self.expired.clone(),
        }
    }
}

/// Buckets `records` by comparing each expiry date to `now`.
///
/// Live means expiry strictly after `now`; expired means expiry at or
/// before `now`. A record whose stored expiry was absent or unparseable
/// (`None`) is bucketed as expired: a lapsed-looking record is surfaced
/// for follow-up rather than dropped from both views. Every record lands
/// in exactly one bucket.
pub fn classify(records: &[MemberRecord], now: DateTime<Utc>) -> RosterBuckets {
    let mut live = Vec::new();
    let mut expired = Vec::new();

    for record in records {
        match record.expiry_date {
            Some(expiry) if expiry > now => live.push(record.clone()),
            _ => expired.push(record.clone()),
        }
    }

    RosterBuckets {
        live,
        expired,
        total: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::member::MemberStatus;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn member(expiry: Option<DateTime<Utc>>) -> MemberRecord {
        MemberRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            full_name: "Classified Member".to_string(),
            address: "Somewhere".to_string(),
            contact_number: "7777777".to_string(),
            email: "c@example.com".to_string(),
            admission_date: Utc::now(),
            expiry_date: expiry,
            status: MemberStatus::Live,
            seat_number: String::new(),
            profile_image: None,
            document: None,
            due_amount: "0.00".to_string(),
            total_amount: "1000".to_string(),
            paid_amount: "1000".to_string(),
            plan_id: None,
            plan: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_each_record_in_exactly_one_bucket() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let records = vec![
            member(Some(now + Duration::days(10))),
            member(Some(now - Duration::days(1))),
            member(Some(now + Duration::seconds(1))),
            member(Some(now - Duration::seconds(30))),
        ];

        let buckets = classify(&records, now);
        assert_eq!(buckets.live_count() + buckets.expired_count(), records.len());
        assert_eq!(buckets.total, records.len());
        assert_eq!(buckets.live_count(), 2);
        assert_eq!(buckets.expired_count(), 2);
    }

    #[test]
    fn test_expiry_equal_to_now_is_expired() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let buckets = classify(&[member(Some(now))], now);
        assert_eq!(buckets.live_count(), 0);
        assert_eq!(buckets.expired_count(), 1);
    }

    #[test]
    fn test_malformed_expiry_buckets_as_expired() {
        let now = Utc::now();
        let buckets = classify(&[member(None)], now);
        assert_eq!(buckets.live_count(), 0);
        assert_eq!(buckets.expired_count(), 1);
    }

    #[test]
    fn test_classification_ignores_stored_status() {
        let now = Utc::now();
        let mut stale = member(Some(now - Duration::days(5)));
        stale.status = MemberStatus::Live;

        let buckets = classify(&[stale], now);
        assert_eq!(buckets.expired_count(), 1);
    }

    #[test]
    fn test_view_selection() {
        let now = Utc::now();
        let records = vec![
            member(Some(now + Duration::days(1))),
            member(Some(now - Duration::days(1))),
        ];
        let buckets = classify(&records, now);

        assert_eq!(buckets.view(RosterView::All, &records).len(), 2);
        assert_eq!(buckets.view(RosterView::Live, &records).len(), 1);
        assert_eq!(buckets.view(RosterView::Expired, &records).len(), 1);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let now = Utc::now();
        let records = vec![member(Some(now + Duration::days(3))), member(None)];

        let a = classify(&records, now);
        let b = classify(&records, now);
        assert_eq!(a.live_count(), b.live_count());
        assert_eq!(a.expired_count(), b.expired_count());
    }
}
