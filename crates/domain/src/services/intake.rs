//! Member intake: field derivation and one-shot submission.
//!
//! The form keeps its derived fields consistent while the operator edits:
//! selecting a plan fixes the total amount, the due amount is always
//! `total - paid`, and the expiry date follows the admission date plus the
//! plan duration. Derived fields are only writable through their rules;
//! manual edits to them are overwritten on the next recomputation.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::member::{MemberStatus, NewMember};
use crate::models::plan::PlanRecord;
use crate::services::roster::{MemberStore, StoreError};
use shared::validation::parse_amount_or_zero;

/// A validation failure scoped to a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: "This field is required".to_string(),
        }
    }
}

/// Error type for intake submission.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("No operator is signed in")]
    Unauthenticated,

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Write(#[from] StoreError),
}

#[derive(Debug, Clone)]
struct SelectedPlan {
    id: Uuid,
    name: String,
    duration_days: i64,
}

/// Intake form state for one new member record.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    pub full_name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub seat_number: String,
    pub status: MemberStatus,
    pub profile_image: Option<String>,
    pub document: Option<String>,
    paid_amount: String,
    total_amount: String,
    due_amount: String,
    admission_date: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    plan: Option<SelectedPlan>,
}

impl IntakeForm {
    /// An empty form with both dates at `now` and status Live.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            full_name: String::new(),
            address: String::new(),
            contact_number: String::new(),
            email: String::new(),
            seat_number: String::new(),
            status: MemberStatus::Live,
            profile_image: None,
            document: None,
            paid_amount: String::new(),
            total_amount: String::new(),
            due_amount: String::new(),
            admission_date: now,
            expiry_date: now,
            plan: None,
        }
    }

    pub fn paid_amount(&self) -> &str {
        &self.paid_amount
    }

    pub fn total_amount(&self) -> &str {
        &self.total_amount
    }

    pub fn due_amount(&self) -> &str {
        &self.due_amount
    }

    pub fn admission_date(&self) -> DateTime<Utc> {
        self.admission_date
    }

    pub fn expiry_date(&self) -> DateTime<Utc> {
        self.expiry_date
    }

    pub fn selected_plan_id(&self) -> Option<Uuid> {
        self.plan.as_ref().map(|p| p.id)
    }

    /// Copies the plan's fee into the total amount (locking it), records the
    /// plan reference, and recomputes the dependent fields.
    pub fn select_plan(&mut self, plan: &PlanRecord) {
        self.total_amount = plan.amount.clone();
        self.plan = Some(SelectedPlan {
            id: plan.id,
            name: plan.name.clone(),
            duration_days: plan.duration_days(),
        });
        self.recompute_due();
        self.recompute_expiry();
    }

    /// Sets the total amount directly. Ignored once a plan is selected; the
    /// plan owns the total from then on.
    pub fn set_total_amount(&mut self, value: impl Into<String>) {
        if self.plan.is_some() {
            return;
        }
        self.total_amount = value.into();
        self.recompute_due();
    }

    pub fn set_paid_amount(&mut self, value: impl Into<String>) {
        self.paid_amount = value.into();
        self.recompute_due();
    }

    pub fn set_admission_date(&mut self, date: DateTime<Utc>) {
        self.admission_date = date;
        self.recompute_expiry();
    }

    /// Manually picks an expiry date. The next admission-date or plan change
    /// overwrites it.
    pub fn set_expiry_date(&mut self, date: DateTime<Utc>) {
        self.expiry_date = date;
    }

    /// due = total - paid; unparseable operands count as zero.
    fn recompute_due(&mut self) {
        let total = parse_amount_or_zero(&self.total_amount);
        let paid = parse_amount_or_zero(&self.paid_amount);
        self.due_amount = format!("{:.2}", total - paid);
    }

    /// expiry = admission + plan duration; skipped until a plan with a
    /// usable duration is selected.
    fn recompute_expiry(&mut self) {
        if let Some(plan) = &self.plan {
            if plan.duration_days > 0 {
                self.expiry_date = self.admission_date + Duration::days(plan.duration_days);
            }
        }
    }

    /// Field-scoped validation of the required fields. Errors block
    /// submission; entered data is never cleared.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(FieldError::required("fullName"));
        }
        if self.address.trim().is_empty() {
            errors.push(FieldError::required("address"));
        }
        if self.contact_number.trim().is_empty() {
            errors.push(FieldError::required("contactNumber"));
        }
        if self.paid_amount.trim().is_empty() {
            errors.push(FieldError::required("paidAmount"));
        }
        if self.plan.is_none() {
            errors.push(FieldError::required("plan"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Submits the record once. Validation failures and a missing operator
    /// block the insert entirely. On success the form resets to its
    /// defaults; on a write failure every field keeps its entered value so
    /// the operator can retry.
    pub async fn submit(
        &mut self,
        store: &dyn MemberStore,
        operator: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Uuid, IntakeError> {
        self.validate().map_err(IntakeError::Validation)?;
        let owner = operator.ok_or(IntakeError::Unauthenticated)?;

        let record = NewMember {
            full_name: self.full_name.clone(),
            address: self.address.clone(),
            contact_number: self.contact_number.clone(),
            email: self.email.clone(),
            admission_date: self.admission_date,
            expiry_date: Some(self.expiry_date),
            status: self.status,
            seat_number: self.seat_number.clone(),
            profile_image: self.profile_image.clone(),
            document: self.document.clone(),
            due_amount: self.due_amount.clone(),
            total_amount: self.total_amount.clone(),
            paid_amount: self.paid_amount.clone(),
            plan_id: self.plan.as_ref().map(|p| p.id),
            plan: self.plan.as_ref().map(|p| p.name.clone()),
        };

        let id = store.insert_member(owner, record).await?;
        info!(member_id = %id, "member record created");
        self.reset(now);
        Ok(id)
    }

    /// Returns every field to its default: text cleared, dates at `now`,
    /// status Live, no plan selected.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::roster::InMemoryMemberStore;
    use chrono::TimeZone;

    fn plan(duration: &str, amount: &str) -> PlanRecord {
        PlanRecord {
            id: Uuid::new_v4(),
            name: "g1 monthly".to_string(),
            description: None,
            duration: duration.to_string(),
            amount: amount.to_string(),
            created_at: Utc::now(),
        }
    }

    fn filled_form(now: DateTime<Utc>) -> IntakeForm {
        let mut form = IntakeForm::new(now);
        form.full_name = "Manish Rajoriya".to_string();
        form.address = "MG Road 12".to_string();
        form.contact_number = "8888888".to_string();
        form.email = "manish@example.com".to_string();
        form.select_plan(&plan("30", "1000"));
        form.set_paid_amount("400");
        form
    }

    #[test]
    fn test_due_recomputes_from_operands() {
        let mut form = IntakeForm::new(Utc::now());
        form.set_total_amount("1000");
        form.set_paid_amount("400");
        assert_eq!(form.due_amount(), "600.00");
    }

    #[test]
    fn test_non_numeric_paid_counts_as_zero() {
        let mut form = IntakeForm::new(Utc::now());
        form.set_total_amount("1000");
        form.set_paid_amount("abc");
        assert_eq!(form.due_amount(), "1000.00");
    }

    #[test]
    fn test_plan_selection_sets_and_locks_total() {
        let mut form = IntakeForm::new(Utc::now());
        form.select_plan(&plan("30", "2000"));
        assert_eq!(form.total_amount(), "2000");
        assert_eq!(form.due_amount(), "2000.00");

        // The plan owns the total now; direct edits are ignored.
        form.set_total_amount("9999");
        assert_eq!(form.total_amount(), "2000");
    }

    #[test]
    fn test_expiry_follows_admission_plus_duration() {
        let mut form = IntakeForm::new(Utc::now());
        form.select_plan(&plan("30", "2000"));
        form.set_admission_date(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            form.expiry_date(),
            Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_manual_expiry_overwritten_by_recompute() {
        let mut form = IntakeForm::new(Utc::now());
        form.select_plan(&plan("30", "2000"));
        form.set_expiry_date(Utc.with_ymd_and_hms(2030, 12, 31, 0, 0, 0).unwrap());
        form.set_admission_date(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            form.expiry_date(),
            Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_plan_without_usable_duration_leaves_expiry() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut form = IntakeForm::new(now);
        form.select_plan(&plan("forever", "2000"));
        assert_eq!(form.expiry_date(), now);
    }

    #[tokio::test]
    async fn test_missing_required_field_blocks_insert() {
        let store = InMemoryMemberStore::new();
        let now = Utc::now();
        let mut form = filled_form(now);
        form.full_name.clear();

        let result = form.submit(&store, Some(Uuid::new_v4()), now).await;

        assert_eq!(store.insert_calls(), 0);
        match result {
            Err(IntakeError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "fullName");
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
        // Entered data survives the failed attempt.
        assert_eq!(form.address, "MG Road 12");
        assert_eq!(form.paid_amount(), "400");
    }

    #[tokio::test]
    async fn test_no_plan_is_a_field_error() {
        let store = InMemoryMemberStore::new();
        let now = Utc::now();
        let mut form = IntakeForm::new(now);
        form.full_name = "A".to_string();
        form.address = "B".to_string();
        form.contact_number = "7777777".to_string();
        form.set_paid_amount("0");

        let result = form.submit(&store, Some(Uuid::new_v4()), now).await;
        match result {
            Err(IntakeError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.field == "plan"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_blocks_insert() {
        let store = InMemoryMemberStore::new();
        let now = Utc::now();
        let mut form = filled_form(now);

        let result = form.submit(&store, None, now).await;
        assert!(matches!(result, Err(IntakeError::Unauthenticated)));
        assert_eq!(store.insert_calls(), 0);
        assert_eq!(form.full_name, "Manish Rajoriya");
    }

    #[tokio::test]
    async fn test_successful_submit_resets_to_defaults() {
        let store = InMemoryMemberStore::new();
        let owner = Uuid::new_v4();
        let submitted_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mut form = filled_form(Utc::now());

        form.submit(&store, Some(owner), submitted_at).await.unwrap();

        assert_eq!(store.insert_calls(), 1);
        assert!(form.full_name.is_empty());
        assert!(form.address.is_empty());
        assert!(form.contact_number.is_empty());
        assert!(form.paid_amount().is_empty());
        assert!(form.total_amount().is_empty());
        assert!(form.due_amount().is_empty());
        assert_eq!(form.status, MemberStatus::Live);
        assert_eq!(form.admission_date(), submitted_at);
        assert_eq!(form.expiry_date(), submitted_at);
        assert!(form.selected_plan_id().is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_every_field() {
        let store = InMemoryMemberStore::new();
        store.set_fail_writes(true);
        let now = Utc::now();
        let mut form = filled_form(now);
        let before = form.clone();

        let result = form.submit(&store, Some(Uuid::new_v4()), now).await;

        assert!(matches!(result, Err(IntakeError::Write(_))));
        assert_eq!(store.insert_calls(), 1);
        assert_eq!(form.full_name, before.full_name);
        assert_eq!(form.address, before.address);
        assert_eq!(form.contact_number, before.contact_number);
        assert_eq!(form.paid_amount(), before.paid_amount());
        assert_eq!(form.total_amount(), before.total_amount());
        assert_eq!(form.due_amount(), before.due_amount());
        assert_eq!(form.admission_date(), before.admission_date());
        assert_eq!(form.expiry_date(), before.expiry_date());
        assert_eq!(form.selected_plan_id(), before.selected_plan_id());
    }

    #[tokio::test]
    async fn test_submitted_record_carries_derived_fields() {
        let store = InMemoryMemberStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let mut form = filled_form(now);
        let plan_id = form.selected_plan_id().unwrap();

        form.submit(&store, Some(owner), now).await.unwrap();

        let page = store
            .list_members_page(owner, 10, None)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        let record = &page[0];
        assert_eq!(record.due_amount, "600.00");
        assert_eq!(record.total_amount, "1000");
        assert_eq!(record.paid_amount, "400");
        assert_eq!(record.plan_id, Some(plan_id));
        assert_eq!(record.plan.as_deref(), Some("g1 monthly"));
    }
}
