//! Roster loading: paged, owner-scoped member retrieval with resumable
//! continuation.
//!
//! [`RosterLoader`] accumulates pages from a [`MemberStore`] into an
//! in-memory list, newest first. At most one load is in flight at a time;
//! a call arriving while one is outstanding is ignored, not queued. Fetch
//! failures degrade to "no data changed" and are only visible through the
//! retained last error and the log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::member::{MemberRecord, MemberStatus, NewMember};

/// Default roster page size.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Error type for external store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Store insert failed: {0}")]
    Insert(String),
}

/// Error type for roster operations.
#[derive(Debug, Clone, Error)]
pub enum RosterError {
    #[error("No operator is signed in")]
    Unauthenticated,

    #[error(transparent)]
    Fetch(#[from] StoreError),
}

/// Continuation marker referencing the last record of the most recently
/// fetched page. Discarded whenever a fresh load is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl PageCursor {
    pub fn from_record(record: &MemberRecord) -> Self {
        Self {
            created_at: record.created_at,
            id: record.id,
        }
    }
}

/// The external member collection: owner-scoped paged queries, newest
/// first, plus single-record insertion.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Returns up to `limit` records owned by `owner`, ordered by creation
    /// time descending, strictly after `after` when present.
    async fn list_members_page(
        &self,
        owner: Uuid,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<MemberRecord>, StoreError>;

    /// Inserts a record for `owner` and returns the generated id.
    async fn insert_member(&self, owner: Uuid, member: NewMember) -> Result<Uuid, StoreError>;
}

#[derive(Debug, Default)]
struct RosterState {
    members: Vec<MemberRecord>,
    cursor: Option<PageCursor>,
    has_more: bool,
    initialized: bool,
    last_error: Option<RosterError>,
}

/// Point-in-time view of the loader for the presentation layer.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub members: Vec<MemberRecord>,
    pub has_more: bool,
    pub last_error: Option<RosterError>,
}

/// Clears the busy flag when the owning load settles, including on early
/// return.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owner-scoped roster loader with cursor continuation.
pub struct RosterLoader {
    store: Arc<dyn MemberStore>,
    /// Explicit operator context; `None` means no operator is signed in.
    operator: Option<Uuid>,
    page_size: usize,
    busy: AtomicBool,
    state: Mutex<RosterState>,
}

impl RosterLoader {
    pub fn new(store: Arc<dyn MemberStore>, operator: Option<Uuid>, page_size: usize) -> Self {
        Self {
            store,
            operator,
            page_size,
            busy: AtomicBool::new(false),
            state: Mutex::new(RosterState::default()),
        }
    }

    pub fn with_default_page_size(store: Arc<dyn MemberStore>, operator: Option<Uuid>) -> Self {
        Self::new(store, operator, DEFAULT_PAGE_SIZE)
    }

    /// Fresh load: replaces the list with the first page and resets the
    /// cursor. Used on mount and on pull-to-refresh. Ignored while another
    /// load is in flight; whichever load started first wins, so a late
    /// response can never clobber newer state.
    pub async fn load_initial(&self) {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            return;
        };

        let Some(owner) = self.operator else {
            warn!("roster load skipped: no operator signed in");
            self.lock_state().last_error = Some(RosterError::Unauthenticated);
            return;
        };

        match self
            .store
            .list_members_page(owner, self.page_size, None)
            .await
        {
            Ok(page) => {
                let mut state = self.lock_state();
                state.cursor = page.last().map(PageCursor::from_record);
                // A full page suggests more may follow. Heuristic inherited
                // from the stored-data contract, not an exact count.
                state.has_more = page.len() == self.page_size;
                state.members = page;
                state.initialized = true;
                state.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "roster initial load failed");
                self.lock_state().last_error = Some(RosterError::Fetch(err));
            }
        }
    }

    /// Incremental load: appends the page strictly after the stored cursor.
    /// No-op when no initial load has run, when exhausted, or while another
    /// load is in flight.
    pub async fn load_more(&self) {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            return;
        };

        let Some(owner) = self.operator else {
            warn!("roster load skipped: no operator signed in");
            self.lock_state().last_error = Some(RosterError::Unauthenticated);
            return;
        };

        let after = {
            let state = self.lock_state();
            if !state.initialized || !state.has_more {
                return;
            }
            state.cursor
        };

        match self
            .store
            .list_members_page(owner, self.page_size, after)
            .await
        {
            Ok(page) => {
                let mut state = self.lock_state();
                if let Some(last) = page.last() {
                    state.cursor = Some(PageCursor::from_record(last));
                }
                state.has_more = page.len() == self.page_size;
                // Append as returned; the store owns ordering and the
                // strictly-after cursor keeps pages disjoint.
                state.members.extend(page);
                state.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "roster incremental load failed");
                self.lock_state().last_error = Some(RosterError::Fetch(err));
            }
        }
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        let state = self.lock_state();
        RosterSnapshot {
            members: state.members.clone(),
            has_more: state.has_more,
            last_error: state.last_error.clone(),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RosterState> {
        self.state.lock().expect("roster state lock poisoned")
    }
}

/// In-memory [`MemberStore`] for tests and examples.
///
/// Mirrors the external collection's ordering contract and counts calls so
/// tests can assert that a no-op really issued no query.
#[derive(Default)]
pub struct InMemoryMemberStore {
    records: Mutex<Vec<MemberRecord>>,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `count` records for `owner` with strictly increasing creation
    /// times.
    pub fn seed(&self, owner: Uuid, count: usize) {
        let base = Utc::now();
        let mut records = self.records.lock().expect("store lock poisoned");
        for i in 0..count {
            records.push(MemberRecord {
                id: Uuid::new_v4(),
                owner_id: owner,
                full_name: format!("Member {}", i + 1),
                address: "Seeded Lane".to_string(),
                contact_number: "8888888".to_string(),
                email: format!("member{}@example.com", i + 1),
                admission_date: base,
                expiry_date: Some(base + chrono::Duration::days(30)),
                status: MemberStatus::Live,
                seat_number: String::new(),
                profile_image: None,
                document: None,
                due_amount: "0.00".to_string(),
                total_amount: "1000".to_string(),
                paid_amount: "1000".to_string(),
                plan_id: None,
                plan: None,
                created_at: base + chrono::Duration::seconds(i as i64),
            });
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn list_members_page(
        &self,
        owner: Uuid,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<MemberRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Query("simulated read failure".to_string()));
        }

        let mut matching: Vec<MemberRecord> = self
            .records
            .lock()
            .expect("store lock poisoned")
            .iter()
            .filter(|r| r.owner_id == owner)
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let page = matching
            .into_iter()
            .filter(|r| match after {
                Some(cursor) => {
                    (r.created_at, r.id) < (cursor.created_at, cursor.id)
                }
                None => true,
            })
            .take(limit)
            .collect();
        Ok(page)
    }

    async fn insert_member(&self, owner: Uuid, member: NewMember) -> Result<Uuid, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Insert("simulated write failure".to_string()));
        }

        let id = Uuid::new_v4();
        let record = MemberRecord {
            id,
            owner_id: owner,
            full_name: member.full_name,
            address: member.address,
            contact_number: member.contact_number,
            email: member.email,
            admission_date: member.admission_date,
            expiry_date: member.expiry_date,
            status: member.status,
            seat_number: member.seat_number,
            profile_image: member.profile_image,
            document: member.document,
            due_amount: member.due_amount,
            total_amount: member.total_amount,
            paid_amount: member.paid_amount,
            plan_id: member.plan_id,
            plan: member.plan,
            created_at: Utc::now(),
        };
        self.records
            .lock()
            .expect("store lock poisoned")
            .push(record);
        Ok(id)
    }
}
