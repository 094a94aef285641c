//! Domain services for the Member Manager backend.
//!
//! Services contain business logic that operates on domain models.

pub mod classify;
pub mod intake;
pub mod roster;
pub mod stats;

pub use classify::{classify, RosterBuckets, RosterView};
pub use intake::{FieldError, IntakeError, IntakeForm};
pub use roster::{
    InMemoryMemberStore, MemberStore, PageCursor, RosterError, RosterLoader, RosterSnapshot,
    StoreError, DEFAULT_PAGE_SIZE,
};
pub use stats::{compute_dashboard, DashboardStats};
