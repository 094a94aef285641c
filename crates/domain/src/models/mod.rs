//! Domain models for the Member Manager backend.

pub mod finance;
pub mod member;
pub mod operator;
pub mod plan;
pub mod seat;

pub use finance::{summarize, EntryKind, FinanceSummary, LedgerEntry, NewLedgerEntry};
pub use member::{MemberRecord, MemberStatus, NewMember};
pub use operator::Operator;
pub use plan::{CreatePlanInput, PlanRecord};
pub use seat::{plan_expansion, SeatError, SeatRecord, MAX_SEATS};
