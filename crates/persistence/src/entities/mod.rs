//! Entity definitions: database row mappings for domain models.

pub mod finance;
pub mod member;
pub mod operator;
pub mod plan;
pub mod seat;

pub use finance::LedgerEntryEntity;
pub use member::MemberEntity;
pub use operator::OperatorEntity;
pub use plan::PlanEntity;
pub use seat::SeatEntity;
