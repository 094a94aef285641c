//! Repository implementations for database operations.

pub mod finance;
pub mod member;
pub mod operator;
pub mod plan;
pub mod seat;

pub use finance::FinanceRepository;
pub use member::MemberRepository;
pub use operator::OperatorRepository;
pub use plan::PlanRepository;
pub use seat::SeatRepository;
