//! Domain layer for the Member Manager backend.
//!
//! This crate contains:
//! - Domain models (MemberRecord, PlanRecord, SeatRecord, LedgerEntry)
//! - Business logic services (roster loading, classification, intake)
//! - Domain error types

pub mod models;
pub mod services;
