//! Persistence layer for the Member Manager backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the member collection behind
//!   the roster loader's store seam

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
