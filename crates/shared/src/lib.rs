//! Shared utilities and common types for the Member Manager backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cursor-based pagination for roster queries
//! - Password hashing with Argon2id
//! - JWT tokens for operator sessions
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
