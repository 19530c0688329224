//! # site-core
//!
//! Core types, ID helpers, and error types for sitelog.
//!
//! This crate provides the foundational types shared across all sitelog crates:
//! - The `Issue` entity and its user-entered `IssueDraft`
//! - The `IssueStatus` enum with storage and display forms
//! - The authenticated `Identity` passed between crates
//! - ID prefix constants and format checks
//! - Cross-cutting error types
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
