//! Shared types, errors, and configuration for the ledger entry core.
//!
//! This crate provides common types used across all other crates:
//! - Lenient amount parsing with decimal precision
//! - Typed IDs for type-safe record references
//! - Pagination types for list lookups
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
