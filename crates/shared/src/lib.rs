//! Shared types and configuration for the LP ledger.
//!
//! This crate provides common types used across all other crates:
//! - Opaque addresses for accounts and callers
//! - Non-negative arbitrary-precision amounts
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Address, Amount};
