//! Shared types, errors, and configuration for Coinage.
//!
//! This crate provides the pieces every other crate consumes:
//! - The static currency catalog (`Currency` descriptors)
//! - The money error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::MoneyConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::Currency;
