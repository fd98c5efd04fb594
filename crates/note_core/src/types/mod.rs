//! Core time and financial types.
//!
//! This module provides:
//! - `time`: Calendar dates and maturity tenors
//! - `currency`: ISO 4217 currency codes with metadata
//! - `error`: Structured error types for date and currency parsing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`Tenor`] from `time`
//! - [`Currency`] from `currency`
//! - [`DateError`], [`CurrencyError`] from `error`

pub mod currency;
pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use currency::Currency;
pub use error::{CurrencyError, DateError};
pub use time::{Date, Tenor};
