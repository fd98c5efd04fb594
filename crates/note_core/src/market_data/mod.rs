//! Market data for note observation.
//!
//! This module provides:
//! - [`PriceSeries`]: Sparse, date-sorted raw prices of the underlying
//! - [`NormalizedSeries`]: Levels relative to the fixing on the start date
//! - [`Resolution`]: Outcome of aligning an observation date with the series
//! - [`MarketDataError`]: Errors from converting raw asset records
//!
//! # Alignment Rules
//!
//! - An observation date beyond the last known price is not yet available.
//! - Otherwise the latest price at or before the observation date is used;
//!   prices are never interpolated and never taken from a later date.
//! - The fixing is looked up on the start date exactly, without substitution.

pub mod error;
pub mod price_series;

pub use error::MarketDataError;
pub use price_series::{NormalizedSeries, PricePoint, PriceSeries, Resolution, ResolvedPrice, Unfixed};
