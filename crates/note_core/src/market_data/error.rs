//! Market data error types.

use crate::types::{Date, DateError};
use thiserror::Error;

/// Errors raised while turning raw asset records into a [`PriceSeries`].
///
/// [`PriceSeries`]: super::PriceSeries
///
/// # Examples
///
/// ```
/// use note_core::market_data::MarketDataError;
/// use note_core::types::Date;
///
/// let err = MarketDataError::NonFiniteValue {
///     date: Date::from_ymd(2024, 1, 2).unwrap(),
///     value: f64::NAN,
/// };
/// assert!(format!("{}", err).contains("2024-01-02"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// A record's date could not be parsed.
    #[error("Invalid date in asset record {index}: {source}")]
    InvalidDate {
        /// Position of the record in the input
        index: usize,
        /// Underlying parse failure
        #[source]
        source: DateError,
    },

    /// A record carries a NaN or infinite price.
    #[error("Non-finite asset value {value} on {date}")]
    NonFiniteValue {
        /// Date of the offending record
        date: Date,
        /// The offending value
        value: f64,
    },
}
