//! Configuration error types.
//!
//! Every variant is fatal and raised while a product is being defined,
//! before any evaluation runs.

use note_core::types::Date;
use thiserror::Error;

/// Invalid or incomplete product definition.
///
/// # Examples
/// ```
/// use note_models::instruments::ConfigurationError;
///
/// let err = ConfigurationError::UnknownPayoffStyle("autocall".to_string());
/// assert_eq!(
///     format!("{}", err),
///     "Unknown payoff style 'autocall' (expected fixed, relativeToValue, relativeToBarrier, fixedWithMemoryFromValue or fixedWithMemoryFromPayoffLevel)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A mandatory field is absent.
    #[error("Mandatory \"{field}\"-property is missing")]
    MissingField {
        /// Path of the missing field
        field: String,
    },

    /// A mandatory key date is absent.
    #[error("Mandatory \"{name}\"-property is missing from the \"keyDates\" object")]
    MissingKeyDate {
        /// Name of the key date
        name: &'static str,
    },

    /// A date string could not be parsed.
    #[error("Invalid date for \"{field}\": {message}")]
    InvalidDate {
        /// Path of the offending field
        field: String,
        /// Parse failure description
        message: String,
    },

    /// Final maturity is not after the start date.
    #[error("Final maturity date {final_maturity_date} must be after start date {start_date}")]
    InvalidDateRange {
        /// Product start date
        start_date: Date,
        /// Product final maturity date
        final_maturity_date: Date,
    },

    /// Currency code not recognised.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Coupon schedule does not have one entry per barrier range.
    #[error("Event on {date}: {coupons} coupon payoffs given for {barriers} income barriers (expected {})", .barriers + 1)]
    CouponLengthMismatch {
        /// Planned observation date
        date: Date,
        /// Number of barrier levels
        barriers: usize,
        /// Number of coupon payoffs
        coupons: usize,
    },

    /// Barrier levels are not in ascending order.
    #[error("Event on {date}: income barriers must be ascending, got {levels:?}")]
    NonAscendingBarriers {
        /// Planned observation date
        date: Date,
        /// The offending barrier levels
        levels: Vec<f64>,
    },

    /// A numeric field is NaN or infinite.
    #[error("Non-finite value {value} for \"{field}\"")]
    NonFiniteValue {
        /// Path of the offending field
        field: String,
        /// The offending value
        value: f64,
    },

    /// Payoff style string not recognised.
    #[error("Unknown payoff style '{0}' (expected fixed, relativeToValue, relativeToBarrier, fixedWithMemoryFromValue or fixedWithMemoryFromPayoffLevel)")]
    UnknownPayoffStyle(String),

    /// `relativeToBarrier` refers to a barrier that does not exist.
    #[error("Event on {date}: barrier index {index} out of range for {barriers} income barriers")]
    BarrierIndexOutOfRange {
        /// Planned observation date
        date: Date,
        /// Requested barrier index
        index: usize,
        /// Number of barrier levels
        barriers: usize,
    },

    /// `fixedWithMemoryFromPayoffLevel` refers to a coupon that does not exist.
    #[error("Event on {date}: payoff index {index} out of range for {coupons} coupon payoffs")]
    PayoffIndexOutOfRange {
        /// Planned observation date
        date: Date,
        /// Requested coupon index
        index: usize,
        /// Number of coupon payoffs
        coupons: usize,
    },

    /// Participation rate below zero would break the capital floor.
    #[error("Participation rate must not be negative, got {0}")]
    NegativeParticipationRate(f64),

    /// Notional is negative.
    #[error("Invalid notional: N = {0}")]
    InvalidNotional(f64),

    /// An income barrier event is planned outside the product's life.
    #[error("Event on {date} is outside the product's life ({start_date} to {final_maturity_date})")]
    EventOutsideProductLife {
        /// Planned observation date
        date: Date,
        /// Product start date
        start_date: Date,
        /// Product final maturity date
        final_maturity_date: Date,
    },
}
