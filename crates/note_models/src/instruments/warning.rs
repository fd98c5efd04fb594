//! Data-quality warnings.
//!
//! Warnings are recovered locally: evaluation proceeds with the documented
//! fallback and the warning is logged and kept for the caller.

use std::fmt;

use note_core::market_data::Unfixed;
use note_core::types::Date;

/// A non-fatal problem with the input data.
#[derive(Debug, Clone, PartialEq)]
pub enum DataQualityWarning {
    /// No price on the observation date; the previous available price was used.
    SubstitutedObservation {
        /// Event identifier
        event: String,
        /// Planned observation date
        planned: Date,
        /// Date of the price used instead
        used: Date,
    },
    /// Participation rate absent; 100% assumed.
    MissingParticipationRate,
    /// No price exactly on the start date; nothing can be evaluated.
    MissingFixing {
        /// Product start date
        start_date: Date,
    },
    /// Start-date price is zero, negative or not finite; nothing can be evaluated.
    InvalidFixing {
        /// Product start date
        start_date: Date,
        /// The unusable fixing
        value: f64,
    },
}

impl DataQualityWarning {
    /// Emits the warning through `tracing`.
    pub fn emit(&self) {
        tracing::warn!("{}", self);
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::SubstitutedObservation {
                event,
                planned,
                used,
            } => write!(
                f,
                "The selected underlying is missing data for event date {} ({}), used value for previous date {}",
                planned, event, used
            ),
            DataQualityWarning::MissingParticipationRate => {
                write!(f, "Data is missing Participation Rate, assume 100%")
            }
            DataQualityWarning::MissingFixing { start_date } => write!(
                f,
                "Not possible to evaluate events since asset has no value for fixing date {}",
                start_date
            ),
            DataQualityWarning::InvalidFixing { start_date, value } => write!(
                f,
                "Not possible to evaluate events since asset value {} on fixing date {} cannot be used as fixing",
                value, start_date
            ),
        }
    }
}

impl From<Unfixed> for DataQualityWarning {
    fn from(reason: Unfixed) -> Self {
        match reason {
            Unfixed::MissingFixing { start_date } => DataQualityWarning::MissingFixing { start_date },
            Unfixed::InvalidFixing { start_date, value } => {
                DataQualityWarning::InvalidFixing { start_date, value }
            }
        }
    }
}
