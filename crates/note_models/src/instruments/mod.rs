//! Note instrument definitions.
//!
//! This module provides the building blocks of a capital-protected note:
//!
//! - [`ProductTerms`]: notional, start level, participation rate and key dates
//! - [`IncomeBarrierEventSpec`]: one observation's barriers, coupons and [`PayoffStyle`]
//! - [`IncomeBarrierEventSpec::evaluate`]: the payoff rule evaluator
//! - [`MemoryLedger`]: recovery of coupons missed by memory-style events
//! - [`IncomeBarrierEvent`] / [`FinalMaturityEvent`]: scheduled observations
//! - [`EventSequence`]: date-ordered evaluation of all events
//!
//! # Error Taxonomy
//!
//! - [`ConfigurationError`]: fatal, raised while defining the product
//! - [`DataQualityWarning`]: logged, evaluation continues with a fallback
//! - Data not yet available: not an error, reported as [`EventState::Future`]

mod error;
mod event;
mod memory;
mod payoff;
mod payoff_style;
mod sequence;
mod spec;
mod terms;
mod warning;

pub use error::ConfigurationError;
pub use event::{
    format_percent, maturity_payoff, EventState, FinalMaturityEvent, IncomeBarrierEvent, Observation,
};
pub use memory::MemoryLedger;
pub use payoff::{payoff_ranges, range_index, PayoffOutcome, PayoffRange};
pub use payoff_style::PayoffStyle;
pub use sequence::{EvaluatedEvent, EventSequence};
pub use spec::IncomeBarrierEventSpec;
pub use terms::{ProductTerms, ProductTermsBuilder};
pub use warning::DataQualityWarning;
