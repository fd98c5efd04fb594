//! Income barrier and final maturity events.
//!
//! Events carry only their schedule; evaluation state lives beside them in
//! the owning [`EventSequence`] and is replaced whole on every pass.
//!
//! [`EventSequence`]: super::EventSequence

use note_core::market_data::NormalizedSeries;
use note_core::types::{Currency, Date};

use super::memory::MemoryLedger;
use super::payoff::PayoffRange;
use super::spec::IncomeBarrierEventSpec;
use super::terms::ProductTerms;

/// Formats a ratio as a percentage, e.g. `0.05` → `5.00%`.
///
/// # Examples
/// ```
/// use note_models::instruments::format_percent;
///
/// assert_eq!(format_percent(0.05, 2), "5.00%");
/// assert_eq!(format_percent(1.5, 0), "150%");
/// ```
pub fn format_percent(ratio: f64, precision: usize) -> String {
    format!("{:.*}%", precision, ratio * 100.0)
}

/// What an observation found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Date of the price used (may precede the planned date).
    pub observed_date: Date,
    /// Asset level on `observed_date`.
    pub observed_level: f64,
    /// Whether the event paid.
    pub executed: bool,
    /// Payoff from the event's own schedule.
    pub base_payoff: f64,
    /// Memory recovered from earlier missed events.
    pub recovered_memory: f64,
    /// Memory this event stores for a later event (only when missed).
    pub stored_memory: f64,
    /// Total payoff: `base_payoff + recovered_memory`.
    pub payoff: f64,
}

/// Lifecycle of an event.
///
/// `Planned` until the first evaluation pass, then `Future` while the
/// asset data does not reach the observation date, then `Observed`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EventState {
    /// Not evaluated yet.
    #[default]
    Planned,
    /// Asset data absent or not covering the observation date.
    Future,
    /// Observation done.
    Observed(Observation),
}

impl EventState {
    /// Returns the observation, if any.
    #[inline]
    pub fn observation(&self) -> Option<&Observation> {
        match self {
            EventState::Observed(observation) => Some(observation),
            EventState::Planned | EventState::Future => None,
        }
    }

    /// Returns whether the event has been observed.
    #[inline]
    pub fn is_observed(&self) -> bool {
        matches!(self, EventState::Observed(_))
    }

    /// Returns whether the event was observed and paid.
    #[inline]
    pub fn executed(&self) -> bool {
        self.observation().is_some_and(|observation| observation.executed)
    }

    /// Total payoff; zero unless observed.
    #[inline]
    pub fn payoff(&self) -> f64 {
        self.observation().map_or(0.0, |observation| observation.payoff)
    }
}

/// One scheduled income barrier observation.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeBarrierEvent {
    id: String,
    spec: IncomeBarrierEventSpec,
    predecessor: Option<usize>,
}

impl IncomeBarrierEvent {
    pub(crate) fn new(id: String, spec: IncomeBarrierEventSpec) -> Self {
        Self {
            id,
            spec,
            predecessor: None,
        }
    }

    /// Stable identifier, `income-barrier-event-<n>` by insertion order.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The event's schedule.
    #[inline]
    pub fn spec(&self) -> &IncomeBarrierEventSpec {
        &self.spec
    }

    /// Scheduled observation date.
    #[inline]
    pub fn planned_date(&self) -> Date {
        self.spec.planned_date()
    }

    /// Index of the immediately preceding event in the owning sequence.
    #[inline]
    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    pub(crate) fn set_predecessor(&mut self, predecessor: Option<usize>) {
        self.predecessor = predecessor;
    }

    /// Static payoff range table for chart shading.
    pub fn payoff_ranges(&self) -> Vec<PayoffRange> {
        self.spec.payoff_ranges()
    }

    /// Evaluates the event against normalised asset levels.
    ///
    /// `ledger` must hold the states of every event before this one in the
    /// sequence, already evaluated in this pass.
    pub fn evaluate(&self, series: &NormalizedSeries, ledger: &MemoryLedger<'_>) -> EventState {
        let Some(price) = series.resolve(self.planned_date()).available() else {
            return EventState::Future;
        };

        let outcome = self.spec.evaluate(price.value);
        let memory = self.spec.payoff_style().is_memory();
        let recovered_memory = match self.predecessor {
            Some(previous) if memory && outcome.executed => ledger.recover(previous),
            _ => 0.0,
        };
        let stored_memory = if memory && !outcome.executed {
            self.spec.memory_amount()
        } else {
            0.0
        };

        EventState::Observed(Observation {
            observed_date: price.date,
            observed_level: price.value,
            executed: outcome.executed,
            base_payoff: outcome.payoff,
            recovered_memory,
            stored_memory,
            payoff: outcome.payoff + recovered_memory,
        })
    }

    /// Human-readable status line for `state`.
    pub fn comment(&self, state: &EventState, precision: usize) -> String {
        match state.observation() {
            None => format!("Planned for {}", self.planned_date()),
            Some(observation) if !observation.executed => format!(
                "{}: Income Event {} (Not Executed)",
                observation.observed_date,
                format_percent(0.0, precision)
            ),
            Some(observation) if observation.recovered_memory != 0.0 => format!(
                "{}: Income Event {} (incl. {} memory)",
                observation.observed_date,
                format_percent(observation.payoff, precision),
                format_percent(observation.recovered_memory, precision)
            ),
            Some(observation) => format!(
                "{}: Income Event {}",
                observation.observed_date,
                format_percent(observation.payoff, precision)
            ),
        }
    }
}

/// Terminal capital-protection and participation payoff.
///
/// # Examples
/// ```
/// use note_models::instruments::maturity_payoff;
///
/// assert_eq!(maturity_payoff(1.0, 0.5, 2.0), 1.5);
/// assert_eq!(maturity_payoff(1.0, 0.5, 0.8), 1.0);
/// ```
pub fn maturity_payoff(start_level: f64, participation_rate: f64, terminal_level: f64) -> f64 {
    start_level + (terminal_level - start_level).max(0.0) * participation_rate
}

/// The final maturity event; always executes once observable.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalMaturityEvent {
    date: Date,
    start_level: f64,
    participation_rate: f64,
    notional: f64,
    currency: Currency,
}

impl FinalMaturityEvent {
    /// Identifier used in warnings and markers.
    pub const ID: &'static str = "final-maturity-event";

    /// Creates the maturity event of a product.
    pub fn from_terms(terms: &ProductTerms) -> Self {
        Self {
            date: terms.final_maturity_date(),
            start_level: terms.start_level(),
            participation_rate: terms.participation_rate(),
            notional: terms.notional(),
            currency: terms.currency(),
        }
    }

    /// Final maturity date.
    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Evaluates the maturity payoff.
    pub fn evaluate(&self, series: &NormalizedSeries) -> EventState {
        let Some(price) = series.resolve(self.date).available() else {
            return EventState::Future;
        };

        let payoff = maturity_payoff(self.start_level, self.participation_rate, price.value);
        EventState::Observed(Observation {
            observed_date: price.date,
            observed_level: price.value,
            executed: true,
            base_payoff: payoff,
            recovered_memory: 0.0,
            stored_memory: 0.0,
            payoff,
        })
    }

    /// Human-readable status line for `state`.
    pub fn comment(&self, state: &EventState, precision: usize) -> String {
        match state.observation() {
            None => format!("Product has not reached maturity ({})", self.date),
            Some(observation) => format!(
                "Return on Maturity: {} ({})",
                format_percent(observation.payoff, precision),
                self.currency.format_amount(observation.payoff * self.notional)
            ),
        }
    }
}
