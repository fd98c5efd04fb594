//! Ordered evaluation of a note's events.

use note_core::market_data::NormalizedSeries;

use super::event::{EventState, FinalMaturityEvent, IncomeBarrierEvent};
use super::memory::MemoryLedger;
use super::spec::IncomeBarrierEventSpec;
use super::warning::DataQualityWarning;

/// An income barrier event together with its current state.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatedEvent<'a> {
    /// The event.
    pub event: &'a IncomeBarrierEvent,
    /// Its state after the latest pass.
    pub state: &'a EventState,
}

impl EvaluatedEvent<'_> {
    /// Status line for the event.
    pub fn comment(&self, precision: usize) -> String {
        self.event.comment(self.state, precision)
    }
}

/// Income barrier events in ascending planned-date order, plus the final
/// maturity event.
///
/// Events and their states are kept in parallel vectors; predecessor links
/// are indices into them. Sorting happens only on [`add`](Self::add).
///
/// # Examples
/// ```
/// use note_core::market_data::{PricePoint, PriceSeries};
/// use note_core::types::Date;
/// use note_models::instruments::{EventSequence, IncomeBarrierEventSpec, PayoffStyle};
///
/// let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
/// let mut sequence = EventSequence::new();
/// sequence.add(IncomeBarrierEventSpec::new(d(2025, 1, 2), vec![1.0], vec![0.0, 0.05], PayoffStyle::Fixed).unwrap());
/// sequence.add(IncomeBarrierEventSpec::new(d(2024, 7, 1), vec![1.0], vec![0.0, 0.05], PayoffStyle::Fixed).unwrap());
///
/// // Re-ordered by date, ids keep insertion order
/// assert_eq!(sequence.events()[0].id(), "income-barrier-event-1");
///
/// let series = PriceSeries::new(vec![
///     PricePoint::new(d(2024, 1, 2), 100.0),
///     PricePoint::new(d(2024, 7, 1), 110.0),
/// ])
/// .normalize(d(2024, 1, 2), d(2026, 1, 2))
/// .unwrap();
/// let warnings = sequence.evaluate(Some(&series));
/// assert!(warnings.is_empty());
/// assert!(sequence.states()[0].executed());
/// assert!(!sequence.states()[1].is_observed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventSequence {
    events: Vec<IncomeBarrierEvent>,
    states: Vec<EventState>,
    final_maturity: Option<FinalMaturityEvent>,
    final_state: EventState,
    added: usize,
}

impl EventSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an event after every event planned on or before its date and
    /// re-links predecessors.
    pub fn add(&mut self, spec: IncomeBarrierEventSpec) -> &IncomeBarrierEvent {
        let id = format!("income-barrier-event-{}", self.added);
        self.added += 1;

        let position = self
            .events
            .partition_point(|event| event.planned_date() <= spec.planned_date());
        self.events.insert(position, IncomeBarrierEvent::new(id, spec));
        self.states.insert(position, EventState::Planned);

        for (index, event) in self.events.iter_mut().enumerate() {
            event.set_predecessor(index.checked_sub(1));
        }

        &self.events[position]
    }

    /// Sets the final maturity event, evaluated after all income events.
    pub fn append_final_maturity(&mut self, event: FinalMaturityEvent) {
        self.final_maturity = Some(event);
        self.final_state = EventState::Planned;
    }

    /// Evaluates every event in date order, replacing all previous states.
    ///
    /// Without a normalised series every event is [`EventState::Future`].
    /// Returns a warning for every observation that had to use an earlier
    /// price than its planned date.
    pub fn evaluate(&mut self, series: Option<&NormalizedSeries>) -> Vec<DataQualityWarning> {
        let mut warnings = Vec::new();
        let mut states = Vec::with_capacity(self.events.len());

        for event in &self.events {
            let state = match series {
                Some(series) => event.evaluate(series, &MemoryLedger::new(&self.events, &states)),
                None => EventState::Future,
            };
            if let Some(observation) = state.observation() {
                if observation.observed_date != event.planned_date() {
                    warnings.push(DataQualityWarning::SubstitutedObservation {
                        event: event.id().to_string(),
                        planned: event.planned_date(),
                        used: observation.observed_date,
                    });
                }
            }
            states.push(state);
        }

        let final_state = match (&self.final_maturity, series) {
            (Some(event), Some(series)) => event.evaluate(series),
            (Some(_), None) => EventState::Future,
            (None, _) => EventState::Planned,
        };
        if let (Some(event), Some(observation)) = (&self.final_maturity, final_state.observation()) {
            if observation.observed_date != event.date() {
                warnings.push(DataQualityWarning::SubstitutedObservation {
                    event: FinalMaturityEvent::ID.to_string(),
                    planned: event.date(),
                    used: observation.observed_date,
                });
            }
        }

        tracing::debug!(
            events = states.len(),
            observed = states.iter().filter(|state| state.is_observed()).count(),
            executed = states.iter().filter(|state| state.executed()).count(),
            "evaluated income barrier events"
        );

        self.states = states;
        self.final_state = final_state;
        warnings
    }

    /// Income barrier events in date order.
    #[inline]
    pub fn events(&self) -> &[IncomeBarrierEvent] {
        &self.events
    }

    /// States parallel to [`events`](Self::events).
    #[inline]
    pub fn states(&self) -> &[EventState] {
        &self.states
    }

    /// Events paired with their states.
    pub fn iter(&self) -> impl Iterator<Item = EvaluatedEvent<'_>> {
        self.events
            .iter()
            .zip(&self.states)
            .map(|(event, state)| EvaluatedEvent { event, state })
    }

    /// The final maturity event and its state.
    pub fn final_maturity(&self) -> Option<(&FinalMaturityEvent, &EventState)> {
        self.final_maturity.as_ref().map(|event| (event, &self.final_state))
    }

    /// Ledger over the current states.
    pub fn ledger(&self) -> MemoryLedger<'_> {
        MemoryLedger::new(&self.events, &self.states)
    }

    /// Memory stored by trailing missed events and not yet recovered.
    pub fn unclaimed_memory(&self) -> f64 {
        self.events
            .len()
            .checked_sub(1)
            .map_or(0.0, |last| self.ledger().recover(last))
    }

    /// Number of income barrier events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether there are no income barrier events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{PayoffStyle, ProductTerms};
    use approx::assert_relative_eq;
    use note_core::market_data::{PricePoint, PriceSeries};
    use note_core::types::{Currency, Date};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn memory_spec(year: i32, coupon: f64) -> IncomeBarrierEventSpec {
        IncomeBarrierEventSpec::new(
            date(year, 6, 28),
            vec![1.0],
            vec![0.0, coupon],
            PayoffStyle::FixedWithMemoryFromPayoffLevel { payoff_index: 1 },
        )
        .unwrap()
    }

    fn normalized(levels: &[(Date, f64)]) -> NormalizedSeries {
        let mut points = vec![PricePoint::new(date(2020, 1, 2), 100.0)];
        points.extend(levels.iter().map(|&(d, level)| PricePoint::new(d, level * 100.0)));
        PriceSeries::new(points)
            .normalize(date(2020, 1, 2), date(2030, 1, 2))
            .unwrap()
    }

    #[test]
    fn test_add_sorts_with_stable_ties() {
        let mut sequence = EventSequence::new();
        sequence.add(memory_spec(2022, 0.01));
        sequence.add(memory_spec(2021, 0.02));
        sequence.add(memory_spec(2022, 0.03));

        let ids: Vec<&str> = sequence.events().iter().map(IncomeBarrierEvent::id).collect();
        assert_eq!(
            ids,
            vec!["income-barrier-event-1", "income-barrier-event-0", "income-barrier-event-2"]
        );
        let links: Vec<Option<usize>> = sequence.events().iter().map(IncomeBarrierEvent::predecessor).collect();
        assert_eq!(links, vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn test_memory_recovered_by_next_executed_event() {
        let mut sequence = EventSequence::new();
        sequence.add(memory_spec(2021, 0.03));
        sequence.add(memory_spec(2022, 0.04));

        let series = normalized(&[(date(2021, 6, 28), 0.9), (date(2022, 6, 28), 1.1)]);
        sequence.evaluate(Some(&series));

        let first = sequence.states()[0].observation().unwrap();
        assert!(!first.executed);
        assert_eq!(first.stored_memory, 0.03);

        let second = sequence.states()[1].observation().unwrap();
        assert!(second.executed);
        assert_eq!(second.base_payoff, 0.04);
        assert_eq!(second.recovered_memory, 0.03);
        assert_relative_eq!(second.payoff, 0.07);
        assert_eq!(
            sequence.iter().nth(1).unwrap().comment(2),
            "2022-06-28: Income Event 7.00% (incl. 3.00% memory)"
        );
        assert_eq!(sequence.unclaimed_memory(), 0.0);
    }

    #[test]
    fn test_stored_value_recovered_by_next_executed_event() {
        let stored_value_spec = |year, coupon| {
            IncomeBarrierEventSpec::new(
                date(year, 6, 28),
                vec![1.0],
                vec![0.0, coupon],
                PayoffStyle::FixedWithMemoryFromValue { stored_value: 0.025 },
            )
            .unwrap()
        };
        let mut sequence = EventSequence::new();
        sequence.add(stored_value_spec(2021, 0.03));
        sequence.add(stored_value_spec(2022, 0.04));

        let series = normalized(&[(date(2021, 6, 28), 0.9), (date(2022, 6, 28), 1.1)]);
        sequence.evaluate(Some(&series));

        let first = sequence.states()[0].observation().unwrap();
        assert!(!first.executed);
        assert_relative_eq!(first.stored_memory, 0.025);

        let second = sequence.states()[1].observation().unwrap();
        assert!(second.executed);
        assert_relative_eq!(second.base_payoff, 0.04);
        assert_relative_eq!(second.recovered_memory, 0.025);
        assert_relative_eq!(second.payoff, 0.065);
        assert_eq!(sequence.unclaimed_memory(), 0.0);
    }

    #[test]
    fn test_memory_claimed_only_once() {
        let mut sequence = EventSequence::new();
        for year in 2021..=2024 {
            sequence.add(memory_spec(year, 0.03));
        }
        let series = normalized(&[
            (date(2021, 6, 28), 0.9),
            (date(2022, 6, 28), 1.1),
            (date(2023, 6, 28), 1.2),
            (date(2024, 6, 28), 0.8),
        ]);
        sequence.evaluate(Some(&series));

        let payoffs: Vec<f64> = sequence.states().iter().map(EventState::payoff).collect();
        assert_relative_eq!(payoffs[1], 0.06);
        assert_relative_eq!(payoffs[2], 0.03);
        assert_eq!(payoffs[3], 0.0);
        assert_eq!(sequence.unclaimed_memory(), 0.03);
    }

    #[test]
    fn test_non_memory_style_does_not_recover() {
        let mut sequence = EventSequence::new();
        sequence.add(memory_spec(2021, 0.03));
        sequence.add(
            IncomeBarrierEventSpec::new(date(2022, 6, 28), vec![1.0], vec![0.0, 0.04], PayoffStyle::Fixed).unwrap(),
        );
        let series = normalized(&[(date(2021, 6, 28), 0.9), (date(2022, 6, 28), 1.1)]);
        sequence.evaluate(Some(&series));
        assert_eq!(sequence.states()[1].payoff(), 0.04);
    }

    #[test]
    fn test_without_series_everything_is_future() {
        let mut sequence = EventSequence::new();
        sequence.add(memory_spec(2021, 0.03));
        let terms = ProductTerms::builder()
            .notional(1.0)
            .currency(Currency::EUR)
            .start_level(1.0)
            .start_date(date(2020, 1, 2))
            .final_maturity_date(date(2025, 1, 2))
            .build()
            .unwrap();
        sequence.append_final_maturity(FinalMaturityEvent::from_terms(&terms));

        let warnings = sequence.evaluate(None);
        assert!(warnings.is_empty());
        assert_eq!(sequence.states(), &[EventState::Future]);
        assert_eq!(sequence.final_maturity().unwrap().1, &EventState::Future);
    }

    #[test]
    fn test_substitution_warning() {
        let mut sequence = EventSequence::new();
        sequence.add(memory_spec(2021, 0.03));
        let series = normalized(&[(date(2021, 6, 25), 1.1), (date(2021, 7, 1), 1.1)]);
        let warnings = sequence.evaluate(Some(&series));
        assert_eq!(
            warnings,
            vec![DataQualityWarning::SubstitutedObservation {
                event: "income-barrier-event-0".to_string(),
                planned: date(2021, 6, 28),
                used: date(2021, 6, 25),
            }]
        );
    }

    proptest! {
        #[test]
        fn prop_memory_conservation(misses in 0usize..8, coupon in 0.001f64..0.1) {
            let mut sequence = EventSequence::new();
            let mut levels = Vec::new();
            for i in 0..=misses {
                let year = 2021 + i as i32;
                sequence.add(memory_spec(year, coupon));
                levels.push((date(year, 6, 28), if i < misses { 0.9 } else { 1.1 }));
            }
            let series = normalized(&levels);
            sequence.evaluate(Some(&series));

            let last = sequence.states()[misses].observation().unwrap();
            let stored: f64 = sequence.states()[..misses]
                .iter()
                .filter_map(EventState::observation)
                .map(|observation| observation.stored_memory)
                .sum();
            assert_relative_eq!(last.recovered_memory, stored, epsilon = 1e-12);
            assert_relative_eq!(last.recovered_memory, coupon * misses as f64, epsilon = 1e-9);
        }

        #[test]
        fn prop_evaluation_is_idempotent(levels in proptest::collection::vec(0.5f64..1.5, 1..6)) {
            let mut sequence = EventSequence::new();
            let mut points = Vec::new();
            for (i, &level) in levels.iter().enumerate() {
                let year = 2021 + i as i32;
                sequence.add(memory_spec(year, 0.02));
                points.push((date(year, 6, 28), level));
            }
            let series = normalized(&points);

            sequence.evaluate(Some(&series));
            let first = sequence.states().to_vec();
            sequence.evaluate(Some(&series));
            prop_assert_eq!(first, sequence.states().to_vec());
        }
    }
}
