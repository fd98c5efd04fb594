//! The simulation model.

use note_core::market_data::{NormalizedSeries, PriceSeries};

use crate::instruments::{
    ConfigurationError, DataQualityWarning, EvaluatedEvent, EventSequence, FinalMaturityEvent, IncomeBarrierEventSpec,
    ProductTerms,
};

/// Top-level orchestrator of one note.
///
/// Owns the product terms and the event sequence. Every call to
/// [`set_asset_data`](Self::set_asset_data) re-evaluates all events from
/// scratch; there is no incremental update.
#[derive(Debug, Clone)]
pub struct SimulationModel {
    terms: ProductTerms,
    sequence: EventSequence,
    asset: Option<NormalizedSeries>,
    construction_warnings: Vec<DataQualityWarning>,
    evaluation_warnings: Vec<DataQualityWarning>,
}

impl SimulationModel {
    /// Builds the event sequence for a product. Events may be given in any
    /// order; they are sorted by planned date.
    ///
    /// # Errors
    /// [`ConfigurationError::EventOutsideProductLife`] for an event planned
    /// before the start date or after the final maturity date.
    pub fn new<I>(terms: ProductTerms, specs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = IncomeBarrierEventSpec>,
    {
        let mut sequence = EventSequence::new();
        for spec in specs {
            let date = spec.planned_date();
            if date < terms.start_date() || date > terms.final_maturity_date() {
                return Err(ConfigurationError::EventOutsideProductLife {
                    date,
                    start_date: terms.start_date(),
                    final_maturity_date: terms.final_maturity_date(),
                });
            }
            sequence.add(spec);
        }

        let mut construction_warnings = Vec::new();
        if terms.participation_rate_assumed() {
            let warning = DataQualityWarning::MissingParticipationRate;
            warning.emit();
            construction_warnings.push(warning);
        }
        sequence.append_final_maturity(FinalMaturityEvent::from_terms(&terms));

        tracing::info!(
            start_date = %terms.start_date(),
            final_maturity_date = %terms.final_maturity_date(),
            income_events = sequence.len(),
            "built simulation model"
        );

        Ok(Self {
            terms,
            sequence,
            asset: None,
            construction_warnings,
            evaluation_warnings: Vec::new(),
        })
    }

    /// Replaces the asset data and re-evaluates every event.
    ///
    /// Without a price exactly on the start date the asset is treated as
    /// absent: every event becomes `Future` and a warning is recorded.
    pub fn set_asset_data(&mut self, series: PriceSeries) -> &mut Self {
        let mut warnings = Vec::new();
        self.asset = match series.normalize(self.terms.start_date(), self.terms.final_maturity_date()) {
            Ok(normalized) => Some(normalized),
            Err(reason) => {
                warnings.push(DataQualityWarning::from(reason));
                None
            }
        };

        warnings.extend(self.sequence.evaluate(self.asset.as_ref()));
        for warning in &warnings {
            warning.emit();
        }
        self.evaluation_warnings = warnings;
        self
    }

    /// Product terms.
    #[inline]
    pub fn terms(&self) -> &ProductTerms {
        &self.terms
    }

    /// The evaluated event sequence.
    #[inline]
    pub fn sequence(&self) -> &EventSequence {
        &self.sequence
    }

    /// Normalised asset levels, when the fixing is known.
    #[inline]
    pub fn asset_series(&self) -> Option<&NormalizedSeries> {
        self.asset.as_ref()
    }

    /// Raw asset price on the start date, when known.
    pub fn fixing(&self) -> Option<f64> {
        self.asset.as_ref().map(NormalizedSeries::fixing)
    }

    /// Asset level used for the final maturity payoff, once observable.
    pub fn maturity_level(&self) -> Option<f64> {
        self.sequence
            .final_maturity()
            .and_then(|(_, state)| state.observation())
            .map(|observation| observation.observed_level)
    }

    /// Final maturity payoff ratio, once observable.
    pub fn maturity_payoff(&self) -> Option<f64> {
        self.sequence
            .final_maturity()
            .and_then(|(_, state)| state.observation())
            .map(|observation| observation.payoff)
    }

    /// Construction warnings followed by those of the latest evaluation.
    pub fn warnings(&self) -> Vec<DataQualityWarning> {
        self.construction_warnings
            .iter()
            .chain(&self.evaluation_warnings)
            .cloned()
            .collect()
    }

    /// Income events that were observed, executed or not.
    pub fn observed_events(&self) -> Vec<EvaluatedEvent<'_>> {
        self.sequence.iter().filter(|e| e.state.is_observed()).collect()
    }

    /// Income events that were observed and paid.
    pub fn executed_events(&self) -> Vec<EvaluatedEvent<'_>> {
        self.sequence.iter().filter(|e| e.state.executed()).collect()
    }

    /// Income events not yet observed.
    pub fn pending_events(&self) -> Vec<EvaluatedEvent<'_>> {
        self.sequence.iter().filter(|e| !e.state.is_observed()).collect()
    }

    /// Sum of all income payoffs observed so far.
    pub fn total_income(&self) -> f64 {
        self.sequence.states().iter().map(|state| state.payoff()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{EventState, PayoffStyle};
    use approx::assert_relative_eq;
    use note_core::market_data::PricePoint;
    use note_core::types::{Currency, Date};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn terms() -> ProductTerms {
        ProductTerms::builder()
            .notional(10_000.0)
            .currency(Currency::SEK)
            .start_level(1.0)
            .participation_rate(0.5)
            .start_date(date(2020, 1, 2))
            .final_maturity_date(date(2022, 1, 3))
            .build()
            .unwrap()
    }

    fn fixed_coupon(planned: Date) -> IncomeBarrierEventSpec {
        IncomeBarrierEventSpec::new(planned, vec![1.0], vec![0.0, 0.05], PayoffStyle::Fixed).unwrap()
    }

    fn model() -> SimulationModel {
        let specs = [2021, 2020].map(|year| fixed_coupon(date(year, 7, 1)));
        SimulationModel::new(terms(), specs).unwrap()
    }

    fn prices(points: &[(Date, f64)]) -> PriceSeries {
        PriceSeries::new(points.iter().map(|&(d, v)| PricePoint::new(d, v)).collect())
    }

    #[test]
    fn test_new_model_is_planned() {
        let model = model();
        assert_eq!(model.sequence().len(), 2);
        assert!(model.sequence().states().iter().all(|s| *s == EventState::Planned));
        assert!(model.warnings().is_empty());
        assert_eq!(model.pending_events().len(), 2);
    }

    #[test]
    fn test_partial_history() {
        let mut model = model();
        model.set_asset_data(prices(&[(date(2020, 1, 2), 50.0), (date(2020, 7, 1), 60.0)]));

        assert_eq!(model.fixing(), Some(50.0));
        assert_eq!(model.executed_events().len(), 1);
        assert_eq!(model.pending_events().len(), 1);
        assert_eq!(model.maturity_level(), None);
        assert_relative_eq!(model.total_income(), 0.05);
    }

    #[test]
    fn test_full_history() {
        let mut model = model();
        model.set_asset_data(prices(&[
            (date(2020, 1, 2), 50.0),
            (date(2020, 7, 1), 60.0),
            (date(2021, 7, 1), 45.0),
            (date(2022, 1, 3), 75.0),
        ]));

        assert_eq!(model.observed_events().len(), 2);
        assert_eq!(model.executed_events().len(), 1);
        assert_relative_eq!(model.maturity_level().unwrap(), 1.5);
        assert_relative_eq!(model.maturity_payoff().unwrap(), 1.25);
    }

    #[test]
    fn test_missing_fixing_leaves_everything_future() {
        let mut model = model();
        model.set_asset_data(prices(&[(date(2020, 1, 3), 50.0), (date(2022, 1, 3), 75.0)]));

        assert!(model.asset_series().is_none());
        assert!(model.sequence().states().iter().all(|s| *s == EventState::Future));
        assert_eq!(model.maturity_payoff(), None);
        assert_eq!(
            model.warnings(),
            vec![DataQualityWarning::MissingFixing {
                start_date: date(2020, 1, 2)
            }]
        );
    }

    #[test]
    fn test_new_data_replaces_previous_warnings() {
        let mut model = model();
        model.set_asset_data(prices(&[(date(2020, 1, 3), 50.0)]));
        assert_eq!(model.warnings().len(), 1);

        model.set_asset_data(prices(&[(date(2020, 1, 2), 50.0)]));
        assert!(model.warnings().is_empty());
        assert!(model.asset_series().is_some());
    }

    #[test]
    fn test_assumed_participation_rate_is_warned() {
        let terms = ProductTerms::builder()
            .notional(1.0)
            .currency(Currency::EUR)
            .start_level(1.0)
            .start_date(date(2020, 1, 2))
            .final_maturity_date(date(2021, 1, 4))
            .build()
            .unwrap();
        let mut model = SimulationModel::new(terms, Vec::new()).unwrap();
        model.set_asset_data(prices(&[(date(2020, 1, 2), 10.0), (date(2021, 1, 4), 12.0)]));

        assert_eq!(model.warnings(), vec![DataQualityWarning::MissingParticipationRate]);
        assert_relative_eq!(model.maturity_payoff().unwrap(), 1.2);
    }

    #[test]
    fn test_events_outside_product_life_are_rejected() {
        let before_start = SimulationModel::new(terms(), vec![fixed_coupon(date(2019, 12, 2))]);
        assert_eq!(
            before_start.unwrap_err(),
            ConfigurationError::EventOutsideProductLife {
                date: date(2019, 12, 2),
                start_date: date(2020, 1, 2),
                final_maturity_date: date(2022, 1, 3),
            }
        );

        let after_maturity = SimulationModel::new(terms(), vec![fixed_coupon(date(2022, 1, 4))]);
        assert!(matches!(
            after_maturity,
            Err(ConfigurationError::EventOutsideProductLife { .. })
        ));
    }

    #[test]
    fn test_events_on_key_dates_are_accepted() {
        let specs = vec![fixed_coupon(date(2020, 1, 2)), fixed_coupon(date(2022, 1, 3))];
        let mut model = SimulationModel::new(terms(), specs).unwrap();
        model.set_asset_data(prices(&[(date(2020, 1, 2), 50.0), (date(2022, 1, 3), 60.0)]));

        assert_eq!(model.observed_events().len(), 2);
        assert!(model.warnings().is_empty());
    }
}
