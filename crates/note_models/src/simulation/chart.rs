//! Read-only projections of a [`SimulationModel`] for chart rendering.
//!
//! Every projection is plain data. With the `serde` feature they serialize
//! with camelCase keys; non-finite numbers (the open top of the highest
//! payoff range) become `null` in JSON.

use note_core::types::Date;

use super::model::SimulationModel;
use crate::instruments::{format_percent, PayoffRange};

/// Start date and final maturity date of the product.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TimeRange {
    /// First day of the product's life.
    pub start_date: Date,
    /// Last day of the product's life.
    pub final_maturity_date: Date,
}

/// A dated level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelPoint {
    /// Date of the point.
    pub date: Date,
    /// Level relative to the fixing.
    pub level: f64,
}

/// Horizontal reference lines spanning the product's life.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LevelLines {
    /// The start level.
    pub start_level: [LevelPoint; 2],
    /// The maturity level, once the product has matured.
    pub maturity_level: Option<[LevelPoint; 2]>,
}

/// Payoff ranges of one income barrier event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PayoffRangeBand {
    /// Event identifier.
    pub id: String,
    /// Planned date.
    pub date: Date,
    /// Barrier levels of the event.
    pub levels: Vec<f64>,
    /// One range per coupon.
    pub ranges: Vec<PayoffRange>,
}

/// A point marking an event on the chart.
///
/// Income markers sit at the observed asset level; the maturity marker sits
/// at the payoff ratio.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EventMarker {
    /// Event identifier.
    pub id: String,
    /// Planned date of the event.
    pub date: Date,
    /// Vertical position, `None` until observed.
    pub level: Option<f64>,
    /// Status line.
    pub comment: String,
    /// Whether a payoff was made.
    pub executed: bool,
    /// Cash paid, in the product currency.
    pub amount: f64,
}

/// Everything a chart renderer needs in one value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChartData {
    /// Product life.
    pub time_range: TimeRange,
    /// Normalised asset levels within the product's life.
    pub asset_series: Vec<LevelPoint>,
    /// Reference lines.
    pub level_lines: LevelLines,
    /// Payoff ranges per income barrier event.
    pub payoff_range_bands: Vec<PayoffRangeBand>,
    /// Markers for every event, the maturity marker last.
    pub event_markers: Vec<EventMarker>,
    /// Data quality warnings, as messages.
    pub warnings: Vec<String>,
}

impl SimulationModel {
    /// Product life.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start_date: self.terms().start_date(),
            final_maturity_date: self.terms().final_maturity_date(),
        }
    }

    /// Normalised asset levels; empty without a fixing.
    pub fn level_series(&self) -> Vec<LevelPoint> {
        self.asset_series()
            .map(|series| {
                series
                    .points()
                    .iter()
                    .map(|point| LevelPoint {
                        date: point.date,
                        level: point.value,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Start and maturity level lines across the product's life.
    pub fn level_lines(&self) -> LevelLines {
        let range = self.time_range();
        let line = |level| {
            [
                LevelPoint {
                    date: range.start_date,
                    level,
                },
                LevelPoint {
                    date: range.final_maturity_date,
                    level,
                },
            ]
        };
        LevelLines {
            start_level: line(self.terms().start_level()),
            maturity_level: self.maturity_level().map(line),
        }
    }

    /// Payoff ranges of every income barrier event, in date order.
    pub fn payoff_range_bands(&self) -> Vec<PayoffRangeBand> {
        self.sequence()
            .events()
            .iter()
            .map(|event| PayoffRangeBand {
                id: event.id().to_string(),
                date: event.planned_date(),
                levels: event.spec().barrier_levels().to_vec(),
                ranges: event.payoff_ranges(),
            })
            .collect()
    }

    /// Markers for every income event followed by the final maturity marker.
    pub fn event_markers(&self, precision: usize) -> Vec<EventMarker> {
        let terms = self.terms();
        let mut markers: Vec<EventMarker> = self
            .sequence()
            .iter()
            .map(|evaluated| EventMarker {
                id: evaluated.event.id().to_string(),
                date: evaluated.event.planned_date(),
                level: evaluated.state.observation().map(|o| o.observed_level),
                comment: evaluated.comment(precision),
                executed: evaluated.state.executed(),
                amount: terms.cash_amount(evaluated.state.payoff()),
            })
            .collect();

        if let Some((event, state)) = self.sequence().final_maturity() {
            markers.push(EventMarker {
                id: crate::instruments::FinalMaturityEvent::ID.to_string(),
                date: event.date(),
                level: state.observation().map(|o| o.payoff),
                comment: event.comment(state, precision),
                executed: state.executed(),
                amount: terms.cash_amount(state.payoff()),
            });
        }
        markers
    }

    /// Every projection together.
    pub fn chart_data(&self, precision: usize) -> ChartData {
        ChartData {
            time_range: self.time_range(),
            asset_series: self.level_series(),
            level_lines: self.level_lines(),
            payoff_range_bands: self.payoff_range_bands(),
            event_markers: self.event_markers(precision),
            warnings: self.warnings().iter().map(ToString::to_string).collect(),
        }
    }

    /// Total observed income as a percentage string.
    pub fn total_income_percent(&self, precision: usize) -> String {
        format_percent(self.total_income(), precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{IncomeBarrierEventSpec, PayoffStyle, ProductTerms};
    use approx::assert_relative_eq;
    use note_core::market_data::{PricePoint, PriceSeries};
    use note_core::types::Currency;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn model() -> SimulationModel {
        let terms = ProductTerms::builder()
            .notional(10_000.0)
            .currency(Currency::SEK)
            .start_level(1.0)
            .participation_rate(1.0)
            .start_date(date(2020, 1, 2))
            .final_maturity_date(date(2021, 1, 4))
            .build()
            .unwrap();
        let spec = IncomeBarrierEventSpec::new(
            date(2020, 7, 1),
            vec![0.8, 1.0],
            vec![0.0, 0.02, 0.05],
            PayoffStyle::Fixed,
        )
        .unwrap();
        let mut model = SimulationModel::new(terms, vec![spec]).unwrap();
        model.set_asset_data(PriceSeries::new(vec![
            PricePoint::new(date(2019, 12, 30), 90.0),
            PricePoint::new(date(2020, 1, 2), 100.0),
            PricePoint::new(date(2020, 6, 30), 110.0),
            PricePoint::new(date(2021, 1, 4), 150.0),
            PricePoint::new(date(2021, 2, 1), 160.0),
        ]));
        model
    }

    #[test]
    fn test_level_series_is_clipped_to_product_life() {
        let series = model().level_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, date(2020, 1, 2));
        assert_relative_eq!(series[0].level, 1.0);
        assert_relative_eq!(series[2].level, 1.5);
    }

    #[test]
    fn test_level_lines() {
        let lines = model().level_lines();
        assert_eq!(lines.start_level[1].date, date(2021, 1, 4));
        let maturity = lines.maturity_level.unwrap();
        assert_relative_eq!(maturity[0].level, 1.5);
    }

    #[test]
    fn test_payoff_range_bands() {
        let bands = model().payoff_range_bands();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].levels, vec![0.8, 1.0]);
        assert_eq!(bands[0].ranges.len(), 3);
        assert!(bands[0].ranges[2].max.is_infinite());
    }

    #[test]
    fn test_event_markers() {
        let markers = model().event_markers(2);
        assert_eq!(markers.len(), 2);

        assert_eq!(markers[0].id, "income-barrier-event-0");
        assert_relative_eq!(markers[0].level.unwrap(), 1.1);
        assert!(markers[0].executed);
        assert_relative_eq!(markers[0].amount, 500.0);
        assert_eq!(markers[0].comment, "2020-06-30: Income Event 5.00%");

        assert_eq!(markers[1].id, "final-maturity-event");
        assert_relative_eq!(markers[1].level.unwrap(), 1.5);
        assert_eq!(markers[1].comment, "Return on Maturity: 150.00% (15000.00 SEK)");
    }

    #[test]
    fn test_chart_data_carries_substitution_warning() {
        let chart = model().chart_data(2);
        assert_eq!(chart.warnings.len(), 1);
        assert!(chart.warnings[0].contains("2020-06-30"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_chart_data_json_shape() {
        let json = serde_json::to_value(model().chart_data(2)).unwrap();
        assert_eq!(json["timeRange"]["startDate"], "2020-01-02");
        assert!(json["payoffRangeBands"][0]["ranges"][2]["max"].is_null());
        assert_eq!(json["eventMarkers"][1]["executed"], true);
    }
}
