//! Asset price series and observation-date alignment.

use std::fmt;

use super::error::MarketDataError;
use crate::types::Date;

/// A single quoted price of the underlying.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Quote date.
    pub date: Date,
    /// Quoted value (raw price, or level once normalised).
    pub value: f64,
}

impl PricePoint {
    /// Creates a price point.
    #[inline]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// Price found for an observation date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    /// The date that was asked for.
    pub requested: Date,
    /// The date of the price actually used.
    pub date: Date,
    /// The price on `date`.
    pub value: f64,
}

impl ResolvedPrice {
    /// Returns true when no price existed on the requested date and the
    /// previous available price was used instead.
    #[inline]
    pub fn is_substituted(&self) -> bool {
        self.date != self.requested
    }
}

/// Outcome of aligning an observation date with a price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// A price at or before the observation date exists.
    Available(ResolvedPrice),
    /// The observation date lies beyond the known data.
    NotYetAvailable,
}

impl Resolution {
    /// Returns the resolved price, if any.
    #[inline]
    pub fn available(self) -> Option<ResolvedPrice> {
        match self {
            Resolution::Available(price) => Some(price),
            Resolution::NotYetAvailable => None,
        }
    }
}

/// Latest point dated at or before `target`, provided the data horizon
/// reaches `target`. `points` must be sorted ascending by date.
fn resolve_at_or_before(points: &[PricePoint], horizon: Option<Date>, target: Date) -> Resolution {
    match horizon {
        Some(last) if last >= target => {}
        _ => return Resolution::NotYetAvailable,
    }

    let end = points.partition_point(|point| point.date <= target);
    match end.checked_sub(1).map(|index| points[index]) {
        Some(point) => Resolution::Available(ResolvedPrice {
            requested: target,
            date: point.date,
            value: point.value,
        }),
        None => Resolution::NotYetAvailable,
    }
}

/// Why a series could not be expressed relative to its fixing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unfixed {
    /// No price exactly on the start date.
    MissingFixing {
        /// The product start date.
        start_date: Date,
    },
    /// The start-date price cannot be divided by.
    InvalidFixing {
        /// The product start date.
        start_date: Date,
        /// The unusable fixing value.
        value: f64,
    },
}

impl fmt::Display for Unfixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unfixed::MissingFixing { start_date } => {
                write!(f, "asset has no value for fixing date {}", start_date)
            }
            Unfixed::InvalidFixing { start_date, value } => {
                write!(f, "asset value {} on fixing date {} is not a usable fixing", value, start_date)
            }
        }
    }
}

/// Sparse raw price history of the underlying, sorted ascending by date.
///
/// Points sharing a date keep their input order; exact lookups use the
/// last of them.
///
/// # Examples
///
/// ```
/// use note_core::market_data::{PricePoint, PriceSeries};
/// use note_core::types::Date;
///
/// let series = PriceSeries::from_records([("2024-01-03", 101.0), ("2024-01-02", 100.0)]).unwrap();
/// assert_eq!(series.first_date(), Some(Date::from_ymd(2024, 1, 2).unwrap()));
/// assert_eq!(series.value_on(Date::from_ymd(2024, 1, 3).unwrap()), Some(101.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, sorting the points by date.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.date);
        Self { points }
    }

    /// Builds a series from `(date string, value)` records.
    ///
    /// # Errors
    /// - [`MarketDataError::InvalidDate`] when a date does not parse
    /// - [`MarketDataError::NonFiniteValue`] when a value is NaN or infinite
    pub fn from_records<I, S>(records: I) -> Result<Self, MarketDataError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let points = records
            .into_iter()
            .enumerate()
            .map(|(index, (date, value))| {
                let date = Date::parse(date.as_ref())
                    .map_err(|source| MarketDataError::InvalidDate { index, source })?;
                if !value.is_finite() {
                    return Err(MarketDataError::NonFiniteValue { date, value });
                }
                Ok(PricePoint::new(date, value))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(points))
    }

    /// Returns the points in ascending date order.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the series has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the earliest quote date.
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|point| point.date)
    }

    /// Returns the latest quote date.
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|point| point.date)
    }

    /// Exact-date lookup, without substitution.
    pub fn value_on(&self, date: Date) -> Option<f64> {
        let end = self.points.partition_point(|point| point.date <= date);
        end.checked_sub(1)
            .map(|index| self.points[index])
            .filter(|point| point.date == date)
            .map(|point| point.value)
    }

    /// Resolves the latest price at or before `target`.
    ///
    /// Returns [`Resolution::NotYetAvailable`] when the series is empty or
    /// ends strictly before `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use note_core::market_data::{PriceSeries, Resolution};
    /// use note_core::types::Date;
    ///
    /// let series = PriceSeries::from_records([("2024-01-02", 100.0), ("2024-01-05", 104.0)]).unwrap();
    ///
    /// let friday = Date::from_ymd(2024, 1, 5).unwrap();
    /// let price = series.resolve(friday).available().unwrap();
    /// assert!(!price.is_substituted());
    ///
    /// let monday = Date::from_ymd(2024, 1, 8).unwrap();
    /// assert_eq!(series.resolve(monday), Resolution::NotYetAvailable);
    /// ```
    pub fn resolve(&self, target: Date) -> Resolution {
        resolve_at_or_before(&self.points, self.last_date(), target)
    }

    /// Expresses the series relative to its fixing on `start_date`,
    /// restricted to `[start_date, end_date]`.
    ///
    /// # Errors
    /// Returns [`Unfixed`] when there is no price exactly on `start_date`,
    /// or when that price is zero, negative or not finite.
    pub fn normalize(&self, start_date: Date, end_date: Date) -> Result<NormalizedSeries, Unfixed> {
        let fixing = self
            .value_on(start_date)
            .ok_or(Unfixed::MissingFixing { start_date })?;
        if !(fixing.is_finite() && fixing > 0.0) {
            return Err(Unfixed::InvalidFixing {
                start_date,
                value: fixing,
            });
        }

        let points = self
            .points
            .iter()
            .filter(|point| point.date >= start_date && point.date <= end_date)
            .map(|point| PricePoint::new(point.date, point.value / fixing))
            .collect();

        Ok(NormalizedSeries {
            fixing,
            points,
            horizon: self.last_date(),
        })
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = PricePoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Asset levels relative to the fixing, restricted to the product's life.
///
/// The horizon of the raw data is kept so that an observation on a date
/// the raw data covers is not mistaken for a future one.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    fixing: f64,
    points: Vec<PricePoint>,
    horizon: Option<Date>,
}

impl NormalizedSeries {
    /// The raw price on the start date.
    #[inline]
    pub fn fixing(&self) -> f64 {
        self.fixing
    }

    /// Level points (value = raw price / fixing) in ascending date order.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Latest date covered by the raw data.
    #[inline]
    pub fn horizon(&self) -> Option<Date> {
        self.horizon
    }

    /// Resolves the latest level at or before `target`.
    pub fn resolve(&self, target: Date) -> Resolution {
        resolve_at_or_before(&self.points, self.horizon, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 1, day).unwrap()
    }

    fn sample() -> PriceSeries {
        PriceSeries::new(vec![
            PricePoint::new(d(10), 110.0),
            PricePoint::new(d(2), 100.0),
            PricePoint::new(d(5), 95.0),
        ])
    }

    #[test]
    fn test_new_sorts_by_date() {
        let dates: Vec<Date> = sample().points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2), d(5), d(10)]);
    }

    #[test]
    fn test_resolve_exact_date() {
        let price = sample().resolve(d(5)).available().unwrap();
        assert_eq!(price.date, d(5));
        assert_eq!(price.value, 95.0);
        assert!(!price.is_substituted());
    }

    #[test]
    fn test_resolve_uses_previous_price() {
        let price = sample().resolve(d(8)).available().unwrap();
        assert_eq!(price.requested, d(8));
        assert_eq!(price.date, d(5));
        assert!(price.is_substituted());
    }

    #[test]
    fn test_resolve_beyond_last_date_is_not_available() {
        assert_eq!(sample().resolve(d(11)), Resolution::NotYetAvailable);
    }

    #[test]
    fn test_resolve_empty_series() {
        assert_eq!(PriceSeries::default().resolve(d(1)), Resolution::NotYetAvailable);
    }

    #[test]
    fn test_resolve_before_first_point() {
        assert_eq!(sample().resolve(d(1)), Resolution::NotYetAvailable);
    }

    #[test]
    fn test_value_on_is_exact() {
        let series = sample();
        assert_eq!(series.value_on(d(10)), Some(110.0));
        assert_eq!(series.value_on(d(9)), None);
    }

    #[test]
    fn test_value_on_duplicate_dates_uses_last() {
        let series = PriceSeries::new(vec![PricePoint::new(d(2), 100.0), PricePoint::new(d(2), 101.0)]);
        assert_eq!(series.value_on(d(2)), Some(101.0));
    }

    #[test]
    fn test_from_records_rejects_bad_input() {
        let err = PriceSeries::from_records([("2024-01-02", 1.0), ("2024-02-30", 1.0)]).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidDate { index: 1, .. }));

        let err = PriceSeries::from_records([("2024-01-02", f64::INFINITY)]).unwrap_err();
        assert!(matches!(err, MarketDataError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_normalize_divides_by_fixing_and_restricts() {
        let normalized = sample().normalize(d(5), d(9)).unwrap();
        assert_eq!(normalized.fixing(), 95.0);
        assert_eq!(normalized.points().len(), 1);
        assert_relative_eq!(normalized.points()[0].value, 1.0);
        assert_eq!(normalized.horizon(), Some(d(10)));
    }

    #[test]
    fn test_normalized_resolve_respects_raw_horizon() {
        // Maturity on the 9th has no quote but the raw data reaches the 10th.
        let normalized = sample().normalize(d(2), d(9)).unwrap();
        let price = normalized.resolve(d(9)).available().unwrap();
        assert_eq!(price.date, d(5));
        assert_relative_eq!(price.value, 0.95);
    }

    #[test]
    fn test_normalize_missing_fixing() {
        assert_eq!(
            sample().normalize(d(3), d(10)),
            Err(Unfixed::MissingFixing { start_date: d(3) })
        );
    }

    #[test]
    fn test_normalize_zero_fixing() {
        let series = PriceSeries::new(vec![PricePoint::new(d(2), 0.0), PricePoint::new(d(3), 1.0)]);
        assert!(matches!(
            series.normalize(d(2), d(3)),
            Err(Unfixed::InvalidFixing { value, .. }) if value == 0.0
        ));
    }

    proptest! {
        #[test]
        fn prop_resolve_never_looks_ahead(
            days in proptest::collection::vec(1u32..=28, 1..20),
            target in 1u32..=28,
        ) {
            let series: PriceSeries = days
                .iter()
                .map(|&day| PricePoint::new(d(day), f64::from(day)))
                .collect();
            let last = *days.iter().max().unwrap();

            match series.resolve(d(target)) {
                Resolution::Available(price) => {
                    prop_assert!(price.date <= d(target));
                    let latest_prior = days.iter().copied().filter(|&day| day <= target).max().unwrap();
                    prop_assert_eq!(price.date, d(latest_prior));
                }
                Resolution::NotYetAvailable => {
                    let any_prior = days.iter().any(|&day| day <= target);
                    prop_assert!(target > last || !any_prior);
                }
            }
        }
    }
}
