//! Product terms of a capital-protected note.

use note_core::types::{Currency, Date, Tenor};

use super::error::ConfigurationError;

/// Fixed terms of a note, immutable for a simulation run.
///
/// Levels and rates are ratios: a start level of `1.0` is 100% of the
/// fixing, a participation rate of `0.5` pays half of the appreciation.
///
/// # Examples
///
/// ```
/// use note_core::types::{Currency, Date, Tenor};
/// use note_models::instruments::ProductTerms;
///
/// let terms = ProductTerms::builder()
///     .notional(10_000.0)
///     .currency(Currency::SEK)
///     .start_level(1.0)
///     .participation_rate(0.5)
///     .start_date(Date::from_ymd(2020, 3, 16).unwrap())
///     .maturity_tenor(Tenor::Years(6))
///     .build()
///     .unwrap();
///
/// assert_eq!(terms.final_maturity_date(), Date::from_ymd(2026, 3, 16).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTerms {
    notional: f64,
    currency: Currency,
    start_level: f64,
    participation_rate: f64,
    participation_rate_assumed: bool,
    start_date: Date,
    final_maturity_date: Date,
}

impl ProductTerms {
    /// Starts building product terms.
    pub fn builder() -> ProductTermsBuilder {
        ProductTermsBuilder::default()
    }

    /// Invested amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Currency of the notional.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Level (ratio of the fixing) above which appreciation participates,
    /// and below which capital is protected.
    #[inline]
    pub fn start_level(&self) -> f64 {
        self.start_level
    }

    /// Multiplier on positive appreciation at maturity.
    #[inline]
    pub fn participation_rate(&self) -> f64 {
        self.participation_rate
    }

    /// True when no participation rate was given and 100% was assumed.
    #[inline]
    pub fn participation_rate_assumed(&self) -> bool {
        self.participation_rate_assumed
    }

    /// Fixing date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Final maturity date.
    #[inline]
    pub fn final_maturity_date(&self) -> Date {
        self.final_maturity_date
    }

    /// Converts a payoff ratio into a cash amount in the note currency.
    pub fn cash_amount(&self, payoff: f64) -> f64 {
        self.currency.round(payoff * self.notional)
    }
}

/// Builder for [`ProductTerms`].
#[derive(Debug, Clone, Default)]
pub struct ProductTermsBuilder {
    notional: Option<f64>,
    currency: Option<Currency>,
    start_level: Option<f64>,
    participation_rate: Option<f64>,
    start_date: Option<Date>,
    final_maturity_date: Option<Date>,
    maturity_tenor: Option<Tenor>,
}

impl ProductTermsBuilder {
    /// Sets the notional.
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the currency.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Sets the start level.
    pub fn start_level(mut self, start_level: f64) -> Self {
        self.start_level = Some(start_level);
        self
    }

    /// Sets the participation rate. Defaults to 100% when never set.
    pub fn participation_rate(mut self, participation_rate: f64) -> Self {
        self.participation_rate = Some(participation_rate);
        self
    }

    /// Sets the start (fixing) date.
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the final maturity date.
    pub fn final_maturity_date(mut self, date: Date) -> Self {
        self.final_maturity_date = Some(date);
        self
    }

    /// Derives the final maturity date from the start date when no explicit
    /// final maturity date is set.
    pub fn maturity_tenor(mut self, tenor: Tenor) -> Self {
        self.maturity_tenor = Some(tenor);
        self
    }

    /// Validates and builds the terms.
    ///
    /// # Errors
    /// - [`ConfigurationError::MissingKeyDate`] without a start date, or
    ///   without both a final maturity date and a tenor
    /// - [`ConfigurationError::MissingField`] for an absent notional,
    ///   currency or start level
    /// - [`ConfigurationError::InvalidDateRange`] unless maturity is after start
    /// - [`ConfigurationError::NonFiniteValue`], [`ConfigurationError::InvalidNotional`]
    ///   or [`ConfigurationError::NegativeParticipationRate`] for unusable numbers
    pub fn build(self) -> Result<ProductTerms, ConfigurationError> {
        let start_date = self
            .start_date
            .ok_or(ConfigurationError::MissingKeyDate { name: "startDate" })?;
        let final_maturity_date = match (self.final_maturity_date, self.maturity_tenor) {
            (Some(date), _) => date,
            (None, Some(tenor)) => {
                start_date
                    .add_tenor(tenor)
                    .map_err(|e| ConfigurationError::InvalidDate {
                        field: "maturity".to_string(),
                        message: e.to_string(),
                    })?
            }
            (None, None) => {
                return Err(ConfigurationError::MissingKeyDate {
                    name: "finalMaturityDate",
                })
            }
        };
        if final_maturity_date <= start_date {
            return Err(ConfigurationError::InvalidDateRange {
                start_date,
                final_maturity_date,
            });
        }

        let notional = finite("notional", required("notional", self.notional)?)?;
        if notional < 0.0 {
            return Err(ConfigurationError::InvalidNotional(notional));
        }
        let currency = self.currency.ok_or_else(|| ConfigurationError::MissingField {
            field: "currency".to_string(),
        })?;
        let start_level = finite("startLevel", required("startLevel", self.start_level)?)?;

        let participation_rate_assumed = self.participation_rate.is_none();
        let participation_rate = finite("participationRate", self.participation_rate.unwrap_or(1.0))?;
        if participation_rate < 0.0 {
            return Err(ConfigurationError::NegativeParticipationRate(participation_rate));
        }

        Ok(ProductTerms {
            notional,
            currency,
            start_level,
            participation_rate,
            participation_rate_assumed,
            start_date,
            final_maturity_date,
        })
    }
}

fn required(field: &str, value: Option<f64>) -> Result<f64, ConfigurationError> {
    value.ok_or_else(|| ConfigurationError::MissingField {
        field: field.to_string(),
    })
}

pub(crate) fn finite(field: &str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonFiniteValue {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn builder() -> ProductTermsBuilder {
        ProductTerms::builder()
            .notional(10_000.0)
            .currency(Currency::SEK)
            .start_level(1.0)
            .participation_rate(0.5)
            .start_date(date(2020, 1, 2))
            .final_maturity_date(date(2026, 1, 2))
    }

    #[test]
    fn test_build_valid_terms() {
        let terms = builder().build().unwrap();
        assert_eq!(terms.notional(), 10_000.0);
        assert_eq!(terms.currency(), Currency::SEK);
        assert_eq!(terms.participation_rate(), 0.5);
        assert!(!terms.participation_rate_assumed());
        assert_eq!(terms.cash_amount(1.5), 15_000.0);
    }

    #[test]
    fn test_missing_start_date() {
        let result = ProductTerms::builder()
            .notional(1.0)
            .currency(Currency::EUR)
            .start_level(1.0)
            .final_maturity_date(date(2026, 1, 2))
            .build();
        assert_eq!(result, Err(ConfigurationError::MissingKeyDate { name: "startDate" }));
    }

    #[test]
    fn test_missing_final_maturity_date() {
        let result = ProductTerms::builder()
            .notional(1.0)
            .currency(Currency::EUR)
            .start_level(1.0)
            .start_date(date(2020, 1, 2))
            .build();
        assert_eq!(
            result,
            Err(ConfigurationError::MissingKeyDate {
                name: "finalMaturityDate"
            })
        );
    }

    #[test]
    fn test_explicit_maturity_wins_over_tenor() {
        let terms = builder().maturity_tenor(Tenor::Months(18)).build().unwrap();
        assert_eq!(terms.final_maturity_date(), date(2026, 1, 2));
    }

    #[test]
    fn test_maturity_must_follow_start() {
        let result = builder().final_maturity_date(date(2020, 1, 2)).build();
        assert!(matches!(result, Err(ConfigurationError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_participation_rate_defaults_to_one() {
        let terms = ProductTerms::builder()
            .notional(1.0)
            .currency(Currency::EUR)
            .start_level(1.0)
            .start_date(date(2020, 1, 2))
            .maturity_tenor(Tenor::Years(1))
            .build()
            .unwrap();
        assert_eq!(terms.participation_rate(), 1.0);
        assert!(terms.participation_rate_assumed());
    }

    #[test]
    fn test_negative_participation_rate_rejected() {
        let result = builder().participation_rate(-0.1).build();
        assert_eq!(result, Err(ConfigurationError::NegativeParticipationRate(-0.1)));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert_eq!(
            builder().notional(-5.0).build(),
            Err(ConfigurationError::InvalidNotional(-5.0))
        );
        assert!(matches!(
            builder().start_level(f64::NAN).build(),
            Err(ConfigurationError::NonFiniteValue { ref field, .. }) if field == "startLevel"
        ));
    }
}
