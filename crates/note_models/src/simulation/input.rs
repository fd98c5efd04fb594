//! Plain-data product definitions.
//!
//! These types mirror the JSON/TOML layout of a product file and are
//! converted into validated domain types with `build`/`to_*` methods. All
//! fields are optional at the serde level so that absent fields surface as
//! [`ConfigurationError`]s naming the field instead of parser errors.

use serde::Deserialize;

use note_core::market_data::{MarketDataError, PriceSeries};
use note_core::types::{Currency, Date, Tenor};

use super::model::SimulationModel;
use crate::instruments::{ConfigurationError, IncomeBarrierEventSpec, PayoffStyle, ProductTerms};

/// A product file: terms plus income barrier events.
///
/// # Examples
/// ```
/// use note_models::simulation::ProductDefinition;
///
/// let json = r#"{
///     "product": {
///         "notional": 10000,
///         "currency": "SEK",
///         "startLevel": 1.0,
///         "participationRate": 0.5,
///         "keyDates": { "startDate": "2024-01-02", "finalMaturityDate": "2030-01-02" }
///     },
///     "incomeBarrierEvents": [{
///         "date": "2025-01-02",
///         "incomeBarriers": [1.0],
///         "payoffData": { "payoffStyle": "fixed" },
///         "couponPayoffs": [0.0, 0.05]
///     }]
/// }"#;
/// let definition: ProductDefinition = serde_json::from_str(json).unwrap();
/// let model = definition.build_model().unwrap();
/// assert_eq!(model.sequence().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDefinition {
    /// Product terms.
    #[serde(default)]
    pub product: ProductTermsDefinition,
    /// Income barrier events, in any order.
    #[serde(default)]
    pub income_barrier_events: Vec<IncomeBarrierEventDefinition>,
}

impl ProductDefinition {
    /// Validates the whole definition.
    pub fn build(&self) -> Result<(ProductTerms, Vec<IncomeBarrierEventSpec>), ConfigurationError> {
        let terms = self.product.to_terms()?;
        let specs = self
            .income_barrier_events
            .iter()
            .enumerate()
            .map(|(index, event)| event.to_spec(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((terms, specs))
    }

    /// Validates the definition and builds a model without asset data.
    pub fn build_model(&self) -> Result<SimulationModel, ConfigurationError> {
        let (terms, specs) = self.build()?;
        SimulationModel::new(terms, specs)
    }
}

/// Key dates of a product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDates {
    /// Fixing date.
    pub start_date: Option<String>,
    /// Final maturity date.
    pub final_maturity_date: Option<String>,
}

/// Product terms as written in a product file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTermsDefinition {
    /// Invested amount.
    pub notional: Option<f64>,
    /// ISO 4217 code.
    pub currency: Option<String>,
    /// Capital protection level.
    pub start_level: Option<f64>,
    /// Share of the appreciation paid at maturity; 100% when absent.
    pub participation_rate: Option<f64>,
    /// Start and final maturity dates.
    pub key_dates: Option<KeyDates>,
    /// Tenor such as `6Y`, used when no final maturity date is given.
    pub maturity: Option<String>,
}

impl ProductTermsDefinition {
    /// Converts into validated [`ProductTerms`].
    pub fn to_terms(&self) -> Result<ProductTerms, ConfigurationError> {
        let key_dates = self
            .key_dates
            .as_ref()
            .ok_or(ConfigurationError::MissingKeyDate { name: "startDate" })?;

        let mut builder = ProductTerms::builder();
        if let Some(start) = &key_dates.start_date {
            builder = builder.start_date(parse_date("keyDates.startDate", start)?);
        }
        match (&key_dates.final_maturity_date, &self.maturity) {
            (Some(date), _) => {
                builder = builder.final_maturity_date(parse_date("keyDates.finalMaturityDate", date)?);
            }
            (None, Some(tenor)) => {
                let tenor: Tenor = tenor.parse().map_err(|e: note_core::types::DateError| {
                    ConfigurationError::InvalidDate {
                        field: "maturity".to_string(),
                        message: e.to_string(),
                    }
                })?;
                builder = builder.maturity_tenor(tenor);
            }
            (None, None) => {}
        }
        if let Some(notional) = self.notional {
            builder = builder.notional(notional);
        }
        if let Some(code) = &self.currency {
            let currency: Currency = code
                .parse()
                .map_err(|_| ConfigurationError::UnknownCurrency(code.clone()))?;
            builder = builder.currency(currency);
        }
        if let Some(start_level) = self.start_level {
            builder = builder.start_level(start_level);
        }
        if let Some(rate) = self.participation_rate {
            builder = builder.participation_rate(rate);
        }
        builder.build()
    }
}

/// Payoff style and its style-specific field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffData {
    /// One of [`PayoffStyle::NAMES`].
    pub payoff_style: Option<String>,
    /// For `relativeToValue`.
    pub reference_value: Option<f64>,
    /// For `relativeToBarrier`.
    pub barrier_index: Option<usize>,
    /// For `fixedWithMemoryFromValue`.
    pub stored_value: Option<f64>,
    /// For `fixedWithMemoryFromPayoffLevel`.
    pub payoff_index: Option<usize>,
}

impl PayoffData {
    /// Resolves the named style, requiring its field.
    pub fn to_style(&self, path: &str) -> Result<PayoffStyle, ConfigurationError> {
        let missing = |name: &str| ConfigurationError::MissingField {
            field: format!("{}.payoffData.{}", path, name),
        };
        let name = self.payoff_style.as_deref().ok_or_else(|| missing("payoffStyle"))?;

        let style = match name {
            "fixed" => PayoffStyle::Fixed,
            "relativeToValue" => PayoffStyle::RelativeToValue {
                reference_value: self.reference_value.ok_or_else(|| missing("referenceValue"))?,
            },
            "relativeToBarrier" => PayoffStyle::RelativeToBarrier {
                barrier_index: self.barrier_index.ok_or_else(|| missing("barrierIndex"))?,
            },
            "fixedWithMemoryFromValue" => PayoffStyle::FixedWithMemoryFromValue {
                stored_value: self.stored_value.ok_or_else(|| missing("storedValue"))?,
            },
            "fixedWithMemoryFromPayoffLevel" => PayoffStyle::FixedWithMemoryFromPayoffLevel {
                payoff_index: self.payoff_index.ok_or_else(|| missing("payoffIndex"))?,
            },
            other => return Err(ConfigurationError::UnknownPayoffStyle(other.to_string())),
        };
        Ok(style)
    }
}

/// One income barrier event as written in a product file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBarrierEventDefinition {
    /// Planned observation date.
    pub date: Option<String>,
    /// Ascending barrier levels.
    #[serde(default)]
    pub income_barriers: Vec<f64>,
    /// Payoff style.
    pub payoff_data: Option<PayoffData>,
    /// One coupon per barrier range.
    #[serde(default)]
    pub coupon_payoffs: Vec<f64>,
}

impl IncomeBarrierEventDefinition {
    /// Converts into a validated [`IncomeBarrierEventSpec`]; `index` is the
    /// event's position in the file, used in error paths.
    pub fn to_spec(&self, index: usize) -> Result<IncomeBarrierEventSpec, ConfigurationError> {
        let path = format!("incomeBarrierEvents[{}]", index);
        let date = self.date.as_deref().ok_or_else(|| ConfigurationError::MissingField {
            field: format!("{}.date", path),
        })?;
        let date = parse_date(&format!("{}.date", path), date)?;
        let style = self
            .payoff_data
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingField {
                field: format!("{}.payoffData", path),
            })?
            .to_style(&path)?;

        IncomeBarrierEventSpec::new(date, self.income_barriers.clone(), self.coupon_payoffs.clone(), style)
    }
}

/// One asset price record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetRecord {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Raw price.
    pub value: f64,
}

/// Builds a price series from asset records.
pub fn asset_series(records: &[AssetRecord]) -> Result<PriceSeries, MarketDataError> {
    PriceSeries::from_records(records.iter().map(|record| (record.date.as_str(), record.value)))
}

fn parse_date(field: &str, value: &str) -> Result<Date, ConfigurationError> {
    Date::parse(value).map_err(|e| ConfigurationError::InvalidDate {
        field: field.to_string(),
        message: e.to_string(),
    })
}
