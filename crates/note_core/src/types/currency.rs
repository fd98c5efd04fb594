//! Currency types for note notionals.
//!
//! This module provides ISO 4217 currency codes with metadata
//! for decimal precision and serialisation support.
//!
//! # Examples
//!
//! ```
//! use note_core::types::currency::Currency;
//!
//! let sek = Currency::SEK;
//! assert_eq!(sek.code(), "SEK");
//! assert_eq!(sek.decimal_places(), 2);
//!
//! let jpy = Currency::JPY;
//! assert_eq!(jpy.decimal_places(), 0);  // Yen has no decimal places
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency codes with decimal precision metadata.
///
/// Covers the Nordic home markets of the notes plus the major
/// currencies their underlyings are quoted in.
///
/// # Examples
///
/// ```
/// use note_core::types::currency::Currency;
///
/// assert_eq!(Currency::NOK.code(), "NOK");
///
/// // Parse from string (case-insensitive)
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur, Currency::EUR);
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// Swedish Krona
    SEK,
    /// Norwegian Krone
    NOK,
    /// Danish Krone
    DKK,
    /// Euro
    EUR,
    /// United States Dollar
    USD,
    /// British Pound Sterling
    GBP,
    /// Swiss Franc
    CHF,
    /// Japanese Yen (no minor units)
    JPY,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 8] = [
        Currency::SEK,
        Currency::NOK,
        Currency::DKK,
        Currency::EUR,
        Currency::USD,
        Currency::GBP,
        Currency::CHF,
        Currency::JPY,
    ];

    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::SEK => "SEK",
            Currency::NOK => "NOK",
            Currency::DKK => "DKK",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
        }
    }

    /// Returns the standard number of decimal places for this currency.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Rounds an amount to this currency's minor units.
    ///
    /// # Examples
    ///
    /// ```
    /// use note_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::SEK.round(1234.567), 1234.57);
    /// assert_eq!(Currency::JPY.round(1234.567), 1235.0);
    /// ```
    pub fn round(&self, amount: f64) -> f64 {
        let scale = 10f64.powi(i32::from(self.decimal_places()));
        (amount * scale).round() / scale
    }

    /// Formats an amount with the currency's precision and code,
    /// e.g. `15000.00 SEK`.
    pub fn format_amount(&self, amount: f64) -> String {
        format!(
            "{:.*} {}",
            usize::from(self.decimal_places()),
            self.round(amount),
            self.code()
        )
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses ISO 4217 currency code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    /// Formats as ISO 4217 code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
