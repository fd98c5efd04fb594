//! # note_core: Foundation Types for Structured Note Simulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! note_core is the bottom layer of the note workspace, providing:
//! - Time types: `Date`, `Tenor` (`types::time`)
//! - Currency types: `Currency` (`types::currency`)
//! - Error types: `DateError`, `CurrencyError` (`types::error`)
//! - Asset price series and observation alignment (`market_data`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other note_* crates:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use note_core::market_data::{PricePoint, PriceSeries, Resolution};
//! use note_core::types::{Currency, Date};
//!
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let series = PriceSeries::new(vec![
//!     PricePoint::new(start, 250.0),
//!     PricePoint::new(Date::from_ymd(2024, 1, 5).unwrap(), 275.0),
//! ]);
//!
//! // Nearest prior price for a date without a quote
//! let target = Date::from_ymd(2024, 1, 4).unwrap();
//! match series.resolve(target) {
//!     Resolution::Available(price) => assert_eq!(price.date, start),
//!     Resolution::NotYetAvailable => unreachable!(),
//! }
//!
//! // Levels relative to the fixing on the start date
//! let end = Date::from_ymd(2024, 12, 31).unwrap();
//! let normalized = series.normalize(start, end).unwrap();
//! assert_eq!(normalized.points()[1].value, 1.1);
//!
//! assert_eq!(Currency::SEK.decimal_places(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, Currency, PricePoint

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
