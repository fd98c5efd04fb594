//! # Note Models (L2: Business Logic)
//!
//! Payoff evaluation for capital-protected structured notes with
//! income barrier coupons.
//!
//! This crate provides:
//! - Product terms and income barrier event definitions
//! - The payoff rule evaluator for every payoff style
//! - The memory ledger that carries missed coupons forward
//! - Event sequences evaluated against an asset price series
//! - The simulation model and its projections for chart rendering
//!
//! ## Design Principles
//!
//! - **Enum-based payoff styles** checked exhaustively at compile time
//! - **Index links** between events instead of shared references
//! - **Fresh state per evaluation pass**, replacing the previous one whole
//!
//! ## Example
//!
//! ```
//! use note_core::market_data::{PricePoint, PriceSeries};
//! use note_core::types::{Currency, Date};
//! use note_models::instruments::{IncomeBarrierEventSpec, PayoffStyle, ProductTerms};
//! use note_models::simulation::SimulationModel;
//!
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let terms = ProductTerms::builder()
//!     .notional(10_000.0)
//!     .currency(Currency::SEK)
//!     .start_level(1.0)
//!     .participation_rate(0.5)
//!     .start_date(start)
//!     .final_maturity_date(Date::from_ymd(2026, 1, 2).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let coupon = IncomeBarrierEventSpec::new(
//!     Date::from_ymd(2025, 1, 2).unwrap(),
//!     vec![1.0],
//!     vec![0.0, 0.05],
//!     PayoffStyle::Fixed,
//! )
//! .unwrap();
//!
//! let mut model = SimulationModel::new(terms, vec![coupon]).unwrap();
//! model.set_asset_data(PriceSeries::new(vec![
//!     PricePoint::new(start, 200.0),
//!     PricePoint::new(Date::from_ymd(2025, 1, 2).unwrap(), 240.0),
//! ]));
//!
//! let executed = model.executed_events();
//! assert_eq!(executed.len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod simulation;
