//! Simulation of a note against asset price history.
//!
//! - [`SimulationModel`]: owns the product, rebuilds event states whenever
//!   asset data is replaced and exposes read-only projections
//! - [`ChartData`] and friends: plain data tuples for a chart renderer
//! - `input` (feature `serde`): the plain-data product definition format

mod chart;
#[cfg(feature = "serde")]
mod input;
mod model;

pub use chart::{ChartData, EventMarker, LevelLines, LevelPoint, PayoffRangeBand, TimeRange};
#[cfg(feature = "serde")]
pub use input::{
    asset_series, AssetRecord, IncomeBarrierEventDefinition, KeyDates, PayoffData, ProductDefinition,
    ProductTermsDefinition,
};
pub use model::SimulationModel;
