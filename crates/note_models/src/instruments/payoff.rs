//! Payoff rule evaluation for income barrier observations.
//!
//! An event's barrier levels split the positive axis into ranges:
//! `(0, b0]`, `(b0, b1]`, ..., `(b_last, +inf)`. A level exactly on a
//! barrier belongs to the lower range. Range `0` never executes; every
//! higher range pays its own entry of the coupon schedule.

use super::payoff_style::PayoffStyle;

/// Result of evaluating one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffOutcome {
    /// Range the asset level fell in.
    pub range_index: usize,
    /// Whether the level cleared the lowest barrier.
    pub executed: bool,
    /// Payoff before any memory recovery.
    pub payoff: f64,
}

/// A band of asset levels and the coupon it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PayoffRange {
    /// Lower bound (exclusive, except the floor at zero).
    pub min: f64,
    /// Upper bound (inclusive); `+inf` for the top range.
    pub max: f64,
    /// Coupon of this range.
    pub payoff: f64,
}

/// Finds the range an asset level falls in.
///
/// Levels that are not strictly positive (including NaN) fall in range `0`.
///
/// # Examples
/// ```
/// use note_models::instruments::range_index;
///
/// let barriers = [0.8, 1.0];
/// assert_eq!(range_index(0.7, &barriers), 0);
/// assert_eq!(range_index(0.8, &barriers), 0);
/// assert_eq!(range_index(0.9, &barriers), 1);
/// assert_eq!(range_index(1.3, &barriers), 2);
/// ```
pub fn range_index(asset_level: f64, barrier_levels: &[f64]) -> usize {
    if asset_level.is_nan() || asset_level <= 0.0 {
        return 0;
    }
    barrier_levels.partition_point(|&barrier| barrier < asset_level)
}

/// Evaluates the payoff of one observation.
///
/// # Arguments
/// * `asset_level` - Observed level as a ratio of the fixing
/// * `barrier_levels` - Ascending barrier levels
/// * `coupon_payoffs` - One coupon per range (`barrier_levels.len() + 1`)
/// * `style` - How the coupon becomes a payoff
///
/// Callers must pass a schedule validated by
/// [`IncomeBarrierEventSpec::new`](super::IncomeBarrierEventSpec::new):
/// one coupon per range and style indices in bounds.
pub(crate) fn evaluate_payoff(
    asset_level: f64,
    barrier_levels: &[f64],
    coupon_payoffs: &[f64],
    style: PayoffStyle,
) -> PayoffOutcome {
    let range_index = range_index(asset_level, barrier_levels);
    let executed = range_index > 0;
    if !executed {
        return PayoffOutcome {
            range_index,
            executed,
            payoff: 0.0,
        };
    }

    let coupon = coupon_payoffs[range_index];
    let payoff = match style {
        PayoffStyle::Fixed
        | PayoffStyle::FixedWithMemoryFromValue { .. }
        | PayoffStyle::FixedWithMemoryFromPayoffLevel { .. } => coupon,
        PayoffStyle::RelativeToValue { reference_value } => (asset_level - reference_value) * coupon,
        PayoffStyle::RelativeToBarrier { barrier_index } => {
            (asset_level - barrier_levels[barrier_index]) * coupon
        }
    };

    PayoffOutcome {
        range_index,
        executed,
        payoff,
    }
}

/// Builds the full range table of a barrier/coupon schedule.
///
/// # Examples
/// ```
/// use note_models::instruments::payoff_ranges;
///
/// let ranges = payoff_ranges(&[1.0], &[0.0, 0.05]);
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].min, ranges[0].max), (0.0, 1.0));
/// assert!(ranges[1].max.is_infinite());
/// assert_eq!(ranges[1].payoff, 0.05);
/// ```
pub fn payoff_ranges(barrier_levels: &[f64], coupon_payoffs: &[f64]) -> Vec<PayoffRange> {
    let lows = std::iter::once(0.0).chain(barrier_levels.iter().copied());
    let highs = barrier_levels.iter().copied().chain(std::iter::once(f64::INFINITY));

    lows.zip(highs)
        .zip(coupon_payoffs.iter().copied())
        .map(|((min, max), payoff)| PayoffRange { min, max, payoff })
        .collect()
}
