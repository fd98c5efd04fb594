//! Coupon payoff styles of income barrier events.

use std::fmt;

/// How an income barrier event turns its coupon schedule into a payoff.
///
/// # Variants
/// - `Fixed`: the coupon of the range the asset level falls in
/// - `RelativeToValue`: `(level - reference_value) * coupon`
/// - `RelativeToBarrier`: `(level - barrier_levels[barrier_index]) * coupon`
/// - `FixedWithMemoryFromValue`: fixed coupon; a missed observation stores
///   `stored_value` for the next executing event to recover
/// - `FixedWithMemoryFromPayoffLevel`: fixed coupon; a missed observation
///   stores `coupon_payoffs[payoff_index]`
///
/// # Examples
/// ```
/// use note_models::instruments::PayoffStyle;
///
/// let style = PayoffStyle::FixedWithMemoryFromPayoffLevel { payoff_index: 1 };
/// assert!(style.is_memory());
/// assert_eq!(style.name(), "fixedWithMemoryFromPayoffLevel");
/// assert_eq!(style.memory_amount(&[0.0, 0.03]), 0.03);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayoffStyle {
    /// Fixed coupon per range.
    Fixed,
    /// Coupon scaled by the distance to a reference level.
    RelativeToValue {
        /// Reference level (ratio of the fixing)
        reference_value: f64,
    },
    /// Coupon scaled by the distance to one of the event's barriers.
    RelativeToBarrier {
        /// Index into the event's barrier levels
        barrier_index: usize,
    },
    /// Fixed coupon with a stored amount carried forward when missed.
    FixedWithMemoryFromValue {
        /// Amount stored when the event does not execute
        stored_value: f64,
    },
    /// Fixed coupon carrying one of its own coupon levels forward when missed.
    FixedWithMemoryFromPayoffLevel {
        /// Index into the event's coupon payoffs
        payoff_index: usize,
    },
}

impl PayoffStyle {
    /// Style names as they appear in product definitions.
    pub const NAMES: [&'static str; 5] = [
        "fixed",
        "relativeToValue",
        "relativeToBarrier",
        "fixedWithMemoryFromValue",
        "fixedWithMemoryFromPayoffLevel",
    ];

    /// Returns the style name used in product definitions.
    pub fn name(&self) -> &'static str {
        match self {
            PayoffStyle::Fixed => Self::NAMES[0],
            PayoffStyle::RelativeToValue { .. } => Self::NAMES[1],
            PayoffStyle::RelativeToBarrier { .. } => Self::NAMES[2],
            PayoffStyle::FixedWithMemoryFromValue { .. } => Self::NAMES[3],
            PayoffStyle::FixedWithMemoryFromPayoffLevel { .. } => Self::NAMES[4],
        }
    }

    /// Returns whether a missed observation stores an amount for later recovery.
    #[inline]
    pub fn is_memory(&self) -> bool {
        matches!(
            self,
            PayoffStyle::FixedWithMemoryFromValue { .. }
                | PayoffStyle::FixedWithMemoryFromPayoffLevel { .. }
        )
    }

    /// Amount a missed observation stores; zero for styles without memory.
    ///
    /// # Panics
    /// Panics if `payoff_index` is out of range for `coupon_payoffs`
    /// (validated when an event spec is constructed).
    pub fn memory_amount(&self, coupon_payoffs: &[f64]) -> f64 {
        match self {
            PayoffStyle::FixedWithMemoryFromValue { stored_value } => *stored_value,
            PayoffStyle::FixedWithMemoryFromPayoffLevel { payoff_index } => {
                coupon_payoffs[*payoff_index]
            }
            PayoffStyle::Fixed
            | PayoffStyle::RelativeToValue { .. }
            | PayoffStyle::RelativeToBarrier { .. } => 0.0,
        }
    }
}

impl fmt::Display for PayoffStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
