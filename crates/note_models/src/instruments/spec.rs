//! Income barrier event definitions.

use note_core::types::Date;

use super::error::ConfigurationError;
use super::payoff::{evaluate_payoff, payoff_ranges, PayoffOutcome, PayoffRange};
use super::payoff_style::PayoffStyle;
use super::terms::finite;

/// A scheduled income barrier observation, validated at construction.
///
/// # Invariants
/// - `barrier_levels` are finite and ascending
/// - `coupon_payoffs.len() == barrier_levels.len() + 1`
/// - style indices refer to existing barriers/coupons
///
/// # Examples
/// ```
/// use note_core::types::Date;
/// use note_models::instruments::{ConfigurationError, IncomeBarrierEventSpec, PayoffStyle};
///
/// let date = Date::from_ymd(2025, 1, 2).unwrap();
/// let spec = IncomeBarrierEventSpec::new(date, vec![1.0], vec![0.0, 0.05], PayoffStyle::Fixed);
/// assert!(spec.is_ok());
///
/// let mismatched = IncomeBarrierEventSpec::new(date, vec![1.0], vec![0.05], PayoffStyle::Fixed);
/// assert!(matches!(mismatched, Err(ConfigurationError::CouponLengthMismatch { .. })));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeBarrierEventSpec {
    planned_date: Date,
    barrier_levels: Vec<f64>,
    coupon_payoffs: Vec<f64>,
    payoff_style: PayoffStyle,
}

impl IncomeBarrierEventSpec {
    /// Creates and validates an event spec.
    ///
    /// # Errors
    /// - [`ConfigurationError::NonFiniteValue`] for NaN/infinite inputs
    /// - [`ConfigurationError::NonAscendingBarriers`] for unsorted barriers
    /// - [`ConfigurationError::CouponLengthMismatch`] unless there is one coupon per range
    /// - [`ConfigurationError::BarrierIndexOutOfRange`] / [`ConfigurationError::PayoffIndexOutOfRange`]
    ///   for style indices that point nowhere
    pub fn new(
        planned_date: Date,
        barrier_levels: Vec<f64>,
        coupon_payoffs: Vec<f64>,
        payoff_style: PayoffStyle,
    ) -> Result<Self, ConfigurationError> {
        for &level in &barrier_levels {
            finite("incomeBarriers", level)?;
        }
        for &coupon in &coupon_payoffs {
            finite("couponPayoffs", coupon)?;
        }
        if barrier_levels.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigurationError::NonAscendingBarriers {
                date: planned_date,
                levels: barrier_levels,
            });
        }
        if coupon_payoffs.len() != barrier_levels.len() + 1 {
            return Err(ConfigurationError::CouponLengthMismatch {
                date: planned_date,
                barriers: barrier_levels.len(),
                coupons: coupon_payoffs.len(),
            });
        }

        match payoff_style {
            PayoffStyle::Fixed => {}
            PayoffStyle::RelativeToValue { reference_value } => {
                finite("payoffData.referenceValue", reference_value)?;
            }
            PayoffStyle::FixedWithMemoryFromValue { stored_value } => {
                finite("payoffData.storedValue", stored_value)?;
            }
            PayoffStyle::RelativeToBarrier { barrier_index } => {
                if barrier_index >= barrier_levels.len() {
                    return Err(ConfigurationError::BarrierIndexOutOfRange {
                        date: planned_date,
                        index: barrier_index,
                        barriers: barrier_levels.len(),
                    });
                }
            }
            PayoffStyle::FixedWithMemoryFromPayoffLevel { payoff_index } => {
                if payoff_index >= coupon_payoffs.len() {
                    return Err(ConfigurationError::PayoffIndexOutOfRange {
                        date: planned_date,
                        index: payoff_index,
                        coupons: coupon_payoffs.len(),
                    });
                }
            }
        }

        Ok(Self {
            planned_date,
            barrier_levels,
            coupon_payoffs,
            payoff_style,
        })
    }

    /// Scheduled observation date.
    #[inline]
    pub fn planned_date(&self) -> Date {
        self.planned_date
    }

    /// Ascending barrier levels.
    #[inline]
    pub fn barrier_levels(&self) -> &[f64] {
        &self.barrier_levels
    }

    /// Coupon per range, lowest range first.
    #[inline]
    pub fn coupon_payoffs(&self) -> &[f64] {
        &self.coupon_payoffs
    }

    /// Payoff style.
    #[inline]
    pub fn payoff_style(&self) -> PayoffStyle {
        self.payoff_style
    }

    /// Amount stored when this event does not execute.
    pub fn memory_amount(&self) -> f64 {
        self.payoff_style.memory_amount(&self.coupon_payoffs)
    }

    /// Evaluates the base payoff (without memory recovery) at `asset_level`.
    ///
    /// # Examples
    /// ```
    /// use note_core::types::Date;
    /// use note_models::instruments::{IncomeBarrierEventSpec, PayoffStyle};
    ///
    /// let date = Date::from_ymd(2025, 1, 2).unwrap();
    /// let spec = IncomeBarrierEventSpec::new(date, vec![1.0], vec![0.0, 0.05], PayoffStyle::Fixed).unwrap();
    ///
    /// let outcome = spec.evaluate(1.2);
    /// assert!(outcome.executed);
    /// assert_eq!(outcome.payoff, 0.05);
    ///
    /// let outcome = spec.evaluate(0.9);
    /// assert!(!outcome.executed);
    /// assert_eq!(outcome.payoff, 0.0);
    /// ```
    pub fn evaluate(&self, asset_level: f64) -> PayoffOutcome {
        evaluate_payoff(
            asset_level,
            &self.barrier_levels,
            &self.coupon_payoffs,
            self.payoff_style,
        )
    }

    /// Static range table, independent of any observation.
    pub fn payoff_ranges(&self) -> Vec<PayoffRange> {
        payoff_ranges(&self.barrier_levels, &self.coupon_payoffs)
    }
}
