// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Revenue Formula

//! Revenue formula and the additive uplift breakdown built on it.
//!
//! ```text
//! revenue = round(visitors * conversion_rate * average_order_value)
//! ```
//!
//! The same formula prices the current state, the projected state and the
//! single-factor "what-if" states in between, so the per-factor deltas sum
//! exactly to `projected - current`.

use num_traits::ToPrimitive;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::store::{BaselineMetrics, ProjectionMetrics};

/// Relative deviation tolerated between the configured and recomputed
/// baseline revenue before the self-check complains.
pub const RECONCILIATION_TOLERANCE: Decimal = dec!(0.005);

/// Convert f64 to Decimal; non-finite values become zero.
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Round to a whole number, half away from zero, clamped at zero.
pub fn round_whole(amount: Decimal) -> u64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// Monthly revenue for a traffic/conversion/basket combination.
///
/// Total over its inputs: a negative or non-finite conversion rate prices
/// at zero, and a product too large for `Decimal` falls back to f64.
pub fn monthly_revenue(visitors: u64, conversion_rate: f64, average_order_value: Decimal) -> u64 {
    let product = Decimal::from(visitors)
        .checked_mul(to_decimal(conversion_rate))
        .and_then(|orders| orders.checked_mul(average_order_value));
    match product {
        Some(revenue) => round_whole(revenue),
        None => {
            let revenue = visitors as f64 * conversion_rate * from_decimal(average_order_value);
            if revenue.is_finite() && revenue > 0.0 {
                revenue.round() as u64
            } else {
                0
            }
        }
    }
}

/// Whole orders implied by a traffic figure and a conversion rate.
pub fn monthly_orders(visitors: u64, conversion_rate: f64) -> u64 {
    match Decimal::from(visitors).checked_mul(to_decimal(conversion_rate)) {
        Some(orders) => round_whole(orders),
        None => {
            let orders = visitors as f64 * conversion_rate;
            if orders.is_finite() && orders > 0.0 {
                orders.round() as u64
            } else {
                0
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// One point in the traffic/conversion/basket space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueScenario {
    pub visitors: u64,
    pub conversion_rate: f64,
    pub average_order_value: Decimal,
}

impl RevenueScenario {
    pub fn monthly_revenue(&self) -> u64 {
        monthly_revenue(self.visitors, self.conversion_rate, self.average_order_value)
    }

    pub fn monthly_orders(&self) -> u64 {
        monthly_orders(self.visitors, self.conversion_rate)
    }
}

impl From<&BaselineMetrics> for RevenueScenario {
    fn from(b: &BaselineMetrics) -> Self {
        Self {
            visitors: b.visitors,
            conversion_rate: b.conversion_rate,
            average_order_value: b.average_order_value,
        }
    }
}

impl From<&ProjectionMetrics> for RevenueScenario {
    fn from(p: &ProjectionMetrics) -> Self {
        Self {
            visitors: p.visitors,
            conversion_rate: p.conversion_rate,
            average_order_value: p.average_order_value,
        }
    }
}

// ---------------------------------------------------------------------------
// Uplift breakdown
// ---------------------------------------------------------------------------

/// The lever an improvement is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImprovementArea {
    OrganicTraffic,
    ConversionRate,
    AverageOrderValue,
}

impl ImprovementArea {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrganicTraffic => "SEO & Organic Traffic",
            Self::ConversionRate => "Conversion Rate Optimization",
            Self::AverageOrderValue => "Average Order Value",
        }
    }
}

/// Revenue at each step of moving from the baseline to the projection one
/// factor at a time: traffic first, then conversion, then basket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpliftBreakdown {
    pub current: u64,
    pub traffic_only: u64,
    pub traffic_and_conversion: u64,
    pub projected: u64,
}

impl UpliftBreakdown {
    pub fn compute(baseline: &BaselineMetrics, projection: &ProjectionMetrics) -> Self {
        let current = RevenueScenario::from(baseline);
        let projected = RevenueScenario::from(projection);

        let traffic_only = RevenueScenario {
            visitors: projected.visitors,
            ..current
        };
        let traffic_and_conversion = RevenueScenario {
            conversion_rate: projected.conversion_rate,
            ..traffic_only
        };

        Self {
            current: current.monthly_revenue(),
            traffic_only: traffic_only.monthly_revenue(),
            traffic_and_conversion: traffic_and_conversion.monthly_revenue(),
            projected: projected.monthly_revenue(),
        }
    }

    /// Marginal revenue of each lever. Sums to [`Self::total_delta`].
    pub fn deltas(&self) -> [(ImprovementArea, i64); 3] {
        [
            (ImprovementArea::OrganicTraffic, signed_delta(self.traffic_only, self.current)),
            (
                ImprovementArea::ConversionRate,
                signed_delta(self.traffic_and_conversion, self.traffic_only),
            ),
            (
                ImprovementArea::AverageOrderValue,
                signed_delta(self.projected, self.traffic_and_conversion),
            ),
        ]
    }

    pub fn total_delta(&self) -> i64 {
        signed_delta(self.projected, self.current)
    }
}

/// `to - from`, saturating at the ends of `i64`.
fn signed_delta(to: u64, from: u64) -> i64 {
    let delta = i128::from(to) - i128::from(from);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

// ---------------------------------------------------------------------------
// Baseline reconciliation
// ---------------------------------------------------------------------------

/// Configured baseline revenue versus the formula's answer for the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReconciliation {
    pub configured: u64,
    pub recomputed: u64,
    /// `|configured - recomputed| / configured`; zero when both are zero.
    pub relative_deviation: f64,
    pub within_tolerance: bool,
}

pub fn reconcile_baseline(baseline: &BaselineMetrics) -> RevenueReconciliation {
    let configured = round_whole(baseline.monthly_revenue);
    let recomputed = RevenueScenario::from(baseline).monthly_revenue();
    let diff = Decimal::from(configured.abs_diff(recomputed));
    let deviation = if configured == 0 {
        if recomputed == 0 {
            Decimal::ZERO
        } else {
            Decimal::ONE
        }
    } else {
        diff / Decimal::from(configured)
    };

    RevenueReconciliation {
        configured,
        recomputed,
        relative_deviation: from_decimal(deviation),
        within_tolerance: deviation <= RECONCILIATION_TOLERANCE,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DemoMetricStore;

    #[test]
    fn formula_matches_literal_cases() {
        assert_eq!(monthly_revenue(11_260, 0.011995, dec!(580)), 78_337);
        assert_eq!(monthly_revenue(1_000, 0.02, dec!(50)), 1_000);
        assert_eq!(monthly_revenue(0, 0.5, dec!(100)), 0);
        assert_eq!(monthly_revenue(100, 0.0, dec!(100)), 0);
        // 3 * 0.5 * 1 = 1.5 rounds up
        assert_eq!(monthly_revenue(3, 0.5, dec!(1)), 2);
        assert_eq!(monthly_revenue(18_500, 0.0185, dec!(625)), 213_906);
    }

    #[test]
    fn degenerate_rates_price_at_zero() {
        assert_eq!(monthly_revenue(1_000, -0.1, dec!(50)), 0);
        assert_eq!(monthly_revenue(1_000, f64::NAN, dec!(50)), 0);
    }

    #[test]
    fn orders_round_from_traffic() {
        assert_eq!(monthly_orders(11_260, 0.011995), 135);
        assert_eq!(monthly_orders(18_500, 0.0185), 342);
    }

    #[test]
    fn deltas_sum_to_total() {
        let store = DemoMetricStore::fallback();
        let breakdown = UpliftBreakdown::compute(&store.baseline, &store.projection);
        let sum: i64 = breakdown.deltas().iter().map(|(_, d)| d).sum();
        assert_eq!(sum, breakdown.total_delta());
        assert_eq!(breakdown.current, 78_337);
        assert_eq!(breakdown.traffic_only, 128_706);
        assert_eq!(breakdown.traffic_and_conversion, 198_505);
        assert_eq!(breakdown.projected, 213_906);
    }

    #[test]
    fn regression_yields_negative_delta() {
        let store = DemoMetricStore::fallback();
        let mut projection = store.projection;
        projection.visitors = 5_000;
        let breakdown = UpliftBreakdown::compute(&store.baseline, &projection);
        assert!(breakdown.deltas()[0].1 < 0);
        let sum: i64 = breakdown.deltas().iter().map(|(_, d)| d).sum();
        assert_eq!(sum, breakdown.total_delta());
    }

    #[test]
    fn deltas_saturate_instead_of_wrapping() {
        assert_eq!(signed_delta(u64::MAX, 0), i64::MAX);
        assert_eq!(signed_delta(0, u64::MAX), i64::MIN);
        assert_eq!(signed_delta(5, 8), -3);
    }

    #[test]
    fn fallback_baseline_reconciles() {
        let store = DemoMetricStore::fallback();
        let check = reconcile_baseline(&store.baseline);
        assert_eq!(check.configured, 78_331);
        assert_eq!(check.recomputed, 78_337);
        assert!(check.within_tolerance, "deviation {}", check.relative_deviation);
    }

    #[test]
    fn hand_edited_baseline_fails_reconciliation() {
        let mut store = DemoMetricStore::fallback();
        store.baseline.monthly_revenue = dec!(95000);
        assert!(!reconcile_baseline(&store.baseline).within_tolerance);
    }
}
