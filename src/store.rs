// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Metric Store

//! The metric store: the four parameter groups every derived series reads.
//!
//! A store is built once from the compiled-in fallback, optionally merged
//! with an override payload, and then only ever read. Merging is shallow
//! per group: an override field replaces exactly one fallback field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A logical inconsistency in a store. Never raised during generation;
/// reported by [`DemoMetricStore::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("{field}: projected value {projected} is below current value {current}")]
    ProjectedBelowCurrent {
        field: &'static str,
        current: f64,
        projected: f64,
    },

    #[error("{field}: rate {value} is outside [0, 1]")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("{field}: value {value} is negative")]
    Negative { field: &'static str, value: f64 },

    #[error("industry drop-off range is inverted (low {low} > high {high})")]
    InvertedRange { low: f64, high: f64 },
}

// ---------------------------------------------------------------------------
// Metric groups
// ---------------------------------------------------------------------------

/// Current-state snapshot of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineMetrics {
    /// Reported monthly revenue in dollars.
    pub monthly_revenue: Decimal,
    /// Monthly unique visitors.
    pub visitors: u64,
    /// Orders per visitor, in [0, 1].
    pub conversion_rate: f64,
    /// Average order value in dollars.
    pub average_order_value: Decimal,
}

/// Hypothetical post-improvement state used to compute uplift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionMetrics {
    pub visitors: u64,
    pub conversion_rate: f64,
    pub average_order_value: Decimal,
}

/// Search visibility scores, each paired with its projected value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoValueMetrics {
    pub organic_traffic: u64,
    pub projected_organic_traffic: u64,
    pub authority_score: f64,
    pub projected_authority_score: f64,
    pub ranking_keywords: u64,
    pub projected_ranking_keywords: u64,
    pub top_ten_keywords: u64,
    pub projected_top_ten_keywords: u64,
    pub local_seo_score: f64,
    pub projected_local_seo_score: f64,
    pub technical_seo_score: f64,
    pub projected_technical_seo_score: f64,
    pub content_score: f64,
    pub projected_content_score: f64,
    /// Monthly dollar value of organic traffic currently going to competitors.
    pub missing_traffic_value: Decimal,
}

/// Audience size and checkout funnel leakage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub email_subscribers: u64,
    pub cart_abandonment_rate: f64,
    pub checkout_dropoff_rate: f64,
    pub industry_dropoff_range_low: f64,
    pub industry_dropoff_range_high: f64,
}

/// Every parameter the engine derives its output from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoMetricStore {
    pub baseline: BaselineMetrics,
    pub projection: ProjectionMetrics,
    pub seo: SeoValueMetrics,
    pub engagement: EngagementMetrics,
}

impl Default for DemoMetricStore {
    fn default() -> Self {
        Self::fallback()
    }
}

impl DemoMetricStore {
    /// The compiled-in demo dataset.
    pub fn fallback() -> Self {
        Self {
            baseline: BaselineMetrics {
                monthly_revenue: dec!(78331),
                visitors: 11_260,
                conversion_rate: 0.011995,
                average_order_value: dec!(580),
            },
            projection: ProjectionMetrics {
                visitors: 18_500,
                conversion_rate: 0.0185,
                average_order_value: dec!(625),
            },
            seo: SeoValueMetrics {
                organic_traffic: 4_280,
                projected_organic_traffic: 9_850,
                authority_score: 18.0,
                projected_authority_score: 35.0,
                ranking_keywords: 312,
                projected_ranking_keywords: 1_150,
                top_ten_keywords: 24,
                projected_top_ten_keywords: 140,
                local_seo_score: 42.0,
                projected_local_seo_score: 85.0,
                technical_seo_score: 58.0,
                projected_technical_seo_score: 92.0,
                content_score: 47.0,
                projected_content_score: 88.0,
                missing_traffic_value: dec!(18400),
            },
            engagement: EngagementMetrics {
                email_subscribers: 2_840,
                cart_abandonment_rate: 0.74,
                checkout_dropoff_rate: 0.82,
                industry_dropoff_range_low: 0.60,
                industry_dropoff_range_high: 0.80,
            },
        }
    }

    /// Apply `overrides` field by field; absent fields keep this store's value.
    pub fn merged(&self, overrides: &MetricOverrides) -> Self {
        Self {
            baseline: overrides
                .baseline
                .as_ref()
                .map_or(self.baseline, |o| self.baseline.merged(o)),
            projection: overrides
                .projection
                .as_ref()
                .map_or(self.projection, |o| self.projection.merged(o)),
            seo: overrides
                .seo
                .as_ref()
                .map_or(self.seo, |o| self.seo.merged(o)),
            engagement: overrides
                .engagement
                .as_ref()
                .map_or(self.engagement, |o| self.engagement.merged(o)),
        }
    }

    /// Collect every logical inconsistency in the store.
    ///
    /// Generation does not depend on this passing; the engine only logs the
    /// result outside production.
    pub fn validate(&self) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        let b = &self.baseline;
        let p = &self.projection;
        let s = &self.seo;
        let e = &self.engagement;

        let money = [
            ("baseline.monthlyRevenue", b.monthly_revenue),
            ("baseline.averageOrderValue", b.average_order_value),
            ("projection.averageOrderValue", p.average_order_value),
            ("seo.missingTrafficValue", s.missing_traffic_value),
        ];
        for (field, amount) in money {
            check_non_negative(&mut violations, field, to_f64(amount));
        }

        let rates = [
            ("baseline.conversionRate", b.conversion_rate),
            ("projection.conversionRate", p.conversion_rate),
            ("engagement.cartAbandonmentRate", e.cart_abandonment_rate),
            ("engagement.checkoutDropoffRate", e.checkout_dropoff_rate),
            ("engagement.industryDropoffRangeLow", e.industry_dropoff_range_low),
            ("engagement.industryDropoffRangeHigh", e.industry_dropoff_range_high),
        ];
        for (field, rate) in rates {
            check_rate(&mut violations, field, rate);
        }
        if e.industry_dropoff_range_low > e.industry_dropoff_range_high {
            violations.push(InvariantViolation::InvertedRange {
                low: e.industry_dropoff_range_low,
                high: e.industry_dropoff_range_high,
            });
        }

        let pairs: [(&'static str, f64, f64); 10] = [
            ("visitors", b.visitors as f64, p.visitors as f64),
            ("conversionRate", b.conversion_rate, p.conversion_rate),
            ("averageOrderValue", to_f64(b.average_order_value), to_f64(p.average_order_value)),
            ("seo.organicTraffic", s.organic_traffic as f64, s.projected_organic_traffic as f64),
            ("seo.authorityScore", s.authority_score, s.projected_authority_score),
            ("seo.rankingKeywords", s.ranking_keywords as f64, s.projected_ranking_keywords as f64),
            ("seo.topTenKeywords", s.top_ten_keywords as f64, s.projected_top_ten_keywords as f64),
            ("seo.localSeoScore", s.local_seo_score, s.projected_local_seo_score),
            ("seo.technicalSeoScore", s.technical_seo_score, s.projected_technical_seo_score),
            ("seo.contentScore", s.content_score, s.projected_content_score),
        ];
        for (field, current, projected) in pairs {
            if projected < current {
                violations.push(InvariantViolation::ProjectedBelowCurrent {
                    field,
                    current,
                    projected,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn to_f64(d: Decimal) -> f64 {
    use num_traits::ToPrimitive;
    d.to_f64().unwrap_or(0.0)
}

fn check_non_negative(out: &mut Vec<InvariantViolation>, field: &'static str, value: f64) {
    if value < 0.0 {
        out.push(InvariantViolation::Negative { field, value });
    }
}

fn check_rate(out: &mut Vec<InvariantViolation>, field: &'static str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        out.push(InvariantViolation::RateOutOfRange { field, value });
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Partial store supplied by the host; every group and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricOverrides {
    #[serde(default)]
    pub baseline: Option<BaselineOverride>,
    #[serde(default)]
    pub projection: Option<ProjectionOverride>,
    #[serde(default)]
    pub seo: Option<SeoOverride>,
    #[serde(default)]
    pub engagement: Option<EngagementOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct BaselineOverride {
    pub monthly_revenue: Option<Decimal>,
    pub visitors: Option<u64>,
    pub conversion_rate: Option<f64>,
    pub average_order_value: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectionOverride {
    pub visitors: Option<u64>,
    pub conversion_rate: Option<f64>,
    pub average_order_value: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SeoOverride {
    pub organic_traffic: Option<u64>,
    pub projected_organic_traffic: Option<u64>,
    pub authority_score: Option<f64>,
    pub projected_authority_score: Option<f64>,
    pub ranking_keywords: Option<u64>,
    pub projected_ranking_keywords: Option<u64>,
    pub top_ten_keywords: Option<u64>,
    pub projected_top_ten_keywords: Option<u64>,
    pub local_seo_score: Option<f64>,
    pub projected_local_seo_score: Option<f64>,
    pub technical_seo_score: Option<f64>,
    pub projected_technical_seo_score: Option<f64>,
    pub content_score: Option<f64>,
    pub projected_content_score: Option<f64>,
    pub missing_traffic_value: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EngagementOverride {
    pub email_subscribers: Option<u64>,
    pub cart_abandonment_rate: Option<f64>,
    pub checkout_dropoff_rate: Option<f64>,
    pub industry_dropoff_range_low: Option<f64>,
    pub industry_dropoff_range_high: Option<f64>,
}

impl BaselineMetrics {
    fn merged(&self, o: &BaselineOverride) -> Self {
        Self {
            monthly_revenue: o.monthly_revenue.unwrap_or(self.monthly_revenue),
            visitors: o.visitors.unwrap_or(self.visitors),
            conversion_rate: o.conversion_rate.unwrap_or(self.conversion_rate),
            average_order_value: o.average_order_value.unwrap_or(self.average_order_value),
        }
    }
}

impl ProjectionMetrics {
    fn merged(&self, o: &ProjectionOverride) -> Self {
        Self {
            visitors: o.visitors.unwrap_or(self.visitors),
            conversion_rate: o.conversion_rate.unwrap_or(self.conversion_rate),
            average_order_value: o.average_order_value.unwrap_or(self.average_order_value),
        }
    }
}

impl SeoValueMetrics {
    fn merged(&self, o: &SeoOverride) -> Self {
        Self {
            organic_traffic: o.organic_traffic.unwrap_or(self.organic_traffic),
            projected_organic_traffic: o
                .projected_organic_traffic
                .unwrap_or(self.projected_organic_traffic),
            authority_score: o.authority_score.unwrap_or(self.authority_score),
            projected_authority_score: o
                .projected_authority_score
                .unwrap_or(self.projected_authority_score),
            ranking_keywords: o.ranking_keywords.unwrap_or(self.ranking_keywords),
            projected_ranking_keywords: o
                .projected_ranking_keywords
                .unwrap_or(self.projected_ranking_keywords),
            top_ten_keywords: o.top_ten_keywords.unwrap_or(self.top_ten_keywords),
            projected_top_ten_keywords: o
                .projected_top_ten_keywords
                .unwrap_or(self.projected_top_ten_keywords),
            local_seo_score: o.local_seo_score.unwrap_or(self.local_seo_score),
            projected_local_seo_score: o
                .projected_local_seo_score
                .unwrap_or(self.projected_local_seo_score),
            technical_seo_score: o.technical_seo_score.unwrap_or(self.technical_seo_score),
            projected_technical_seo_score: o
                .projected_technical_seo_score
                .unwrap_or(self.projected_technical_seo_score),
            content_score: o.content_score.unwrap_or(self.content_score),
            projected_content_score: o
                .projected_content_score
                .unwrap_or(self.projected_content_score),
            missing_traffic_value: o.missing_traffic_value.unwrap_or(self.missing_traffic_value),
        }
    }
}

impl EngagementMetrics {
    fn merged(&self, o: &EngagementOverride) -> Self {
        Self {
            email_subscribers: o.email_subscribers.unwrap_or(self.email_subscribers),
            cart_abandonment_rate: o.cart_abandonment_rate.unwrap_or(self.cart_abandonment_rate),
            checkout_dropoff_rate: o.checkout_dropoff_rate.unwrap_or(self.checkout_dropoff_rate),
            industry_dropoff_range_low: o
                .industry_dropoff_range_low
                .unwrap_or(self.industry_dropoff_range_low),
            industry_dropoff_range_high: o
                .industry_dropoff_range_high
                .unwrap_or(self.industry_dropoff_range_high),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_is_identity() {
        let fallback = DemoMetricStore::fallback();
        assert_eq!(fallback.merged(&MetricOverrides::default()), fallback);
    }

    #[test]
    fn single_field_override_keeps_siblings() {
        let fallback = DemoMetricStore::fallback();
        let overrides = MetricOverrides {
            baseline: Some(BaselineOverride {
                visitors: Some(20_000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = fallback.merged(&overrides);

        assert_eq!(merged.baseline.visitors, 20_000);
        assert_eq!(merged.baseline.average_order_value, dec!(580));
        assert_eq!(merged.baseline.monthly_revenue, dec!(78331));
        assert_eq!(merged.baseline.conversion_rate, 0.011995);
        assert_eq!(merged.projection, fallback.projection);
        assert_eq!(merged.seo, fallback.seo);
        assert_eq!(merged.engagement, fallback.engagement);
    }

    #[test]
    fn override_deserializes_from_camel_case() {
        let overrides: MetricOverrides = serde_json::from_str(
            r#"{"seo": {"projectedAuthorityScore": 50, "authorityScore": 22}}"#,
        )
        .expect("test: partial seo override should parse");
        let seo = overrides.seo.expect("test: seo group present");
        assert_eq!(seo.authority_score, Some(22.0));
        assert_eq!(seo.projected_authority_score, Some(50.0));
        assert_eq!(seo.organic_traffic, None);
        assert!(overrides.baseline.is_none());
    }

    #[test]
    fn unknown_override_keys_are_rejected() {
        for payload in [
            r#"{"seo": {"domainAuthority": 22}}"#,
            r#"{"baseline": {"vistors": 20000}}"#,
            r#"{"traffic": {}}"#,
        ] {
            assert!(
                serde_json::from_str::<MetricOverrides>(payload).is_err(),
                "accepted {payload}"
            );
        }
    }

    #[test]
    fn fallback_is_consistent() {
        assert_eq!(DemoMetricStore::fallback().validate(), Ok(()));
    }

    #[test]
    fn unguarded_override_is_reported_by_validate() {
        let overrides = MetricOverrides {
            seo: Some(SeoOverride {
                projected_authority_score: Some(10.0),
                ..Default::default()
            }),
            engagement: Some(EngagementOverride {
                industry_dropoff_range_low: Some(0.9),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = DemoMetricStore::fallback().merged(&overrides);
        let violations = merged.validate().expect_err("test: override is inconsistent");

        assert!(violations.contains(&InvariantViolation::ProjectedBelowCurrent {
            field: "seo.authorityScore",
            current: 18.0,
            projected: 10.0,
        }));
        assert!(violations.contains(&InvariantViolation::InvertedRange {
            low: 0.9,
            high: 0.80,
        }));
    }

    #[test]
    fn rate_outside_unit_interval_is_reported() {
        let mut store = DemoMetricStore::fallback();
        store.baseline.conversion_rate = 1.5;
        let violations = store.validate().expect_err("test: rate out of range");
        assert!(violations.iter().any(|v| matches!(
            v,
            InvariantViolation::RateOutOfRange { field: "baseline.conversionRate", .. }
        )));
    }
}
