// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Derived Model Assemblers

//! Models consumed by the rendering layer.
//!
//! Assemblers select and lightly round fields; all arithmetic lives in
//! [`crate::revenue`] and [`crate::series`].

use crate::format::{currency, grouped, one_decimal, percent, signed_change};
use crate::revenue::{
    from_decimal, monthly_orders, round_whole, ImprovementArea, RevenueScenario, UpliftBreakdown,
};
use crate::store::DemoMetricStore;
use crate::types::{
    DailyMetric, DropoffStanding, EngagementSummary, Improvement, RevenueProjection,
    RevenueSnapshot, SeoGeoMetrics, SummaryKpis,
};

/// Share of orders from returning customers, percent.
pub const RETURNING_CUSTOMER_RATE: f64 = 28.4;
/// Average review score out of 5.
pub const CUSTOMER_SATISFACTION: f64 = 4.8;

// ─── Revenue projection ──────────────────────────────────────────────────────

/// Current versus projected revenue with a per-lever uplift breakdown.
///
/// Both snapshots are priced by the revenue formula, so the improvement
/// rows sum to `projected.monthly_revenue - current.monthly_revenue`.
pub fn revenue_projection(store: &DemoMetricStore) -> RevenueProjection {
    let current = RevenueScenario::from(&store.baseline);
    let projected = RevenueScenario::from(&store.projection);
    let breakdown = UpliftBreakdown::compute(&store.baseline, &store.projection);

    let improvements = breakdown
        .deltas()
        .iter()
        .map(|&(area, revenue)| Improvement {
            area: area.label().to_string(),
            impact: impact_text(area, &current, &projected),
            revenue,
        })
        .collect();

    RevenueProjection {
        current: snapshot(&current, breakdown.current),
        projected: snapshot(&projected, breakdown.projected),
        improvements,
    }
}

fn snapshot(scenario: &RevenueScenario, monthly_revenue: u64) -> RevenueSnapshot {
    RevenueSnapshot {
        monthly_visitors: scenario.visitors,
        conversion_rate: percent(scenario.conversion_rate),
        average_order_value: from_decimal(scenario.average_order_value),
        monthly_revenue,
        annual_revenue: monthly_revenue.saturating_mul(12),
    }
}

fn impact_text(
    area: ImprovementArea,
    current: &RevenueScenario,
    projected: &RevenueScenario,
) -> String {
    match area {
        ImprovementArea::OrganicTraffic => format!(
            "{} → {} monthly visitors ({})",
            grouped(current.visitors),
            grouped(projected.visitors),
            signed_change(current.visitors as f64, projected.visitors as f64),
        ),
        ImprovementArea::ConversionRate => format!(
            "{}% → {}% conversion rate",
            percent(current.conversion_rate),
            percent(projected.conversion_rate),
        ),
        ImprovementArea::AverageOrderValue => {
            let from = round_whole(current.average_order_value);
            let to = round_whole(projected.average_order_value);
            format!(
                "{} → {} average order ({})",
                currency(from as i64),
                currency(to as i64),
                signed_change(from as f64, to as f64),
            )
        }
    }
}

// ─── Summary KPIs ────────────────────────────────────────────────────────────

pub fn summary_kpis(store: &DemoMetricStore, daily: &[DailyMetric]) -> SummaryKpis {
    let baseline = &store.baseline;
    SummaryKpis {
        total_revenue: round_whole(baseline.monthly_revenue),
        total_orders: monthly_orders(baseline.visitors, baseline.conversion_rate),
        average_order_value: from_decimal(baseline.average_order_value),
        conversion_rate: percent(baseline.conversion_rate),
        total_visitors: baseline.visitors,
        email_subscribers: store.engagement.email_subscribers,
        month_over_month_growth: period_growth(daily),
        returning_customer_rate: RETURNING_CUSTOMER_RATE,
        customer_satisfaction: CUSTOMER_SATISFACTION,
    }
}

/// Revenue growth of the second half of the series over the first, percent.
pub fn period_growth(daily: &[DailyMetric]) -> f64 {
    let (first, second) = daily.split_at(daily.len() / 2);
    let early: u64 = first.iter().map(|d| d.revenue).sum();
    let late: u64 = second.iter().map(|d| d.revenue).sum();
    if early == 0 {
        0.0
    } else {
        one_decimal((late as f64 - early as f64) / early as f64 * 100.0)
    }
}

// ─── SEO / GEO ───────────────────────────────────────────────────────────────

pub fn seo_geo_metrics(store: &DemoMetricStore) -> SeoGeoMetrics {
    let s = &store.seo;
    SeoGeoMetrics {
        organic_traffic: s.organic_traffic,
        projected_organic_traffic: s.projected_organic_traffic,
        authority_score: s.authority_score,
        projected_authority_score: s.projected_authority_score,
        ranking_keywords: s.ranking_keywords,
        projected_ranking_keywords: s.projected_ranking_keywords,
        top_ten_keywords: s.top_ten_keywords,
        projected_top_ten_keywords: s.projected_top_ten_keywords,
        local_seo_score: s.local_seo_score,
        projected_local_seo_score: s.projected_local_seo_score,
        technical_seo_score: s.technical_seo_score,
        projected_technical_seo_score: s.projected_technical_seo_score,
        content_score: s.content_score,
        projected_content_score: s.projected_content_score,
        missing_traffic_value: round_whole(s.missing_traffic_value),
    }
}

// ─── Engagement ──────────────────────────────────────────────────────────────

pub fn engagement_summary(store: &DemoMetricStore) -> EngagementSummary {
    let e = &store.engagement;
    let standing = if e.checkout_dropoff_rate > e.industry_dropoff_range_high {
        DropoffStanding::AboveIndustry
    } else if e.checkout_dropoff_rate < e.industry_dropoff_range_low {
        DropoffStanding::BelowIndustry
    } else {
        DropoffStanding::WithinIndustry
    };
    let excess_dropoff = match standing {
        DropoffStanding::AboveIndustry => {
            percent(e.checkout_dropoff_rate - e.industry_dropoff_range_high)
        }
        _ => 0.0,
    };

    EngagementSummary {
        email_subscribers: e.email_subscribers,
        cart_abandonment_rate: percent(e.cart_abandonment_rate),
        checkout_dropoff_rate: percent(e.checkout_dropoff_rate),
        industry_dropoff_low: percent(e.industry_dropoff_range_low),
        industry_dropoff_high: percent(e.industry_dropoff_range_high),
        standing,
        excess_dropoff,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
