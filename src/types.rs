// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Output Type Definitions

use serde::{Deserialize, Serialize};

use crate::config::DataMode;

// ─── Series rows ─────────────────────────────────────────────────────────────

/// One day of storefront activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    /// ISO date, e.g. `2025-06-30`.
    pub date: String,
    /// Short weekday name, e.g. `Mon`.
    pub weekday: String,
    pub visitors: u64,
    pub orders: u64,
    pub revenue: u64,
    /// `revenue / orders`, display only.
    pub average_order_value: f64,
    /// Percent, one decimal.
    pub conversion_rate: f64,
    pub add_to_cart: u64,
    pub checkout: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: u64,
    pub orders: u64,
    /// Percent of total revenue, one decimal.
    pub share: f64,
    pub color: String,
}

/// Best sellers. A static table, not derived from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub name: String,
    pub category: String,
    pub units_sold: u64,
    pub price: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSource {
    pub source: String,
    pub visitors: u64,
    pub orders: u64,
    pub revenue: u64,
    /// Percent of total visitors, one decimal.
    pub share: f64,
    /// Percent, one decimal.
    pub conversion_rate: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTraffic {
    pub state: String,
    pub code: String,
    pub visitors: u64,
    pub orders: u64,
    pub revenue: u64,
    /// Percent of total visitors, one decimal.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub stage: String,
    pub count: u64,
    /// Percent of the top-of-funnel count.
    pub percentage: f64,
    /// Percent lost since the previous stage; 0 for the first stage.
    pub drop_off: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRanking {
    pub keyword: String,
    pub monthly_searches: u64,
    pub current_position: u32,
    pub projected_position: u32,
    pub current_traffic: u64,
    pub projected_traffic: u64,
}

// ─── Revenue projection ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSnapshot {
    pub monthly_visitors: u64,
    /// Percent, one decimal.
    pub conversion_rate: f64,
    pub average_order_value: f64,
    pub monthly_revenue: u64,
    pub annual_revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub area: String,
    /// Human-readable description of the change, e.g. `11,260 → 18,500 visitors (+64%)`.
    pub impact: String,
    /// Marginal monthly revenue attributed to this area.
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueProjection {
    pub current: RevenueSnapshot,
    pub projected: RevenueSnapshot,
    pub improvements: Vec<Improvement>,
}

// ─── KPI summaries ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryKpis {
    pub total_revenue: u64,
    pub total_orders: u64,
    pub average_order_value: f64,
    /// Percent, one decimal.
    pub conversion_rate: f64,
    pub total_visitors: u64,
    pub email_subscribers: u64,
    /// Percent, one decimal; second half of the period against the first.
    pub month_over_month_growth: f64,
    pub returning_customer_rate: f64,
    pub customer_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoGeoMetrics {
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
    pub missing_traffic_value: u64,
}

/// Where the checkout drop-off sits relative to the industry band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropoffStanding {
    BelowIndustry,
    WithinIndustry,
    AboveIndustry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    pub email_subscribers: u64,
    /// Percent, one decimal.
    pub cart_abandonment_rate: f64,
    /// Percent, one decimal.
    pub checkout_dropoff_rate: f64,
    pub industry_dropoff_low: f64,
    pub industry_dropoff_high: f64,
    pub standing: DropoffStanding,
    /// Percentage points above the industry high; 0 when within or below.
    pub excess_dropoff: f64,
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Every model and series, for a single hand-off to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub mode: DataMode,
    pub period_end: String,
    pub revenue_projection: RevenueProjection,
    pub summary: SummaryKpis,
    pub seo_geo: SeoGeoMetrics,
    pub engagement: EngagementSummary,
    pub daily: Vec<DailyMetric>,
    pub categories: Vec<CategoryRevenue>,
    pub top_products: Vec<TopProduct>,
    pub traffic_sources: Vec<TrafficSource>,
    pub funnel: Vec<FunnelStep>,
    pub states: Vec<StateTraffic>,
    pub keywords: Vec<KeywordRanking>,
}
