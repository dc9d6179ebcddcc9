// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Series Generators

//! Time series and categorical breakdowns.
//!
//! Every column is produced by one call to [`allocate`] against its own
//! governing total, so each column sums exactly to that total. Columns are
//! deliberately independent: daily revenue is not recomputed from daily
//! visitors and orders, which is why daily AOV is a display value only.

use jiff::civil::{Date, Weekday};
use jiff::ToSpan;
use std::f64::consts::PI;

use crate::allocation::{allocate, allocate_by};
use crate::format::{one_decimal, percent, share_percent};
use crate::revenue::{monthly_orders, round_whole};
use crate::store::DemoMetricStore;
use crate::types::{
    CategoryRevenue, DailyMetric, FunnelStep, KeywordRanking, StateTraffic, TopProduct,
    TrafficSource,
};

// ─── Constants ───────────────────────────────────────────────────────────────

/// Days in the daily series.
pub const DAYS: usize = 30;

/// Peak-to-baseline swing of the seasonal curve across the period.
const SEASONAL_AMPLITUDE: f64 = 0.08;
const WEEKEND_TRAFFIC: f64 = 1.25;
const WEEKEND_ORDERS: f64 = 1.35;
/// Weekend baskets run larger than weekday ones.
const WEEKEND_BASKET: f64 = 1.08;

/// Visitors who add something to the cart.
pub const ADD_TO_CART_RATE: f64 = 0.068;
/// Cart adds that reach checkout.
pub const CHECKOUT_RATE: f64 = 0.45;
const ADD_TO_CART_MARGIN: u64 = 5;
const CHECKOUT_MARGIN: u64 = 2;

// ─── Static tables ───────────────────────────────────────────────────────────

pub struct CategoryShare {
    pub name: &'static str,
    pub share: f64,
    pub color: &'static str,
}

#[rustfmt::skip]
pub const CATEGORIES: [CategoryShare; 6] = [
    CategoryShare { name: "Bourbon & American Whiskey", share: 0.57, color: "#b45309" },
    CategoryShare { name: "Scotch & Single Malt", share: 0.17, color: "#92400e" },
    CategoryShare { name: "Tequila & Mezcal", share: 0.12, color: "#65a30d" },
    CategoryShare { name: "Japanese Whisky", share: 0.08, color: "#dc2626" },
    CategoryShare { name: "Gift Sets", share: 0.04, color: "#7c3aed" },
    CategoryShare { name: "Barware & Accessories", share: 0.02, color: "#0891b2" },
];

pub struct SourceShare {
    pub name: &'static str,
    pub visitor_share: f64,
    /// Share of orders (and revenue); differs from traffic share because
    /// channels convert differently.
    pub order_share: f64,
    pub color: &'static str,
}

pub const TRAFFIC_SOURCES: [SourceShare; 6] = [
    SourceShare {
        name: "Organic Search",
        visitor_share: 0.38,
        order_share: 0.36,
        color: "#16a34a",
    },
    SourceShare {
        name: "Direct",
        visitor_share: 0.24,
        order_share: 0.27,
        color: "#2563eb",
    },
    SourceShare {
        name: "Paid Search",
        visitor_share: 0.16,
        order_share: 0.14,
        color: "#f59e0b",
    },
    SourceShare {
        name: "Social",
        visitor_share: 0.11,
        order_share: 0.06,
        color: "#db2777",
    },
    SourceShare {
        name: "Email",
        visitor_share: 0.07,
        order_share: 0.13,
        color: "#7c3aed",
    },
    SourceShare {
        name: "Referral",
        visitor_share: 0.04,
        order_share: 0.04,
        color: "#64748b",
    },
];

pub struct RegionShare {
    pub name: &'static str,
    pub code: &'static str,
    pub share: f64,
}

#[rustfmt::skip]
pub const STATES: [RegionShare; 10] = [
    RegionShare { name: "California", code: "CA", share: 0.18 },
    RegionShare { name: "Texas", code: "TX", share: 0.12 },
    RegionShare { name: "Florida", code: "FL", share: 0.10 },
    RegionShare { name: "New York", code: "NY", share: 0.09 },
    RegionShare { name: "Illinois", code: "IL", share: 0.06 },
    RegionShare { name: "Georgia", code: "GA", share: 0.05 },
    RegionShare { name: "Ohio", code: "OH", share: 0.04 },
    RegionShare { name: "North Carolina", code: "NC", share: 0.04 },
    RegionShare { name: "Pennsylvania", code: "PA", share: 0.04 },
    RegionShare { name: "Other States", code: "--", share: 0.28 },
];

pub struct KeywordSeed {
    pub keyword: &'static str,
    pub monthly_searches: u64,
    pub current_position: u32,
    pub projected_position: u32,
    /// Share of current organic traffic.
    pub current_share: f64,
    /// Share of projected organic traffic.
    pub projected_share: f64,
}

/// Tracked keywords. Shares sum below 1; the rest is long-tail traffic.
pub const KEYWORDS: [KeywordSeed; 7] = [
    KeywordSeed {
        keyword: "whiskey shop near me",
        monthly_searches: 22_200,
        current_position: 27,
        projected_position: 7,
        current_share: 0.04,
        projected_share: 0.09,
    },
    KeywordSeed {
        keyword: "buy bourbon online",
        monthly_searches: 14_800,
        current_position: 18,
        projected_position: 4,
        current_share: 0.09,
        projected_share: 0.12,
    },
    KeywordSeed {
        keyword: "allocated bourbon",
        monthly_searches: 9_900,
        current_position: 31,
        projected_position: 8,
        current_share: 0.03,
        projected_share: 0.07,
    },
    KeywordSeed {
        keyword: "tequila gift set",
        monthly_searches: 8_100,
        current_position: 42,
        projected_position: 9,
        current_share: 0.01,
        projected_share: 0.05,
    },
    KeywordSeed {
        keyword: "rare whiskey for sale",
        monthly_searches: 6_600,
        current_position: 24,
        projected_position: 6,
        current_share: 0.05,
        projected_share: 0.06,
    },
    KeywordSeed {
        keyword: "japanese whisky online",
        monthly_searches: 5_400,
        current_position: 15,
        projected_position: 5,
        current_share: 0.06,
        projected_share: 0.05,
    },
    KeywordSeed {
        keyword: "single malt scotch delivery",
        monthly_searches: 3_600,
        current_position: 12,
        projected_position: 3,
        current_share: 0.07,
        projected_share: 0.04,
    },
];

pub const FUNNEL_STAGES: [&str; 4] = ["Page View", "Add to Cart", "Begin Checkout", "Purchase"];

// ─── Daily series ────────────────────────────────────────────────────────────

/// Thirty days ending on `period_end`.
///
/// Visitors, orders and revenue are three independent allocations over
/// the same seasonal curve, each with its own weekend multiplier.
pub fn daily_metrics(store: &DemoMetricStore, period_end: Date) -> Vec<DailyMetric> {
    let baseline = &store.baseline;
    let total_visitors = baseline.visitors;
    let total_orders = monthly_orders(baseline.visitors, baseline.conversion_rate);
    let total_revenue = round_whole(baseline.monthly_revenue);

    let dates: Vec<Date> = (0..DAYS)
        .map(|i| period_end.saturating_sub(((DAYS - 1 - i) as i64).days()))
        .collect();

    let mut visitor_weights = Vec::with_capacity(DAYS);
    let mut order_weights = Vec::with_capacity(DAYS);
    let mut revenue_weights = Vec::with_capacity(DAYS);
    for (i, date) in dates.iter().enumerate() {
        let season = seasonal_weight(i);
        let weekend = is_weekend(date.weekday());
        let traffic = season * if weekend { WEEKEND_TRAFFIC } else { 1.0 };
        let orders = season * if weekend { WEEKEND_ORDERS } else { 1.0 };
        let revenue = orders * if weekend { WEEKEND_BASKET } else { 1.0 };
        visitor_weights.push(traffic);
        order_weights.push(orders);
        revenue_weights.push(revenue);
    }

    let visitors = allocate(total_visitors, &visitor_weights);
    let orders = allocate(total_orders, &order_weights);
    let revenue = allocate(total_revenue, &revenue_weights);

    dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let (v, o, r) = (visitors[i], orders[i], revenue[i]);
            let add_to_cart = ((v as f64 * ADD_TO_CART_RATE).round() as u64)
                .max(o.saturating_add(ADD_TO_CART_MARGIN));
            let checkout = ((add_to_cart as f64 * CHECKOUT_RATE).round() as u64)
                .max(o.saturating_add(CHECKOUT_MARGIN));
            DailyMetric {
                date: date.to_string(),
                weekday: weekday_label(date.weekday()).to_string(),
                visitors: v,
                orders: o,
                revenue: r,
                average_order_value: if o == 0 { 0.0 } else { one_decimal(r as f64 / o as f64) },
                conversion_rate: share_percent(o, v),
                add_to_cart,
                checkout,
            }
        })
        .collect()
}

/// Rises from `1 - A` on the first day to `1 + A` on the last.
fn seasonal_weight(day: usize) -> f64 {
    let phase = PI * day as f64 / (DAYS - 1) as f64;
    1.0 - SEASONAL_AMPLITUDE * phase.cos()
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Saturday | Weekday::Sunday)
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

// ─── Categorical breakdowns ──────────────────────────────────────────────────

pub fn category_revenue(store: &DemoMetricStore) -> Vec<CategoryRevenue> {
    let total_revenue = round_whole(store.baseline.monthly_revenue);
    let total_orders = monthly_orders(store.baseline.visitors, store.baseline.conversion_rate);

    let revenue = allocate_by(total_revenue, &CATEGORIES, |c| c.share);
    let orders = allocate_by(total_orders, &CATEGORIES, |c| c.share);

    CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, c)| CategoryRevenue {
            category: c.name.to_string(),
            revenue: revenue[i],
            orders: orders[i],
            share: share_percent(revenue[i], total_revenue),
            color: c.color.to_string(),
        })
        .collect()
}

pub fn traffic_sources(store: &DemoMetricStore) -> Vec<TrafficSource> {
    let baseline = &store.baseline;
    let total_visitors = baseline.visitors;
    let total_orders = monthly_orders(baseline.visitors, baseline.conversion_rate);
    let total_revenue = round_whole(baseline.monthly_revenue);

    let visitors = allocate_by(total_visitors, &TRAFFIC_SOURCES, |s| s.visitor_share);
    let orders = allocate_by(total_orders, &TRAFFIC_SOURCES, |s| s.order_share);
    let revenue = allocate_by(total_revenue, &TRAFFIC_SOURCES, |s| s.order_share);

    TRAFFIC_SOURCES
        .iter()
        .enumerate()
        .map(|(i, s)| TrafficSource {
            source: s.name.to_string(),
            visitors: visitors[i],
            orders: orders[i],
            revenue: revenue[i],
            share: share_percent(visitors[i], total_visitors),
            conversion_rate: share_percent(orders[i], visitors[i]),
            color: s.color.to_string(),
        })
        .collect()
}

pub fn state_traffic(store: &DemoMetricStore) -> Vec<StateTraffic> {
    let baseline = &store.baseline;
    let total_visitors = baseline.visitors;
    let total_orders = monthly_orders(baseline.visitors, baseline.conversion_rate);
    let total_revenue = round_whole(baseline.monthly_revenue);

    let visitors = allocate_by(total_visitors, &STATES, |s| s.share);
    let orders = allocate_by(total_orders, &STATES, |s| s.share);
    let revenue = allocate_by(total_revenue, &STATES, |s| s.share);

    STATES
        .iter()
        .enumerate()
        .map(|(i, s)| StateTraffic {
            state: s.name.to_string(),
            code: s.code.to_string(),
            visitors: visitors[i],
            orders: orders[i],
            revenue: revenue[i],
            share: share_percent(visitors[i], total_visitors),
        })
        .collect()
}

/// Tracked keyword traffic, current and projected.
///
/// Each column allocates the full organic total across the tracked rows plus
/// one long-tail bucket, which is dropped from the output.
pub fn keyword_rankings(store: &DemoMetricStore) -> Vec<KeywordRanking> {
    let current = with_long_tail(
        store.seo.organic_traffic,
        KEYWORDS.iter().map(|k| k.current_share),
    );
    let projected = with_long_tail(
        store.seo.projected_organic_traffic,
        KEYWORDS.iter().map(|k| k.projected_share),
    );

    KEYWORDS
        .iter()
        .enumerate()
        .map(|(i, k)| KeywordRanking {
            keyword: k.keyword.to_string(),
            monthly_searches: k.monthly_searches,
            current_position: k.current_position,
            projected_position: k.projected_position,
            current_traffic: current[i],
            projected_traffic: projected[i],
        })
        .collect()
}

/// Allocate `total` over `shares` and a trailing remainder bucket.
fn with_long_tail(total: u64, shares: impl Iterator<Item = f64>) -> Vec<u64> {
    let mut weights: Vec<f64> = shares.collect();
    let tracked: f64 = weights.iter().sum();
    weights.push((1.0 - tracked).max(0.0));
    allocate(total, &weights)
}

pub fn top_products() -> Vec<TopProduct> {
    const PRODUCTS: [(&str, &str, u64, u64); 5] = [
        ("Pappy Van Winkle 15 Year", "Bourbon & American Whiskey", 14, 1_899),
        ("Blanton's Gold Edition", "Bourbon & American Whiskey", 22, 249),
        ("Macallan 18 Sherry Oak", "Scotch & Single Malt", 9, 549),
        ("Clase Azul Reposado", "Tequila & Mezcal", 17, 179),
        ("Yamazaki 12 Year", "Japanese Whisky", 11, 229),
    ];
    PRODUCTS
        .iter()
        .map(|&(name, category, units_sold, price)| TopProduct {
            name: name.to_string(),
            category: category.to_string(),
            units_sold,
            price,
            revenue: units_sold * price,
        })
        .collect()
}

// ─── Funnel ──────────────────────────────────────────────────────────────────

/// Page view -> add to cart -> begin checkout -> purchase.
///
/// Only the ends are anchored (visitors, orders). The middle stages are
/// fixed fractions of their predecessor, held between the neighbouring
/// stages so counts never rise down the funnel.
pub fn conversion_funnel(store: &DemoMetricStore) -> Vec<FunnelStep> {
    let visitors = store.baseline.visitors;
    let orders = monthly_orders(store.baseline.visitors, store.baseline.conversion_rate);

    let add_to_cart = ((visitors as f64 * ADD_TO_CART_RATE).round() as u64)
        .max(orders)
        .min(visitors);
    let checkout = ((add_to_cart as f64 * CHECKOUT_RATE).round() as u64)
        .max(orders)
        .min(add_to_cart);
    let purchase = orders.min(checkout);

    let counts = [visitors, add_to_cart, checkout, purchase];
    let mut steps = Vec::with_capacity(counts.len());
    for (i, (&stage, &count)) in FUNNEL_STAGES.iter().zip(counts.iter()).enumerate() {
        let drop_off = match i {
            0 => 0.0,
            _ if counts[i - 1] == 0 => 0.0,
            _ => percent(1.0 - count as f64 / counts[i - 1] as f64),
        };
        steps.push(FunnelStep {
            stage: stage.to_string(),
            count,
            percentage: share_percent(count, visitors),
            drop_off,
        });
    }
    steps
}

// ─── Tests ───────────────────────────────────────────────────────────────────
