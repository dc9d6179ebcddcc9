// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Engine Core

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::config::{DataMode, EngineConfig};
use crate::models;
use crate::revenue::{reconcile_baseline, RevenueReconciliation};
use crate::series;
use crate::store::DemoMetricStore;
use crate::types::*;

// ─── MetricsEngine struct ────────────────────────────────────────────────────

/// Resolved configuration plus the frozen metric store.
///
/// Built once; every accessor recomputes its output from the store, and
/// identical stores always produce identical output.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    pub(crate) config: EngineConfig,
    pub(crate) store: DemoMetricStore,
}

/// Outcome of the non-production consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckReport {
    pub revenue: RevenueReconciliation,
    /// Human-readable store inconsistencies; empty when the store is sound.
    pub violations: Vec<String>,
}

impl SelfCheckReport {
    pub fn is_clean(&self) -> bool {
        self.revenue.within_tolerance && self.violations.is_empty()
    }
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl MetricsEngine {
    /// Build the store for `config`: the fallback, merged with the override
    /// payload in live mode.
    pub fn from_config(config: EngineConfig) -> Self {
        let fallback = DemoMetricStore::fallback();
        let store = match (&config.mode, &config.overrides) {
            (DataMode::Live, Some(overrides)) => fallback.merged(overrides),
            _ => fallback,
        };
        let engine = Self { config, store };

        info!(
            mode = %engine.config.mode,
            period_end = %engine.config.period_end,
            "metrics engine initialized"
        );
        if engine.config.self_check_enabled() {
            engine.log_self_check();
        }
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &DemoMetricStore {
        &self.store
    }

    pub fn mode(&self) -> DataMode {
        self.config.mode
    }

    /// Compare configured and recomputed baseline revenue and validate the store.
    pub fn self_check(&self) -> SelfCheckReport {
        let violations = match self.store.validate() {
            Ok(()) => Vec::new(),
            Err(found) => found.iter().map(ToString::to_string).collect(),
        };
        SelfCheckReport {
            revenue: reconcile_baseline(&self.store.baseline),
            violations,
        }
    }

    fn log_self_check(&self) {
        let report = self.self_check();
        let r = &report.revenue;
        if r.within_tolerance {
            debug!(
                configured = r.configured,
                recomputed = r.recomputed,
                "baseline revenue reconciles"
            );
        } else {
            warn!(
                configured = r.configured,
                recomputed = r.recomputed,
                deviation = r.relative_deviation,
                "baseline revenue disagrees with visitors x conversion x AOV"
            );
        }
        for violation in &report.violations {
            warn!(%violation, "metric store inconsistency");
        }
    }

    pub fn daily_metrics(&self) -> Vec<DailyMetric> {
        series::daily_metrics(&self.store, self.config.period_end)
    }

    pub fn category_revenue(&self) -> Vec<CategoryRevenue> {
        series::category_revenue(&self.store)
    }

    pub fn traffic_sources(&self) -> Vec<TrafficSource> {
        series::traffic_sources(&self.store)
    }

    pub fn state_traffic(&self) -> Vec<StateTraffic> {
        series::state_traffic(&self.store)
    }

    pub fn conversion_funnel(&self) -> Vec<FunnelStep> {
        series::conversion_funnel(&self.store)
    }

    pub fn keyword_rankings(&self) -> Vec<KeywordRanking> {
        series::keyword_rankings(&self.store)
    }

    pub fn top_products(&self) -> Vec<TopProduct> {
        series::top_products()
    }

    pub fn revenue_projection(&self) -> RevenueProjection {
        models::revenue_projection(&self.store)
    }

    pub fn summary_kpis(&self) -> SummaryKpis {
        models::summary_kpis(&self.store, &self.daily_metrics())
    }

    pub fn seo_geo_metrics(&self) -> SeoGeoMetrics {
        models::seo_geo_metrics(&self.store)
    }

    pub fn engagement_summary(&self) -> EngagementSummary {
        models::engagement_summary(&self.store)
    }

    /// Every model and series in one value.
    pub fn dashboard(&self) -> Dashboard {
        let daily = self.daily_metrics();
        Dashboard {
            mode: self.config.mode,
            period_end: self.config.period_end.to_string(),
            revenue_projection: self.revenue_projection(),
            summary: models::summary_kpis(&self.store, &daily),
            seo_geo: self.seo_geo_metrics(),
            engagement: self.engagement_summary(),
            daily,
            categories: self.category_revenue(),
            top_products: self.top_products(),
            traffic_sources: self.traffic_sources(),
            funnel: self.conversion_funnel(),
            states: self.state_traffic(),
            keywords: self.keyword_rankings(),
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
