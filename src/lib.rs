// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine

pub mod allocation;
pub mod config;
pub mod engine;
pub mod format;
pub mod models;
pub mod revenue;
pub mod series;
pub mod store;
pub mod types;

pub use config::{DataMode, EngineConfig, Environment};
pub use engine::{MetricsEngine, SelfCheckReport};
pub use store::{DemoMetricStore, MetricOverrides};
pub use types::*;

use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Route panics and `tracing` events to the browser console, once per page.
#[cfg(target_arch = "wasm32")]
fn init_browser_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        // A host that installed its own subscriber keeps it.
        let _ = tracing_wasm::try_set_as_global_default();
    });
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl MetricsEngine {
    /// Resolve the mode flag and override payload handed over by the host.
    /// Malformed payloads fall back to demo data.
    #[wasm_bindgen(constructor)]
    pub fn new(mode_flag: Option<String>, override_json: Option<String>) -> Self {
        #[cfg(target_arch = "wasm32")]
        init_browser_logging();

        let config = EngineConfig::resolve(mode_flag.as_deref(), override_json.as_deref());
        Self::from_config(config)
    }

    #[wasm_bindgen(getter = mode)]
    pub fn mode_js(&self) -> String {
        self.config.mode.to_string()
    }

    pub fn get_dashboard(&self) -> JsValue {
        to_js(&self.dashboard())
    }

    pub fn get_revenue_projection(&self) -> JsValue {
        to_js(&self.revenue_projection())
    }

    pub fn get_summary_kpis(&self) -> JsValue {
        to_js(&self.summary_kpis())
    }

    pub fn get_seo_geo_metrics(&self) -> JsValue {
        to_js(&self.seo_geo_metrics())
    }

    pub fn get_engagement(&self) -> JsValue {
        to_js(&self.engagement_summary())
    }

    pub fn get_daily_metrics(&self) -> JsValue {
        to_js(&self.daily_metrics())
    }

    pub fn get_category_revenue(&self) -> JsValue {
        to_js(&self.category_revenue())
    }

    pub fn get_top_products(&self) -> JsValue {
        to_js(&self.top_products())
    }

    pub fn get_traffic_sources(&self) -> JsValue {
        to_js(&self.traffic_sources())
    }

    pub fn get_conversion_funnel(&self) -> JsValue {
        to_js(&self.conversion_funnel())
    }

    pub fn get_state_traffic(&self) -> JsValue {
        to_js(&self.state_traffic())
    }

    pub fn get_keyword_rankings(&self) -> JsValue {
        to_js(&self.keyword_rankings())
    }

    pub fn get_self_check(&self) -> JsValue {
        to_js(&self.self_check())
    }
}
