#![cfg(target_arch = "wasm32")]

use storefront_metrics::MetricsEngine;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn constructor_falls_back_on_bad_payload() {
    let engine = MetricsEngine::new(Some("live".into()), Some("{not json".into()));
    assert_eq!(engine.mode_js(), "demo");
    assert!(!engine.get_dashboard().is_null());
}

#[wasm_bindgen_test]
fn constructor_accepts_live_payload() {
    let engine = MetricsEngine::new(
        Some("live".into()),
        Some(r#"{"baseline":{"visitors":15000}}"#.into()),
    );
    assert_eq!(engine.mode_js(), "live");
    assert!(!engine.get_summary_kpis().is_null());
}

#[wasm_bindgen_test]
fn repeated_construction_keeps_one_subscriber() {
    let first = MetricsEngine::new(None, None);
    let second = MetricsEngine::new(Some("live".into()), Some("[]".into()));
    assert_eq!(first.mode_js(), "demo");
    assert_eq!(second.mode_js(), "demo");
    tracing::warn!("console subscriber installed");
}
