#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use storefront_metrics::allocation::allocate;
    use storefront_metrics::{DataMode, DemoMetricStore, EngineConfig, MetricsEngine};

    fn live(payload: &str) -> MetricsEngine {
        MetricsEngine::from_config(EngineConfig::resolve(Some("live"), Some(payload)))
    }

    // ========== Suite A: Config Resilience ==========

    #[test]
    fn test_malformed_payload_falls_back_to_demo() {
        let engine = MetricsEngine::from_config(EngineConfig::resolve(
            Some("live"),
            Some("not valid json"),
        ));
        assert_eq!(engine.mode(), DataMode::Demo);
        assert_eq!(engine.dashboard(), MetricsEngine::default().dashboard());
    }

    #[test]
    fn test_non_object_payloads_fall_back() {
        let payloads = ["[1,2,3]", "42", "\"live\"", "null", r#"{"baseline":{"visitors":"many"}}"#];
        for payload in payloads {
            let engine = live(payload);
            assert_eq!(engine.mode(), DataMode::Demo, "payload {payload} accepted");
            assert_eq!(*engine.store(), DemoMetricStore::fallback());
        }
    }

    #[test]
    fn test_mode_flag_variants() {
        let payload = Some(r#"{"baseline":{"visitors":15000}}"#);
        for flag in ["live", "LIVE", " Live "] {
            let config = EngineConfig::resolve(Some(flag), payload);
            assert_eq!(config.mode, DataMode::Live, "flag {flag:?}");
        }
        for flag in [None, Some("demo"), Some("production"), Some("")] {
            let engine = MetricsEngine::from_config(EngineConfig::resolve(flag, payload));
            assert_eq!(engine.mode(), DataMode::Demo, "flag {flag:?}");
            assert_eq!(engine.store().baseline.visitors, 11_260);
        }
    }

    #[test]
    fn test_unknown_override_keys_fall_back() {
        for payload in [
            r#"{"seo":{"domainAuthority":30}}"#,
            r#"{"baseline":{"visitor":20000}}"#,
            r#"{"baseline":{"visitors":20000},"extras":{}}"#,
        ] {
            let engine = live(payload);
            assert_eq!(engine.mode(), DataMode::Demo, "payload {payload} accepted");
            assert_eq!(*engine.store(), DemoMetricStore::fallback());
        }
    }

    #[test]
    fn test_extreme_counts_do_not_panic() {
        let engine =
            live(r#"{"baseline":{"visitors":18446744073709551615,"conversionRate":1.0}}"#);
        assert_eq!(engine.mode(), DataMode::Live);

        let d = engine.dashboard();
        let visitors: u128 = d.daily.iter().map(|x| u128::from(x.visitors)).sum();
        let orders: u128 = d.daily.iter().map(|x| u128::from(x.orders)).sum();
        assert_eq!(visitors, u128::from(u64::MAX));
        assert_eq!(orders, u128::from(d.summary.total_orders));
        for pair in d.funnel.windows(2) {
            assert!(pair[1].count <= pair[0].count);
        }
        assert!(d.daily.iter().all(|x| x.add_to_cart >= x.orders));
    }

    // ========== Suite B: Merge Correctness ==========

    #[test]
    fn test_authority_score_keys_are_applied() {
        let engine = live(r#"{"seo":{"authorityScore":30,"projectedAuthorityScore":50}}"#);
        assert_eq!(engine.mode(), DataMode::Live);
        assert_eq!(engine.store().seo.authority_score, 30.0);
        assert_eq!(engine.store().seo.projected_authority_score, 50.0);

        let seo = engine.seo_geo_metrics();
        assert_eq!(seo.authority_score, 30.0);
        assert_eq!(seo.projected_authority_score, 50.0);
    }

    #[test]
    fn test_partial_override_keeps_other_fields() {
        let engine =
            live(r#"{"projection":{"averageOrderValue":700},"seo":{"authorityScore":22}}"#);
        let fallback = DemoMetricStore::fallback();
        let store = engine.store();

        assert_eq!(store.projection.average_order_value.to_string(), "700");
        assert_eq!(store.seo.authority_score, 22.0);
        assert_eq!(store.baseline, fallback.baseline);
        assert_eq!(store.engagement, fallback.engagement);
        assert_eq!(store.projection.visitors, fallback.projection.visitors);
        assert_eq!(store.seo.projected_authority_score, fallback.seo.projected_authority_score);
    }

    #[test]
    fn test_override_flows_into_every_series() {
        let engine = live(r#"{"baseline":{"visitors":20000,"monthlyRevenue":139200}}"#);
        let d = engine.dashboard();

        let visitors: u64 = d.daily.iter().map(|x| x.visitors).sum();
        let revenue: u64 = d.daily.iter().map(|x| x.revenue).sum();
        assert_eq!(visitors, 20_000);
        assert_eq!(revenue, 139_200);
        assert_eq!(d.funnel[0].count, 20_000);
        assert_eq!(d.traffic_sources.iter().map(|s| s.visitors).sum::<u64>(), 20_000);
        assert_eq!(d.states.iter().map(|s| s.visitors).sum::<u64>(), 20_000);
        assert_eq!(d.categories.iter().map(|c| c.revenue).sum::<u64>(), 139_200);
    }

    // ========== Suite C: Revenue Model ==========

    #[test]
    fn test_improvements_are_additive() {
        let payloads = [
            "{}",
            r#"{"projection":{"visitors":11260}}"#,
            r#"{"projection":{"conversionRate":0.01}}"#,
            r#"{"baseline":{"averageOrderValue":612.5},"projection":{"averageOrderValue":590}}"#,
        ];
        for payload in payloads {
            let projection = live(payload).revenue_projection();
            let sum: i64 = projection.improvements.iter().map(|i| i.revenue).sum();
            let uplift = projection.projected.monthly_revenue as i64
                - projection.current.monthly_revenue as i64;
            assert_eq!(sum, uplift, "payload {payload}");
        }
    }

    #[test]
    fn test_conversion_impact_text() {
        let projection = live(r#"{"projection":{"conversionRate":0.025}}"#).revenue_projection();
        assert_eq!(projection.improvements[1].area, "Conversion Rate Optimization");
        assert_eq!(projection.improvements[1].impact, "1.2% → 2.5% conversion rate");
    }

    #[test]
    fn test_identical_scenarios_have_no_uplift() {
        let engine = live(concat!(
            r#"{"projection":{"visitors":11260,"#,
            r#""conversionRate":0.011995,"averageOrderValue":580}}"#,
        ));
        let projection = engine.revenue_projection();
        assert_eq!(projection.current.monthly_revenue, projection.projected.monthly_revenue);
        assert!(projection.improvements.iter().all(|i| i.revenue == 0));
    }

    // ========== Suite D: Series Shape ==========

    #[test]
    fn test_every_column_foots_to_summary() {
        let d = MetricsEngine::default().dashboard();
        let s = &d.summary;

        assert_eq!(d.daily.len(), 30);
        assert_eq!(d.daily.iter().map(|x| x.visitors).sum::<u64>(), s.total_visitors);
        assert_eq!(d.daily.iter().map(|x| x.orders).sum::<u64>(), s.total_orders);
        assert_eq!(d.daily.iter().map(|x| x.revenue).sum::<u64>(), s.total_revenue);
        assert_eq!(d.categories.iter().map(|c| c.revenue).sum::<u64>(), s.total_revenue);
        assert_eq!(d.categories.iter().map(|c| c.orders).sum::<u64>(), s.total_orders);
        assert_eq!(d.traffic_sources.iter().map(|t| t.orders).sum::<u64>(), s.total_orders);
        assert_eq!(d.traffic_sources.iter().map(|t| t.revenue).sum::<u64>(), s.total_revenue);
        assert_eq!(d.states.iter().map(|t| t.revenue).sum::<u64>(), s.total_revenue);
    }

    #[test]
    fn test_funnel_never_widens() {
        let payloads = [
            "{}",
            r#"{"baseline":{"visitors":40,"conversionRate":0.5}}"#,
            r#"{"baseline":{"visitors":0}}"#,
            r#"{"baseline":{"visitors":1000000,"conversionRate":0.0001}}"#,
        ];
        for payload in payloads {
            let funnel = live(payload).conversion_funnel();
            assert_eq!(funnel.len(), 4);
            assert_eq!(funnel[0].drop_off, 0.0);
            for pair in funnel.windows(2) {
                assert!(
                    pair[1].count <= pair[0].count,
                    "funnel widened for {payload}: {:?}",
                    funnel
                );
            }
        }
    }

    #[test]
    fn test_daily_series_ends_on_period_end() {
        let config = EngineConfig::default().with_period_end(jiff::civil::date(2024, 3, 1));
        let daily = MetricsEngine::from_config(config).daily_metrics();
        assert_eq!(daily[0].date, "2024-01-31");
        assert_eq!(daily[29].date, "2024-03-01");
        assert_eq!(daily[29].weekday, "Fri");
    }

    // ========== Suite E: Allocator Properties ==========

    #[test]
    fn test_allocator_preserves_totals() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let n = rng.gen_range(1..=12);
            let weights: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
            let total = match rng.gen_range(0..4) {
                0 => 0,
                1 => 1,
                _ => rng.gen_range(0..1_000_000u64),
            };

            let parts = allocate(total, &weights);
            assert_eq!(parts.len(), n);
            assert_eq!(parts.iter().sum::<u64>(), total, "weights {weights:?}");

            let mass: f64 = weights.iter().sum();
            if mass > 0.0 {
                for (part, w) in parts.iter().zip(&weights) {
                    let ideal = total as f64 * w / mass;
                    assert!(
                        (*part as f64 - ideal).abs() < 1.0 + 1e-6,
                        "part {part} too far from {ideal}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_allocator_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let weights: Vec<f64> = (0..6).map(|_| rng.gen_range(0.0..10.0)).collect();
            let total = rng.gen_range(0..100_000u64);
            assert_eq!(allocate(total, &weights), allocate(total, &weights));
        }
    }

    #[test]
    fn test_allocator_preserves_totals_past_f64_precision() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..200 {
            let n = rng.gen_range(1..=12);
            let weights: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
            let total = match rng.gen_range(0..3) {
                0 => (1u64 << 53) + rng.gen_range(0..1_000u64),
                1 => rng.gen_range((1u64 << 53)..u64::MAX),
                _ => u64::MAX - rng.gen_range(0..16u64),
            };

            let parts = allocate(total, &weights);
            assert_eq!(parts.len(), n);
            let sum: u128 = parts.iter().map(|&p| u128::from(p)).sum();
            assert_eq!(sum, u128::from(total), "total {total}, weights {weights:?}");
        }
    }
}
