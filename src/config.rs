// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Configuration Resolver

//! Operating mode and override resolution.
//!
//! The host hands the engine two strings: a mode flag and an optional JSON
//! override payload. Resolution never fails. A live flag with a missing or
//! malformed payload degrades to demo mode with a warning, so a broken
//! external config cannot stop metric generation.

use jiff::civil::Date;
use std::fmt;
use tracing::{debug, warn};

use crate::store::MetricOverrides;

/// Environment variable holding the mode flag (`demo` / `live`).
pub const MODE_VAR: &str = "STOREFRONT_DATA_MODE";
/// Environment variable holding the override payload.
pub const OVERRIDE_VAR: &str = "STOREFRONT_METRICS_JSON";
/// Environment variable naming the deployment (`production` disables self-checks).
pub const ENVIRONMENT_VAR: &str = "STOREFRONT_ENV";
/// Environment variable holding the ISO date the daily series ends on.
pub const PERIOD_END_VAR: &str = "STOREFRONT_PERIOD_END";

/// Last day of the daily series when none is configured.
pub const DEFAULT_PERIOD_END: Date = jiff::civil::date(2025, 6, 30);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons an override payload or config value was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("override payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("override payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("override payload does not match the metric store shape: {0}")]
    ShapeMismatch(#[source] serde_json::Error),

    #[error("invalid period end date {raw:?}: {source}")]
    InvalidDate {
        raw: String,
        #[source]
        source: jiff::Error,
    },
}

// ---------------------------------------------------------------------------
// Mode and environment
// ---------------------------------------------------------------------------

/// Whether output comes from the compiled-in fallback or an override payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    #[default]
    Demo,
    Live,
}

impl DataMode {
    /// Case-insensitive; anything other than `live` is demo.
    pub fn parse_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("live") {
            Self::Live
        } else {
            Self::Demo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("production") || raw.eq_ignore_ascii_case("prod") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an override payload: valid JSON, a non-null object, and the
/// metric store shape (every group and field optional).
pub fn parse_override(payload: &str) -> Result<MetricOverrides, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(ConfigError::InvalidJson)?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject(json_kind(&value)));
    }
    serde_json::from_value(value).map_err(ConfigError::ShapeMismatch)
}

pub fn parse_period_end(raw: &str) -> Result<Date, ConfigError> {
    raw.trim()
        .parse::<Date>()
        .map_err(|source| ConfigError::InvalidDate {
            raw: raw.to_string(),
            source,
        })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Resolved, immutable engine configuration. Built once by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Effective mode after payload validation.
    pub mode: DataMode,
    /// Present only in live mode.
    pub overrides: Option<MetricOverrides>,
    pub environment: Environment,
    /// Last day covered by the daily series.
    pub period_end: Date,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: DataMode::Demo,
            overrides: None,
            environment: Environment::Development,
            period_end: DEFAULT_PERIOD_END,
        }
    }
}

impl EngineConfig {
    /// Resolve the effective mode from a mode flag and override payload.
    ///
    /// Live mode requires the flag to ask for it and the payload to parse
    /// into an object of the store's shape. Every other combination is demo
    /// mode without overrides.
    pub fn resolve(mode_flag: Option<&str>, payload: Option<&str>) -> Self {
        let requested = mode_flag.map(DataMode::parse_flag).unwrap_or_default();
        let mut config = Self::default();

        match (requested, payload) {
            (DataMode::Demo, Some(_)) => {
                debug!("override payload ignored in demo mode");
            }
            (DataMode::Demo, None) => {}
            (DataMode::Live, None) => {
                warn!("live mode requested without an override payload, using demo data");
            }
            (DataMode::Live, Some(raw)) => match parse_override(raw) {
                Ok(overrides) => {
                    config.mode = DataMode::Live;
                    config.overrides = Some(overrides);
                }
                Err(err) => {
                    warn!(error = %err, "discarding override payload, using demo data");
                }
            },
        }

        config
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = lookup(MODE_VAR);
        let payload = lookup(OVERRIDE_VAR).filter(|p| !p.trim().is_empty());
        let mut config = Self::resolve(mode.as_deref(), payload.as_deref());

        if let Some(raw) = lookup(ENVIRONMENT_VAR) {
            config.environment = Environment::parse(&raw);
        }
        if let Some(raw) = lookup(PERIOD_END_VAR) {
            match parse_period_end(&raw) {
                Ok(date) => config.period_end = date,
                Err(err) => warn!(error = %err, "using default period end"),
            }
        }

        debug!(
            mode = %config.mode,
            environment = ?config.environment,
            period_end = %config.period_end,
            "engine config resolved"
        );
        config
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_period_end(mut self, period_end: Date) -> Self {
        self.period_end = period_end;
        self
    }

    pub fn is_live(&self) -> bool {
        self.mode == DataMode::Live
    }

    /// Diagnostics run everywhere except production.
    pub fn self_check_enabled(&self) -> bool {
        self.environment != Environment::Production
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn mode_flag_is_case_insensitive() {
        assert_eq!(DataMode::parse_flag("LIVE"), DataMode::Live);
        assert_eq!(DataMode::parse_flag(" Live "), DataMode::Live);
        assert_eq!(DataMode::parse_flag("demo"), DataMode::Demo);
        assert_eq!(DataMode::parse_flag("staging"), DataMode::Demo);
        assert_eq!(DataMode::parse_flag(""), DataMode::Demo);
    }

    #[test]
    fn live_with_valid_object_is_live() {
        let config = EngineConfig::resolve(Some("live"), Some(r#"{"baseline":{"visitors":500}}"#));
        assert!(config.is_live());
        let overrides = config.overrides.expect("test: overrides carried in live mode");
        assert_eq!(overrides.baseline.and_then(|b| b.visitors), Some(500));
    }

    #[test]
    fn malformed_payload_falls_back_to_demo() {
        let config = EngineConfig::resolve(Some("live"), Some("not valid json"));
        assert_eq!(config.mode, DataMode::Demo);
        assert!(config.overrides.is_none());
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        for payload in ["null", "[1,2]", "42", "\"live\"", "true"] {
            assert!(
                matches!(parse_override(payload), Err(ConfigError::NotAnObject(_))),
                "payload {payload} should be rejected"
            );
            assert_eq!(EngineConfig::resolve(Some("live"), Some(payload)).mode, DataMode::Demo);
        }
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let err = parse_override(r#"{"baseline":{"visitors":"lots"}}"#);
        assert!(matches!(err, Err(ConfigError::ShapeMismatch(_))), "got {err:?}");
        let config =
            EngineConfig::resolve(Some("live"), Some(r#"{"baseline":{"visitors":"lots"}}"#));
        assert_eq!(config.mode, DataMode::Demo);
    }

    #[test]
    fn live_without_payload_is_demo() {
        assert_eq!(EngineConfig::resolve(Some("live"), None).mode, DataMode::Demo);
    }

    #[test]
    fn demo_flag_ignores_valid_payload() {
        let config = EngineConfig::resolve(Some("demo"), Some("{}"));
        assert_eq!(config.mode, DataMode::Demo);
        assert!(config.overrides.is_none());
    }

    #[test]
    fn lookup_reads_all_variables() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (MODE_VAR, "live"),
            (OVERRIDE_VAR, "{}"),
            (ENVIRONMENT_VAR, "Production"),
            (PERIOD_END_VAR, "2024-12-31"),
        ]);
        let config = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert!(config.is_live());
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.self_check_enabled());
        assert_eq!(config.period_end, jiff::civil::date(2024, 12, 31));
    }

    #[test]
    fn bad_period_end_keeps_default() {
        let config = EngineConfig::from_lookup(|k| {
            (k == PERIOD_END_VAR).then(|| "end of june".to_string())
        });
        assert_eq!(config.period_end, DEFAULT_PERIOD_END);
        assert!(matches!(
            parse_period_end("end of june"),
            Err(ConfigError::InvalidDate { .. })
        ));
    }

    #[test]
    fn blank_payload_counts_as_missing() {
        let config = EngineConfig::from_lookup(|k| match k {
            MODE_VAR => Some("live".to_string()),
            OVERRIDE_VAR => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.mode, DataMode::Demo);
    }
}
