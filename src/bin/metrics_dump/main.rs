// Metrics Dump — prints the synthesized storefront dataset
// Resolves the engine config from the environment, then renders a text report or JSON
//
// Usage:
//   cargo run --bin metrics_dump                      # Text report
//   cargo run --bin metrics_dump -- --json            # Full dashboard as JSON
//   cargo run --bin metrics_dump -- --section funnel  # One section only
//   cargo run --bin metrics_dump -- --audit           # Footing audit, exit 1 on failure
//
// Environment: STOREFRONT_DATA_MODE, STOREFRONT_METRICS_JSON, STOREFRONT_ENV,
// STOREFRONT_PERIOD_END, RUST_LOG.

mod report;

use report::*;
use storefront_metrics::{EngineConfig, MetricsEngine};
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    json: bool,
    audit: bool,
    section: Option<Section>,
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        json: false,
        audit: false,
        section: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => cli.json = true,
            "--audit" => cli.audit = true,
            "--section" => {
                i += 1;
                let name = args.get(i).ok_or("--section needs a value")?;
                cli.section = Some(
                    Section::parse(name).ok_or_else(|| format!("unknown section: {name}"))?,
                );
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(cli)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!(
                "usage: metrics_dump [--json] [--audit] [--section {}]",
                Section::NAMES.join("|")
            );
            std::process::exit(2);
        }
    };

    let engine = MetricsEngine::from_config(EngineConfig::from_env());
    let dashboard = engine.dashboard();

    if cli.audit {
        let audit = FootingAudit::run(&dashboard);
        print!("{}", audit.render());
        if !audit.all_pass() {
            std::process::exit(1);
        }
        return;
    }

    let output = match (cli.json, cli.section) {
        (true, Some(section)) => section.to_json(&dashboard),
        (true, None) => serde_json::to_string_pretty(&dashboard).map_err(|e| e.to_string()),
        (false, Some(section)) => Ok(section.render(&dashboard)),
        (false, None) => Ok(render_full(&dashboard)),
    };

    match output {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("failed to serialize dashboard: {err}");
            std::process::exit(1);
        }
    }
}
