use std::path::PathBuf;

use clap::Parser;
use querycheck::{run_suite, suite};
use querycheck_client::QueryClient;
use querycheck_core::config::Config;

#[derive(Parser)]
#[command(name = "querycheck", about = "Verify the query semantics of a vacancy search API")]
struct Cli {
    /// Extra TOML config layered over the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search endpoint URL (overrides config).
    #[arg(long)]
    endpoint: Option<String>,

    /// TOML file with additional `[[case]]` tables.
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Run only the named case (repeatable).
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// List cases and exit.
    #[arg(long)]
    list: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Verbose logging to stderr.
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.endpoint {
        config.endpoint.url = url;
    }

    let mut cases = suite::builtin();
    if let Some(path) = &cli.cases {
        cases.extend(suite::load_cases(path)?);
    }
    let cases = suite::select(cases, &cli.only)?;

    if cli.list {
        for case in &cases {
            match (case.feature(), case.query()) {
                (Some(feature), Some(query)) => {
                    println!("{:<28} {:<13} {query}", case.name, feature.to_string())
                }
                _ => println!("{:<28} probe", case.name),
            }
        }
        return Ok(());
    }

    tracing::info!(url = %config.endpoint.url, cases = cases.len(), "running suite");
    let client = QueryClient::new(config.endpoint)?;
    let report = run_suite(&client, &cases, &config.fields).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    std::process::exit(report.exit_code());
}
