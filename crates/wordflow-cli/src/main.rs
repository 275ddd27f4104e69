use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wordflow_core::config::{DispatchConfig, UNIT_TIMEOUT_ENV};
use wordflow_core::impls::{ConsoleSink, OutputFormat};
use wordflow_core::CoordinatorBuilder;

#[derive(Parser)]
#[command(name = "wordflow")]
#[command(about = "Count the words of a text, one concurrent unit per line")]
struct Cli {
    /// Input file (stdin when omitted)
    input: Option<PathBuf>,

    /// Per-line unit timeout in milliseconds (overrides WORDFLOW_UNIT_TIMEOUT_MS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,

    /// Print the aggregate as JSON
    #[arg(long)]
    json: bool,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn init_logging(level: tracing::Level) {
    // stdout は結果専用なのでログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let mut config = DispatchConfig::from_env()
        .with_context(|| format!("invalid {UNIT_TIMEOUT_ENV}"))?;
    if let Some(ms) = cli.timeout_ms {
        config = config.with_unit_timeout(Duration::from_millis(ms));
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };

    let coordinator = CoordinatorBuilder::new()
        .with_config(config)
        .with_sink(Arc::new(ConsoleSink::stdout(format)))
        .build()?;

    let text = read_input(cli.input.as_ref()).await?;
    // 末尾の改行 1 つは空行として数えない
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let aggregate = coordinator.run(text).await;

    Ok(!aggregate.is_failed())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
