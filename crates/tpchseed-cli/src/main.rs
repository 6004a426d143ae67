use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use tpchseed_core::{SinkError, redact_connection_string};
use tpchseed_generate::{GenerateOptions, Pipeline, RowCounts, RunReport};
use tpchseed_store::PgSink;

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("generation failed for {table}: {message}")]
    Generation { table: String, message: String },
    #[error("write failed for: {0}")]
    FailedWrites(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "tpchseed",
    version,
    about = "Seed a TPC-H-shaped dataset into Postgres"
)]
struct Cli {
    /// Connection string; falls back to the DATABASE_URL environment
    /// variable.
    #[arg(long, value_name = "CONNECTION_STRING")]
    database_url: Option<String>,
    /// Default row count for every table.
    #[arg(long, default_value_t = RowCounts::DEFAULT_ROWS)]
    rows: u64,
    /// Row count override for region.
    #[arg(long)]
    regions: Option<u64>,
    /// Row count override for nation.
    #[arg(long)]
    nations: Option<u64>,
    /// Row count override for part.
    #[arg(long)]
    parts: Option<u64>,
    /// Row count override for supplier.
    #[arg(long)]
    suppliers: Option<u64>,
    /// Row count override for partsupp.
    #[arg(long)]
    partsupps: Option<u64>,
    /// Row count override for customer.
    #[arg(long)]
    customers: Option<u64>,
    /// Row count override for orders.
    #[arg(long)]
    orders: Option<u64>,
    /// Row count override for lineitem.
    #[arg(long)]
    lineitems: Option<u64>,
    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Anchor date for generated date windows (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    anchor_date: Option<NaiveDate>,
    /// Optional path for the JSON run report.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

impl Cli {
    fn row_counts(&self) -> RowCounts {
        let base = RowCounts::uniform(self.rows);
        RowCounts {
            regions: self.regions.unwrap_or(base.regions),
            nations: self.nations.unwrap_or(base.nations),
            parts: self.parts.unwrap_or(base.parts),
            suppliers: self.suppliers.unwrap_or(base.suppliers),
            partsupps: self.partsupps.unwrap_or(base.partsupps),
            customers: self.customers.unwrap_or(base.customers),
            orders: self.orders.unwrap_or(base.orders),
            lineitems: self.lineitems.unwrap_or(base.lineitems),
        }
    }

    fn generate_options(&self) -> GenerateOptions {
        let mut options = GenerateOptions {
            seed: self.seed,
            ..GenerateOptions::default()
        };
        if let Some(anchor) = self.anchor_date {
            options.anchor_date = anchor;
        }
        options
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_logging();
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let url = cli
        .database_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| CliError::Config("DATABASE_URL is not set".to_string()))?;

    let connection = redact_connection_string(&url);
    tracing::info!(event = "run_started", target = %connection.redacted);

    let sink = PgSink::connect(&url).await?;
    let report = Pipeline::new(cli.generate_options())
        .run(&sink, &cli.row_counts())
        .await;
    sink.close().await;

    if let Some(path) = cli.report.as_deref() {
        std::fs::write(path, serde_json::to_vec_pretty(&report)?)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    finish(&report)
}

fn finish(report: &RunReport) -> Result<(), CliError> {
    if let Some(failure) = &report.failure {
        return Err(CliError::Generation {
            table: failure.table.name().to_string(),
            message: failure.message.clone(),
        });
    }

    let failed = report.failed_writes();
    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|table| table.name()).collect();
        return Err(CliError::FailedWrites(names.join(", ")));
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        run_id = %report.run_id,
        duration_ms = report.duration_ms
    );
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
