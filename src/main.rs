//! CLI entry point for the admission score model builder.
//!
//! Provides subcommands for building the score-threshold model from
//! admission result sheets and for inspecting an existing model.

use admission_score_model::analyzers::empty_model;
use admission_score_model::config::PipelineConfig;
use admission_score_model::fetch::{BasicClient, discover_sources, load_sources};
use admission_score_model::output::{
    backup_existing, log_summary, read_model, upload_model, write_model,
};
use admission_score_model::pipeline::Pipeline;
use admission_score_model::sheet::read_sheet;
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "admission_score_model")]
#[command(about = "Builds score-threshold statistics from admission results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model from result sheets
    Build {
        /// CSV file, directory of CSV sheets, or URL (repeatable)
        #[arg(short, long = "input", value_name = "PATH_OR_URL", default_value = "data/admission_results")]
        inputs: Vec<String>,

        /// Model JSON to write
        #[arg(short, long, default_value = "data/admission_score_model.json")]
        output: PathBuf,

        /// Pipeline config JSON
        #[arg(short, long, env = "ADMISSION_MODEL_CONFIG")]
        config: Option<PathBuf>,

        /// Copy the previous model here before overwriting it
        #[arg(long)]
        backup_dir: Option<PathBuf>,

        /// Optional: S3 bucket to upload the model to (e.g., "my-bucket")
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Optional: Gzip compress the model before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Report institution counts and metadata of an existing model
    Info {
        /// Model JSON to inspect
        #[arg(short, long, default_value = "data/admission_score_model.json")]
        model: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/admission_score_model.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("admission_score_model.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            inputs,
            output,
            config,
            backup_dir,
            s3_bucket,
            gzip,
        } => {
            let config = match config {
                Some(path) => PipelineConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => PipelineConfig::default(),
            };
            build(&config, &inputs, &output, backup_dir.as_deref(), s3_bucket, gzip).await?;
        }
        Commands::Info { model } => info_command(&model)?,
    }

    Ok(())
}

/// Reads every source, builds the model and persists it.
#[tracing::instrument(skip(config, s3_bucket), fields(output = %output.display()))]
async fn build(
    config: &PipelineConfig,
    inputs: &[String],
    output: &Path,
    backup_dir: Option<&Path>,
    s3_bucket: Option<String>,
    gzip: bool,
) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let sources = discover_sources(inputs)?;
    let client = BasicClient::new()?;
    let loaded = load_sources(&client, &sources).await;

    let model = if loaded.is_empty() {
        warn!(?inputs, "No source data found, writing empty model");
        empty_model()
    } else {
        let mut sheets = Vec::with_capacity(loaded.len());
        for (source, bytes) in &loaded {
            let name = source.sheet_name();
            let context = config.sheet_context(&name);
            sheets.push(read_sheet(&name, context, bytes.as_slice())?);
        }

        pipeline.build(&sheets)
    };

    if let Some(dir) = backup_dir {
        let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        backup_existing(output, dir, &timestamp)?;
    }

    write_model(output, &model)?;
    info!(path = %output.display(), "Model saved");
    log_summary(&model);

    if let Some(bucket) = s3_bucket {
        let aws = aws_config::load_from_env().await;
        let s3 = aws_sdk_s3::Client::new(&aws);
        upload_model(&s3, &bucket, &model, gzip).await?;
    }

    Ok(())
}

/// Logs a summary of the model at `path`; a missing file counts as empty.
fn info_command(path: &Path) -> Result<()> {
    if !path.exists() {
        warn!(path = %path.display(), "Model file not found");
        info!(bunka = 0, rika = 0, "Model summary");
        return Ok(());
    }

    let model = read_model(path)?;
    log_summary(&model);
    Ok(())
}
