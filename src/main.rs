mod browse;
mod cli;
mod config;
mod controller;
mod display;
mod error;
mod model;
mod output;
mod reader;
mod variant;
mod view;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat, Variant};
use config::AppConfig;

use crate::browse::BrowseSession;
use crate::controller::{DetailController, ViewState};
use crate::model::Identifier;
use crate::reader::HttpRecordReader;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "detail_view=debug"
    } else {
        "detail_view=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = AppConfig::load(cli.base_url, cli.legacy_discount)?;

    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    })
    .context("Failed to set Ctrl+C handler")?;

    let reader = HttpRecordReader::new(config.base_url.clone(), config.timeout)
        .context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Recipe { id_or_url } => {
            cmd_show(&config, &reader, Variant::Recipe, &id_or_url, cli.format).await
        }
        Commands::Product { id_or_url } => {
            cmd_show(&config, &reader, Variant::Product, &id_or_url, cli.format).await
        }
        Commands::Browse { variant } => {
            cmd_browse(&config, reader, variant, cli.format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn cmd_show(
    config: &AppConfig,
    reader: &HttpRecordReader,
    variant: Variant,
    id_or_url: &str,
    format: OutputFormat,
) -> Result<ExitCode> {
    let id = Identifier::parse(id_or_url)?;
    let options = variant.options();

    tracing::debug!("Loading {} {}", options.noun, id);

    let mut controller = DetailController::new();
    let state = controller.load(reader, id).await;

    print!(
        "{}",
        output::render(state, options, config.discount_formula, format)?
    );

    Ok(ExitCode::from(exit_status(state)))
}

/// 1 when the read failed, 0 otherwise.
fn exit_status(state: &ViewState) -> u8 {
    match state {
        ViewState::Failed => 1,
        _ => 0,
    }
}

async fn cmd_browse(
    config: &AppConfig,
    reader: HttpRecordReader,
    variant: Variant,
    format: OutputFormat,
) -> Result<()> {
    let session = BrowseSession::new(
        Arc::new(reader),
        variant.options(),
        config.discount_formula,
        format,
    );

    session
        .run(
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
        .await
        .context("Browse session failed")
}
