// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use frame_viewer::{ViewerConfig, html, load, render_outcome, server, text};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "frame-viewer")]
#[command(about = "Render a tabular artifact as a web page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the rendered artifact over HTTP
    Serve(CommonArgs),
    /// Render the artifact once to stdout and exit
    Render {
        #[command(flatten)]
        common: CommonArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// YAML config file; flags below override its values
    #[arg(short, long, env = "FRAME_VIEWER_CONFIG")]
    config: Option<PathBuf>,

    /// Path of the artifact to load
    #[arg(short, long, env = "FRAME_VIEWER_ARTIFACT")]
    artifact: Option<PathBuf>,

    /// Address to listen on (serve only)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Page title
    #[arg(short, long)]
    title: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Html,
}

impl CommonArgs {
    fn into_config(self) -> Result<ViewerConfig> {
        let base = match &self.config {
            Some(path) => ViewerConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        Ok(base.with_overrides(self.artifact, self.listen, self.title))
    }
}

fn main() -> Result<ExitCode> {
    // RUST_LOG takes precedence, fallback to info. Logs go to stderr so
    // `render` output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(common) => {
            let config = common.into_config()?;
            info!(
                artifact = %config.artifact_path.display(),
                listen = %config.listen_addr,
                "starting frame-viewer"
            );
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("building tokio runtime")?
                .block_on(server::run_server(config))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { common, format } => {
            let config = common.into_config()?;
            render_once(&config, format)
        }
    }
}

/// Exit code 1 when the pass halts; the error page is still printed.
fn render_once(config: &ViewerConfig, format: OutputFormat) -> Result<ExitCode> {
    let outcome = load(&config.artifact_path);
    let page = render_outcome(&outcome, &config.page_title);

    let output = match format {
        OutputFormat::Text => text::to_text(&page).context("formatting page as text")?,
        OutputFormat::Html => html::to_html(&page),
    };
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("writing page to stdout")?;

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
