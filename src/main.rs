//! Voiceform - voice-driven web form filling.
//!
//! Main entry point for the voiceform CLI.

use std::path::PathBuf;

use anyhow::{Context, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use voiceform_browser::{CdpClient, CdpPage};
use voiceform_core::{SessionConfig, extract_fields, run_session};
use voiceform_protocols::{OperatorGate, Page, Speech};
use voiceform_speech::{ConsoleSpeech, HttpSpeech};

mod config;

use config::Config;

/// Voiceform CLI.
#[derive(Parser)]
#[command(name = "voiceform")]
#[command(about = "Voice-driven web form filling")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/voiceform.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the form on a page interactively by voice
    Fill {
        /// URL of the page with the form
        #[arg(long)]
        url: String,

        /// Chrome remote-debugging endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// Speech backend: console or http (overrides config)
        #[arg(long)]
        speech: Option<String>,
    },

    /// Extract and print the detected fields, without voice interaction
    Inspect {
        /// URL of the page with the form
        #[arg(long)]
        url: String,

        /// Chrome remote-debugging endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

/// Operator gate that waits for an Enter keypress.
struct StdinGate;

#[async_trait]
impl OperatorGate for StdinGate {
    async fn wait(&self) {
        println!("[voiceform] Press Enter to continue...");
        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        let _ = reader.read_line(&mut line).await;
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn build_speech(backend: &str, config: &Config) -> anyhow::Result<Box<dyn Speech>> {
    match backend {
        "console" => Ok(Box::new(ConsoleSpeech::new())),
        "http" => Ok(Box::new(HttpSpeech::new(&config.speech.url))),
        other => bail!("Unknown speech backend: {} (expected console or http)", other),
    }
}

async fn open_page(endpoint: &str, url: &str) -> anyhow::Result<(CdpClient, CdpPage)> {
    let client = CdpClient::connect(endpoint)
        .await
        .with_context(|| format!("connecting to browser at {}", endpoint))?;
    let page = client.new_page().await.context("opening a new page")?;
    page.navigate(url)
        .await
        .with_context(|| format!("navigating to {}", url))?;
    Ok((client, page))
}

async fn run_fill(
    config: &Config,
    session: SessionConfig,
    url: &str,
    endpoint: Option<String>,
    speech: Option<String>,
) -> anyhow::Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| config.browser.endpoint.clone());
    let backend = speech.unwrap_or_else(|| config.speech.backend.clone());

    let speech = build_speech(&backend, config)?;
    let (client, page) = open_page(&endpoint, url).await?;
    info!(url = %url, backend = %backend, "starting form-fill session");

    let gate = StdinGate;
    let result = run_session(&page, speech.as_ref(), &gate, &session).await;

    if let Err(e) = client.close_page(page.target_id()).await {
        info!(error = %e, "failed to close page");
    }
    result.context("form-fill session failed")
}

async fn run_inspect(config: &Config, url: &str, endpoint: Option<String>) -> anyhow::Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| config.browser.endpoint.clone());
    let (client, page) = open_page(&endpoint, url).await?;

    let fields = extract_fields(&page).await.context("extracting fields")?;
    if fields.is_empty() {
        println!("No form fields found.");
    }
    for field in &fields {
        let required = if field.required { " (required)" } else { "" };
        println!(
            "{} [{:?}/{:?}]{}",
            field.label, field.structural, field.purpose, required
        );
        for option in &field.options {
            println!("    - {} ({})", option.text, option.value);
        }
    }

    if let Err(e) = client.close_page(page.target_id()).await {
        info!(error = %e, "failed to close page");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let session = config.session.to_session_config();

    match cli.command {
        Commands::Fill {
            url,
            endpoint,
            speech,
        } => run_fill(&config, session, &url, endpoint, speech).await,
        Commands::Inspect { url, endpoint } => run_inspect(&config, &url, endpoint).await,
    }
}
