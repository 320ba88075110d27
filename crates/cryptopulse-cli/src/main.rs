mod export;
mod report;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cryptopulse_core::{AccountsFile, AppConfig, RawRecord, TrackedAccount};
use cryptopulse_sentiment::pipeline::clean_record;
use cryptopulse_sentiment::{Lexicon, Pipeline, PipelineConfig, SentimentAnalyzer};
use cryptopulse_twitter::{fetch_all_tweets, resolve_user_ids, TwitterClient};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cryptopulse")]
#[command(about = "Sentiment analysis of crypto influencer posts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve tracked accounts and fetch their recent posts as JSON
    Fetch {
        /// Write raw records to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the sentiment pipeline, export a CSV and print a markdown summary
    Analyze {
        /// Read raw records saved by `fetch` instead of calling the API
        #[arg(long)]
        input: Option<PathBuf>,
        /// CSV destination (defaults to `CRYPTOPULSE_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Export only crypto-related posts
        #[arg(long)]
        relevant_only: bool,
    },
    /// Clean, score and classify a single text
    Score {
        /// Text to score
        text: String,
    },
    /// List tracked accounts
    Accounts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cryptopulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fetch { output } => run_fetch(&config, output.as_deref()).await,
        Commands::Analyze {
            input,
            output,
            relevant_only,
        } => run_analyze(&config, input.as_deref(), output.as_deref(), relevant_only).await,
        Commands::Score { text } => run_score(&config, &text),
        Commands::Accounts => run_accounts(&config),
    }
}

/// Fetch raw records for every tracked account and write them as JSON.
///
/// # Errors
///
/// Returns an error if the bearer token is missing, no account resolves, or
/// the output cannot be written. Per-account failures are logged and skipped.
async fn run_fetch(config: &AppConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let records = fetch_raw_records(config).await?;

    match output {
        Some(path) => {
            export::save_raw_records(&records, path)?;
            println!("saved {} raw records to {}", records.len(), path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&records)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Run the full pipeline, export the CSV and print the markdown summary.
///
/// # Errors
///
/// Returns an error if retrieval or loading fails, the lexicon file is
/// invalid, or the CSV cannot be written.
async fn run_analyze(
    config: &AppConfig,
    input: Option<&Path>,
    output: Option<&Path>,
    relevant_only: bool,
) -> anyhow::Result<()> {
    let raw = match input {
        Some(path) => export::load_raw_records(path)?,
        None => fetch_raw_records(config).await?,
    };

    let pipeline = build_pipeline(config)?;
    let classified = pipeline.process(raw);

    let output = output.unwrap_or(config.output_path.as_path());
    let written = export::write_csv(
        classified
            .iter()
            .filter(|record| !relevant_only || record.topic_relevant),
        output,
    )?;
    tracing::info!(path = %output.display(), rows = written, relevant_only, "exported results");

    let summary = cryptopulse_sentiment::summarize(&classified);
    let markdown = report::render_markdown(&summary).context("failed to render summary")?;
    print!("{markdown}");
    println!();
    println!("Results saved to `{}` ({written} rows)", output.display());
    Ok(())
}

#[derive(Debug, Serialize)]
struct ScoreOutput<'a> {
    text: &'a str,
    cleaned_text: &'a str,
    compound: f64,
    positive: f64,
    negative: f64,
    neutral: f64,
    category: cryptopulse_sentiment::Category,
    topic_relevant: bool,
}

/// Score one text without length filtering and print the result as JSON.
///
/// # Errors
///
/// Returns an error if the configured lexicon file cannot be loaded.
fn run_score(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let cleaned = clean_record(RawRecord::new(text, "", ""));
    let record = pipeline.classify_record(pipeline.score_record(cleaned));

    let scores = record.scores();
    let output = ScoreOutput {
        text,
        cleaned_text: record.cleaned_text(),
        compound: scores.compound,
        positive: scores.positive,
        negative: scores.negative,
        neutral: scores.neutral,
        category: record.category,
        topic_relevant: record.topic_relevant,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the tracked account list.
///
/// # Errors
///
/// Returns an error if the configured accounts file is unreadable or invalid.
fn run_accounts(config: &AppConfig) -> anyhow::Result<()> {
    let accounts = load_tracked_accounts(config)?;
    println!("{:<20}DISPLAY NAME", "USERNAME");
    for account in &accounts.accounts {
        println!("{}", account_line(account));
    }
    Ok(())
}

fn account_line(account: &TrackedAccount) -> String {
    format!("{:<20}{}", account.username, account.display_name())
}

async fn fetch_raw_records(config: &AppConfig) -> anyhow::Result<Vec<RawRecord>> {
    let token = config.require_bearer_token()?;
    let accounts = load_tracked_accounts(config)?;

    let client = TwitterClient::new(
        token,
        config.request_timeout_secs,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .context("failed to build Twitter client")?;

    let usernames = accounts.usernames();
    let resolved = resolve_user_ids(
        &client,
        &usernames,
        Duration::from_millis(config.lookup_delay_ms),
    )
    .await;
    if resolved.is_empty() {
        anyhow::bail!(
            "none of the {} tracked accounts could be resolved; check TWITTER_BEARER_TOKEN",
            usernames.len()
        );
    }

    let records = fetch_all_tweets(
        &client,
        &resolved,
        config.max_results,
        Duration::from_millis(config.fetch_delay_ms),
    )
    .await;
    Ok(records)
}

fn load_tracked_accounts(config: &AppConfig) -> anyhow::Result<AccountsFile> {
    match &config.accounts_path {
        Some(path) => cryptopulse_core::load_accounts(path)
            .with_context(|| format!("failed to load accounts from {}", path.display())),
        None => Ok(cryptopulse_core::default_accounts()),
    }
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<Pipeline> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_vader_file(path)
            .with_context(|| format!("failed to load lexicon from {}", path.display()))?,
        None => Lexicon::builtin(),
    };
    let pipeline_config = PipelineConfig {
        min_length: config.min_text_length,
        ..PipelineConfig::default()
    };
    Ok(Pipeline::new(pipeline_config, SentimentAnalyzer::new(lexicon)))
}
