use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use veritas_analysis::{CompletionSettings, StatementAnalyzer};
use veritas_client::{AnalysisClient, BUSY_MESSAGE, StatementForm, render_text};
use veritas_common::observability::init_logging;
use veritas_config::{VeritasConfig, VeritasConfigLoader};
use veritas_llm::openai::OpenAiClient;
use veritas_server::{AppState, serve};

const DEFAULT_CONFIG_FILE: &str = "veritas.yaml";

#[derive(Parser, Debug)]
#[command(name = "veritas", version, about = "Political statement consistency analysis")]
struct Cli {
    /// YAML config file; a missing default file is ignored.
    #[arg(long, global = true, env = "VERITAS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the analysis HTTP handler.
    Serve {
        /// Overrides `server.bind_addr`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Submit one statement to a running handler and print the result.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[arg(long)]
    statement: Option<String>,
    #[arg(long)]
    speaker: Option<String>,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    date: Option<String>,
    /// Start from the sample statement; explicit flags still override.
    #[arg(long)]
    demo: bool,
    /// Overrides `client.endpoint`.
    #[arg(long)]
    endpoint: Option<String>,
    /// Print the raw JSON result instead of the text report.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let loader = match &cli.config {
        Some(path) => VeritasConfigLoader::new().with_file(path),
        None => VeritasConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let cfg: VeritasConfig = loader.load().context("failed to load configuration")?;

    let log_file = init_logging("veritas", &cfg.logging)?;
    tracing::debug!(path = %log_file.display(), "logging.ready");

    match cli.command {
        Command::Serve { bind } => run_server(cfg, bind).await,
        Command::Analyze(args) => run_analyze(cfg, args).await,
    }
}

async fn run_server(cfg: VeritasConfig, bind: Option<String>) -> Result<()> {
    if cfg.llm.auth_token.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; every analysis will fail");
    }

    let llm = OpenAiClient::new(cfg.llm.auth_token, cfg.llm.model, &cfg.llm.endpoint)?;
    let analyzer = StatementAnalyzer::new(
        Arc::new(llm),
        CompletionSettings {
            temperature: cfg.llm.temperature,
            max_tokens: cfg.llm.max_tokens,
        },
    );

    let addr = bind.unwrap_or(cfg.server.bind_addr);
    serve(&addr, Arc::new(AppState { analyzer })).await
}

async fn run_analyze(cfg: VeritasConfig, args: AnalyzeArgs) -> Result<()> {
    let mut form = if args.demo {
        StatementForm::demo()
    } else {
        StatementForm::default()
    };
    if let Some(statement) = args.statement {
        form.statement = statement;
    }
    if let Some(speaker) = args.speaker {
        form.speaker = speaker;
    }
    if args.date.is_some() {
        form.date = args.date;
    }

    let endpoint = args.endpoint.unwrap_or(cfg.client.endpoint);
    let client = AnalysisClient::new(&endpoint)?;

    eprintln!("{BUSY_MESSAGE}");
    let result = client.submit(form).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_text(&result));
    }
    Ok(())
}
