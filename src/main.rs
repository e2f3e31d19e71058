use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use civitai_fetch::api::CivitaiClient;
use civitai_fetch::config::Config;
use civitai_fetch::download::{CredentialMode, Wget};
use civitai_fetch::fetcher::Fetcher;

#[derive(Parser, Debug)]
#[command(name = "civitai-fetch", version, about = "Download a model file from CivitAI by model-version id")]
struct Cli {
    /// CivitAI model ID to download
    #[arg(short, long)]
    model: String,

    /// CivitAI API token (if not set in environment)
    #[arg(short, long)]
    token: Option<String>,

    /// Directory to save into (defaults to the current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Send the token as an Authorization header instead of in the URL
    #[arg(long)]
    header_auth: bool,

    /// Optional path to a config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let tool = match &cfg.wget_path {
        Some(p) => Wget::new(p.clone()),
        None => Wget::discover(),
    };
    let mut fetcher = Fetcher::new(CivitaiClient::new(cfg.base_url()), tool);
    fetcher.token_env = cfg.token_env().to_string();
    fetcher.credential_mode = if cli.header_auth {
        CredentialMode::Header
    } else {
        cfg.credential_mode.unwrap_or_default()
    };
    fetcher.output_dir = cli.output_dir.or(cfg.output_dir);
    fetcher.show_progress = true;

    fetcher.run(&cli.model, cli.token.as_deref()).await?;
    Ok(())
}

/// `-v` flags raise only this crate's level; dependencies stay at `warn`.
fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,civitai_fetch=info",
        _ => "warn,civitai_fetch=debug",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
