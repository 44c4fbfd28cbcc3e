//! One-shot interpretation: reads a request body from a file (or stdin) and
//! prints the response envelope.

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tarot_interpret::domain::model::InterpretationResponse;
use tarot_interpret::utils::logger;
use tarot_interpret::utils::validation::Validate;
use tarot_interpret::{InterpretationService, ServiceConfig};

#[derive(Parser)]
#[command(name = "interpret_spread")]
#[command(about = "Interpret a single three-card spread and print the result")]
struct Args {
    /// Path to the JSON request body (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Path to TOML configuration file (environment variables otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    let config = match path {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => ServiceConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn read_request(input: Option<&Path>) -> anyhow::Result<serde_json::Value> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read request from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&raw).context("request is not valid JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let body = read_request(args.input.as_deref())?;

    let service = InterpretationService::from_config(config.remote)?;

    let result = service.handle(&body).await?;
    let response = InterpretationResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
