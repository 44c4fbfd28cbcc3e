use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tarot_interpret::utils::error::ErrorCategory;
use tarot_interpret::utils::{logger, validation::Validate};
use tarot_interpret::{server, CliConfig, InterpretationService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting tarot-interpret");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli
        .load_service_config()
        .and_then(|config| config.validate().map(|_| config))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration failed: {} (Category: {:?})",
                e,
                e.category()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            let exit_code = match e.category() {
                ErrorCategory::Configuration => 2,
                ErrorCategory::Input | ErrorCategory::Internal => 1,
            };
            std::process::exit(exit_code);
        }
    };

    let service = Arc::new(InterpretationService::from_config(config.remote.clone())?);
    let app = server::router(service);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("📡 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
