use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_DIRECTIVES: &str = "tarot_interpret=info,tower_http=info,warn";
const VERBOSE_DIRECTIVES: &str = "tarot_interpret=debug,tower_http=debug,reqwest=debug,info";
const LAMBDA_DIRECTIVES: &str = "tarot_interpret=info,lambda_runtime=warn,warn";

/// `RUST_LOG` wins over the built-in directives.
fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

pub fn cli_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        SERVICE_DIRECTIVES
    }
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(cli_directives(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter(LAMBDA_DIRECTIVES))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time() // the function log stream adds its own timestamps
                .json()
                .with_current_span(false),
        )
        .init();
}
