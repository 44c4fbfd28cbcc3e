#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod service_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use service_config::{RemoteConfig, ServerConfig, ServiceConfig};
