pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use config::{RemoteConfig, ServiceConfig};
pub use core::{orchestrator::InterpretationService, remote::MistralClient};
pub use domain::model::{Card, InterpretationResponse, InterpretationResult, Source, Spread};
pub use utils::error::{InterpretError, Result};
