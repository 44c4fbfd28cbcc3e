use crate::config::{RemoteConfig, ServiceConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Function runtime settings; only the remote section applies, there is no listener.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub remote: RemoteConfig,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            remote: ServiceConfig::from_env()?.remote,
        })
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        let config = ServiceConfig {
            remote: self.remote.clone(),
            ..ServiceConfig::default()
        };
        config.validate_config()?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
