use crate::config::ServiceConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tarot-interpret")]
#[command(about = "HTTP service interpreting three-card tarot spreads")]
pub struct CliConfig {
    #[arg(long, short, help = "TOML configuration file (defaults to environment variables)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the listening host")]
    pub host: Option<String>,

    #[arg(long, help = "Override the listening port")]
    pub port: Option<u16>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the service configuration: file or environment, then CLI overrides.
    pub fn load_service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                ServiceConfig::from_file(path)?
            }
            None => ServiceConfig::from_env()?,
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_overrides_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"127.0.0.1\"\nport = 5000").unwrap();

        let cli = CliConfig::parse_from([
            "tarot-interpret",
            "--config",
            file.path().to_str().unwrap(),
            "--port",
            "6000",
        ]);

        let config = cli.load_service_config().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 6000);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from([
            "tarot-interpret",
            "--config",
            "/definitely/not/here/tarot.toml",
        ]);
        assert!(cli.load_service_config().is_err());
    }
}
