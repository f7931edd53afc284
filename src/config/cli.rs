use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "school-locator")]
#[command(about = "Stores schools and lists them by distance from a point")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Database url, e.g. sqlite://schools.db")]
    pub database_url: Option<String>,

    #[arg(long)]
    pub max_connections: Option<u32>,

    #[arg(long, help = "Log format: compact or json")]
    pub log_format: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the config file if given, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
