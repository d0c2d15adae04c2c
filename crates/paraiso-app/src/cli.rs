//! CLI argument definitions for the Paraíso server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use paraiso_core::config::ParaisoConfig;

/// Paraíso Azul hotel FAQ chatbot and static site server.
#[derive(Parser, Debug, Default)]
#[command(name = "paraiso", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Path to the FAQ dataset JSON file.
    #[arg(short = 'd', long = "dataset")]
    pub dataset: Option<PathBuf>,

    /// Directory holding the landing page and CSS/img/video folders.
    #[arg(short = 's', long = "static-dir")]
    pub static_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PARAISO_CONFIG env var > ./config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        self.resolve_config_path_with(std::env::var("PARAISO_CONFIG").ok())
    }

    fn resolve_config_path_with(&self, env_value: Option<String>) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Some(p) = env_value {
            return PathBuf::from(p);
        }
        PathBuf::from("config.toml")
    }

    /// Resolve the server port.
    ///
    /// Priority: --port flag > PARAISO_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        self.resolve_port_with(config_port, std::env::var("PARAISO_PORT").ok())
    }

    fn resolve_port_with(&self, config_port: u16, env_value: Option<String>) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Some(p) = env_value.and_then(|v| v.parse::<u16>().ok()) {
            return p;
        }
        config_port
    }

    /// Fold every override into the loaded configuration.
    pub fn apply(&self, config: &mut ParaisoConfig) {
        config.server.port = self.resolve_port(config.server.port);
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(ref dataset) = self.dataset {
            config.dataset.path = dataset.to_string_lossy().to_string();
        }
        if let Some(ref dir) = self.static_dir {
            config.static_files.root = dir.to_string_lossy().to_string();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}
