use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use filing_engine::{ClientSettings, EngineConfig, Url};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// Search company filings and download them.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "filing", version)]
pub struct Cli {
    /// RON file with an `AppConfig`; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Backend origin serving `/api/reports` and `/api/report/pdf`.
    #[arg(long, env = "FILING_BASE_URL")]
    pub base_url: Option<String>,
    /// Directory downloaded documents are saved into.
    #[arg(long, env = "FILING_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
    /// Gap between two downloads of a batch, in milliseconds.
    #[arg(long)]
    pub pacing_ms: Option<u64>,
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub pacing_ms: u64,
    pub connect_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            output_dir: PathBuf::from("downloads"),
            pacing_ms: 400,
            connect_timeout_secs: 10,
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional config file, then command-line flags.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(pacing_ms) = cli.pacing_ms {
            config.pacing_ms = pacing_ms;
        }
        if let Some(log) = cli.log {
            config.log_destination = log;
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base url `{}`", self.base_url))?;
        let mut client = ClientSettings::new(base_url);
        client.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        let mut engine = EngineConfig::new(client, self.output_dir.clone());
        engine.pacing = Duration::from_millis(self.pacing_ms);
        Ok(engine)
    }
}
