use std::time::Duration;

use color_eyre::eyre::Result;
use serde::Deserialize;
use tracing::info;

use crate::utils::{PROJECT_NAME, get_config_dir};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
  pub premium: bool,
}

impl Default for UserConfig {
  fn default() -> Self {
    Self { premium: true }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
  pub latency_ms: u64,
  pub offline: bool,
  /// Number of API calls that fail before the API starts answering.
  pub flaky_calls: u32,
  /// Extra attempts each screen's API service makes before giving up.
  pub retries: usize,
}

impl NetworkConfig {
  pub fn latency(&self) -> Duration {
    Duration::from_millis(self.latency_ms)
  }
}

impl Default for NetworkConfig {
  fn default() -> Self {
    Self { latency_ms: 300, offline: false, flaky_calls: 0, retries: 2 }
  }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub user: UserConfig,
  #[serde(default)]
  pub network: NetworkConfig,
  #[serde(default)]
  pub tabs: Vec<String>,
}

impl Config {
  pub fn new() -> Result<Self, config::ConfigError> {
    let config_dir = get_config_dir();
    let mut builder =
      config::Config::builder().add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

    let config_files = [
      ("config.json5", config::FileFormat::Json5),
      ("config.json", config::FileFormat::Json),
      ("config.yaml", config::FileFormat::Yaml),
      ("config.toml", config::FileFormat::Toml),
      ("config.ini", config::FileFormat::Ini),
    ];
    for (file, format) in &config_files {
      let path = config_dir.join(file);
      if path.exists() {
        info!("Reading configuration from {}", path.display());
      }
      builder = builder.add_source(config::File::from(path).format(*format).required(false));
    }
    builder = builder.add_source(
      config::Environment::with_prefix(&PROJECT_NAME).prefix_separator("_").separator("__").try_parsing(true),
    );

    let cfg: Self = builder.build()?.try_deserialize()?;
    Ok(cfg)
  }
}
