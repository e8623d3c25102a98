//! Layered configuration: TOML file, then `PHOTON_*` environment variables,
//! then command-line flags.

use std::{path::Path, time::Duration};

use anyhow::Context as _;
use photon_client::ApiConfig;
use photon_core::responsive::ThumbnailLadder;
use serde::Deserialize;

/// Shape of the configuration file and environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub base_url:     String,
  pub username:     String,
  pub password:     String,
  pub timeout_secs: u64,
  /// Breakpoint ladder override; validated on load.
  pub ladder:       ThumbnailLadder,
}

impl Default for Settings {
  fn default() -> Self {
    let api = ApiConfig::default();
    Self {
      base_url:     api.base_url,
      username:     api.username,
      password:     api.password,
      timeout_secs: api.timeout.as_secs(),
      ladder:       ThumbnailLadder::default(),
    }
  }
}

impl Settings {
  /// Read `path` (optional) and the `PHOTON_` environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PHOTON"))
      .build()
      .with_context(|| format!("failed to read config {}", path.display()))?;

    raw
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.base_url.clone(),
      username: self.username.clone(),
      password: self.password.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }
}
