//! Layered configuration: TOML file, then `HANDYHUB_*` environment, then
//! command-line flags.

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use handyhub_app::GateRoutes;
use handyhub_client::ApiConfig;
use serde::Deserialize;

/// Shape of the config file / environment.
///
/// ```toml
/// base_url = "https://handyhub.example"
/// token = "…"
/// timeout_secs = 10
///
/// [routes]
/// login = "/auth/sign-in"
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub base_url:     String,
  pub token:        Option<String>,
  pub timeout_secs: u64,
  pub routes:       GateRoutes,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      base_url:     "http://localhost:8080".into(),
      token:        None,
      timeout_secs: 30,
      routes:       GateRoutes::default(),
    }
  }
}

impl Settings {
  /// Read `path` (if it exists) and overlay `HANDYHUB_*` variables. Nested
  /// keys use a double underscore, e.g. `HANDYHUB_ROUTES__LOGIN`.
  pub fn load(path: &Path) -> Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("HANDYHUB")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .with_context(|| format!("reading config {}", path.display()))?
      .try_deserialize()
      .context("invalid configuration")
  }

  /// CLI flags override file and environment.
  pub fn override_with(mut self, url: Option<String>, token: Option<String>) -> Self {
    if let Some(url) = url {
      self.base_url = url;
    }
    if token.is_some() {
      self.token = token;
    }
    self
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.base_url.clone(),
      token:    self.token.clone().filter(|t| !t.is_empty()),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }
}
