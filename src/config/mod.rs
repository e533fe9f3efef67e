mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;

    if config.predictor.base_url.trim().is_empty() {
        return Err(Error::config("predictor.base_url must not be empty"));
    }
    if config.submission.max_title_chars == Some(0) {
        return Err(Error::config(
            "submission.max_title_chars must be positive when set",
        ));
    }

    Ok(config)
}

impl PredictorConfig {
    /// Full endpoint URL: base origin joined with the prediction path.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}
