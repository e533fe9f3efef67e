use super::types::*;
use crate::{
    Error, Result,
    config::{PredictorConfig, TitleField},
};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResult>;
}

pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
    title_field: TitleField,
}

impl HttpPredictor {
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint(),
            title_field: config.title_field,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResult> {
        let body = request.to_body(self.title_field);
        debug!("POST {} with {} chars", self.endpoint, request.title.chars().count());

        // `.json()` sets Content-Type: application/json
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Received {} byte prediction response", bytes.len());

        PredictionResult::from_slice(&bytes)
    }
}
