use super::KeyValueStore;
use crate::{Result, submission::PredictionView};
use std::sync::Arc;
use tracing::{debug, warn};

pub const PREDICTION_RESULT_KEY: &str = "predictionResult";
pub const NO_RESULT_AVAILABLE: &str = "No result available.";

/// Carries one prediction from a `check` to a later `outcome` under a fixed
/// key. The stored value is never expired.
#[derive(Clone)]
pub struct ResultHandoff {
    store: Arc<KeyValueStore>,
}

impl ResultHandoff {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn stash(&self, view: &PredictionView) -> Result<()> {
        let value = serde_json::to_string(view)?;
        self.store.set(PREDICTION_RESULT_KEY, &value).await?;
        debug!("Stashed prediction result for the outcome view");
        Ok(())
    }

    /// Reads the stashed result. An unreadable value counts as absent.
    pub async fn load(&self) -> Result<Option<PredictionView>> {
        let Some(value) = self.store.get(PREDICTION_RESULT_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&value) {
            Ok(view) => Ok(Some(view)),
            Err(e) => {
                warn!("Ignoring unreadable stashed result: {}", e);
                Ok(None)
            }
        }
    }

    /// Lines for the outcome view, or the placeholder when nothing is stored.
    pub async fn outcome_lines(&self) -> Result<Vec<String>> {
        Ok(match self.load().await? {
            Some(view) => view.lines(),
            None => vec![NO_RESULT_AVAILABLE.to_string()],
        })
    }
}
