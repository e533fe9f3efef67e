use crate::{Error, Result, config::TitleField};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub title: String,
    pub language: Option<Language>,
}

impl PredictionRequest {
    pub fn new(title: impl Into<String>, language: Option<Language>) -> Self {
        Self {
            title: title.into(),
            language,
        }
    }

    /// JSON body sent to the service, with the text under `field`.
    pub fn to_body(&self, field: TitleField) -> Value {
        let mut body = Map::new();
        body.insert(field.as_str().to_string(), Value::String(self.title.clone()));
        if let Some(language) = self.language {
            body.insert(
                "language".to_string(),
                Value::String(language.as_str().to_string()),
            );
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub fake: f64,
    pub real: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEntry {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub category: String,
    pub probabilities: Probabilities,
    pub matched_title: Option<String>,
    pub database_entry: Option<DatabaseEntry>,
    pub input_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Error(String),
    Success(Prediction),
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    probabilities: Option<Probabilities>,
    #[serde(default)]
    matched_title: Option<String>,
    #[serde(default)]
    database_entry: Option<DatabaseEntry>,
    #[serde(default)]
    input_title: Option<String>,
}

impl PredictionResult {
    /// Decodes a response body. A truthy `error` field wins over everything
    /// else; otherwise `category` and `probabilities` are required.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let response: PredictionResponse = serde_json::from_slice(body)
            .map_err(|e| Error::invalid_response(format!("body is not valid JSON: {e}")))?;

        if let Some(message) = response.error.as_ref().and_then(error_message) {
            return Ok(Self::Error(message));
        }

        let category = response
            .category
            .ok_or_else(|| Error::invalid_response("missing category"))?;
        let probabilities = response
            .probabilities
            .ok_or_else(|| Error::invalid_response("missing probabilities"))?;

        Ok(Self::Success(Prediction {
            category,
            probabilities,
            matched_title: response.matched_title.filter(|t| !t.is_empty()),
            database_entry: response.database_entry.filter(|e| !e.content.is_empty()),
            input_title: response.input_title,
        }))
    }
}

/// Message for a reported error. Null, `false`, zero and the empty string
/// count as no error at all.
fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
