use crate::submission::DEFAULT_MAX_TITLE_CHARS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub predictor: PredictorConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub base_url: String,
    #[serde(default = "default_predict_path")]
    pub path: String,
    #[serde(default)]
    pub title_field: TitleField,
    #[serde(default = "default_true")]
    pub language_tag: bool,
    #[serde(default)]
    pub sanitize: Sanitize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: Option<usize>,
    #[serde(default)]
    pub single_flight: SingleFlight,
    #[serde(default)]
    pub persist_result: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub error_style: ErrorStyle,
    #[serde(default)]
    pub history: bool,
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
    #[serde(default = "default_true")]
    pub auto_scroll: bool,
    #[serde(default)]
    pub expose_transport_detail: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Name of the JSON field that carries the submitted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleField {
    #[default]
    Title,
    Text,
}

impl TitleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sanitize {
    None,
    #[default]
    Quotes,
    QuotesAndBackslash,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleFlight {
    #[default]
    Supersede,
    Ignore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStyle {
    #[default]
    Panel,
    Alert,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_title_chars: default_max_title_chars(),
            single_flight: SingleFlight::default(),
            persist_result: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            error_style: ErrorStyle::default(),
            history: false,
            highlight_ms: default_highlight_ms(),
            auto_scroll: true,
            expose_transport_detail: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_title_chars() -> Option<usize> {
    Some(DEFAULT_MAX_TITLE_CHARS)
}

fn default_highlight_ms() -> u64 {
    2000
}

fn default_database_path() -> String {
    "detector.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
