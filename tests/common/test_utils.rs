use fakenews_detector::{
    Result,
    config::{self, Config},
    predictor::{Prediction, PredictionResult, Probabilities},
    storage::KeyValueStore,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration pointing at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    config::parse(&format!(
        "predictor:\n  base_url: \"{}\"\nstorage:\n  database_path: \":memory:\"\nlogs:\n  level: debug\n",
        base_url
    ))
    .expect("test config parses")
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Create a temporary database for testing
pub async fn create_test_store() -> Result<(TempDir, String, KeyValueStore)> {
    let temp_dir = create_temp_dir();
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();
    let store = KeyValueStore::new(&db_path_str).await?;
    Ok((temp_dir, db_path_str, store))
}

/// Success body in the prediction service's wire format
pub fn success_body(category: &str, fake: f64, real: f64) -> Value {
    json!({
        "category": category,
        "probabilities": {"fake": fake, "real": real}
    })
}

pub fn success_result(category: &str, fake: f64, real: f64) -> PredictionResult {
    PredictionResult::Success(Prediction {
        category: category.to_string(),
        probabilities: Probabilities { fake, real },
        matched_title: None,
        database_entry: None,
        input_title: None,
    })
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
predictor:
  base_url: "https://timmytry.example.com"
  title_field: title
  language_tag: true
  sanitize: quotes
submission:
  max_title_chars: 200
  single_flight: supersede
  persist_result: true
display:
  error_style: panel
  history: false
  highlight_ms: 2000
storage:
  database_path: ":memory:"
logs:
  level: "debug"
"#;
