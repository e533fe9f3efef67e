use crate::predictor::Prediction;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const NO_MATCHED_TITLE: &str = "No matching title";
pub const NO_MATCHED_CONTENT: &str = "No matching content";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionView {
    pub category: String,
    pub label: String,
    pub fake_percent: String,
    pub real_percent: String,
    pub matched_title: Option<String>,
    pub excerpt: Option<String>,
    pub captured_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorView {
    pub message: String,
    pub captured_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultView {
    Prediction(PredictionView),
    Error(ErrorView),
}

impl PredictionView {
    pub fn new(prediction: &Prediction, captured_at: DateTime<Local>) -> Self {
        Self {
            category: prediction.category.clone(),
            label: category_label(&prediction.category),
            fake_percent: format_percent(prediction.probabilities.fake),
            real_percent: format_percent(prediction.probabilities.real),
            matched_title: prediction.matched_title.clone(),
            excerpt: prediction
                .database_entry
                .as_ref()
                .map(|entry| entry.content.clone()),
            captured_at,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Verdict: {}", self.label),
            format!("Fake probability: {}", self.fake_percent),
            format!("Real probability: {}", self.real_percent),
            format!(
                "Matched title: {}",
                self.matched_title.as_deref().unwrap_or(NO_MATCHED_TITLE)
            ),
            format!(
                "Excerpt: {}",
                self.excerpt.as_deref().unwrap_or(NO_MATCHED_CONTENT)
            ),
        ]
    }
}

impl ErrorView {
    pub fn new(message: impl Into<String>, captured_at: DateTime<Local>) -> Self {
        Self {
            message: message.into(),
            captured_at,
        }
    }
}

impl ResultView {
    pub fn captured_at(&self) -> DateTime<Local> {
        match self {
            Self::Prediction(view) => view.captured_at,
            Self::Error(view) => view.captured_at,
        }
    }

    pub fn timestamp_line(&self) -> String {
        format!("Checked at: {}", format_timestamp(self.captured_at()))
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Prediction(view) => view.lines(),
            Self::Error(view) => vec![format!("Error: {}", view.message)],
        }
    }

    /// Markup fragment for the result area. Every interpolated value is
    /// escaped, service-provided text included.
    pub fn to_markup(&self) -> String {
        let body = match self {
            Self::Prediction(view) => {
                let fields = [
                    ("Verdict", view.label.as_str()),
                    ("Fake probability", view.fake_percent.as_str()),
                    ("Real probability", view.real_percent.as_str()),
                    (
                        "Matched title",
                        view.matched_title.as_deref().unwrap_or(NO_MATCHED_TITLE),
                    ),
                    (
                        "Excerpt",
                        view.excerpt.as_deref().unwrap_or(NO_MATCHED_CONTENT),
                    ),
                ];
                fields
                    .iter()
                    .map(|(name, value)| format!("<strong>{}:</strong> {}", name, escape_markup(value)))
                    .collect::<Vec<_>>()
                    .join("<br>\n")
            }
            Self::Error(view) => format!("<strong>Error:</strong> {}", escape_markup(&view.message)),
        };

        format!(
            "<div id=\"result-text\">\n{}\n</div>\n<p id=\"result-timestamp\">{}</p>",
            body,
            escape_markup(&self.timestamp_line())
        )
    }
}

pub fn category_label(category: &str) -> String {
    match category {
        "fake" => "Fake news".to_string(),
        "real" => "Real news".to_string(),
        other => other.to_string(),
    }
}

/// Probability in `[0, 1]` as a percentage with two decimals.
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
