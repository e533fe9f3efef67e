mod flow;
mod history;
mod input;
mod render;

pub use flow::{ALREADY_RUNNING, FlowOptions, RETRY_LATER, SubmissionFlow};
pub use history::{HistoryEntry, ResultHistory};
pub use input::{DEFAULT_MAX_TITLE_CHARS, ValidationError, classify_language, sanitize, validate};
pub use render::{
    ErrorView, NO_MATCHED_CONTENT, NO_MATCHED_TITLE, PredictionView, ResultView, category_label,
    escape_markup, format_percent, format_timestamp,
};
