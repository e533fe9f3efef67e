mod terminal;

pub use terminal::{OutputFormat, TerminalSurface};

use crate::submission::{HistoryEntry, ResultView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input rejected before any request was made.
    Validation,
    /// Blocking message, e.g. an API error in alert style.
    Alert,
    /// The request failed; the user should try again later.
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Whatever the submission flow draws on. Implementations use interior
/// mutability so one surface can be shared by overlapping submissions.
pub trait PresentationSurface: Send + Sync {
    fn input_text(&self) -> String;

    fn set_loading(&self, visible: bool);

    fn show_notice(&self, notice: &Notice);

    /// Replaces the result area with `view` and makes it visible.
    fn render_result(&self, view: &ResultView);

    fn prepend_history(&self, entry: &HistoryEntry);

    fn clear_highlight(&self, entry_id: u64);

    /// Empties and hides the result area.
    fn clear_result(&self);

    fn scroll_result_into_view(&self) {}
}
