use super::{Notice, NoticeKind, PresentationSurface};
use crate::submission::{HistoryEntry, ResultView};
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markup,
}

/// Line-oriented surface: the loading indicator, notices and results are
/// written to `out` as they happen.
pub struct TerminalSurface<W: Write + Send> {
    input: String,
    format: OutputFormat,
    out: Mutex<W>,
    loading: AtomicBool,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout(input: impl Into<String>, format: OutputFormat) -> Self {
        Self::new(input, format, std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(input: impl Into<String>, format: OutputFormat, out: W) -> Self {
        Self {
            input: input.into(),
            format,
            out: Mutex::new(out),
            loading: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, lines: &[String]) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        for line in lines {
            if let Err(e) = writeln!(out, "{}", line) {
                warn!("Failed to write to terminal: {}", e);
                return;
            }
        }
        if let Err(e) = out.flush() {
            warn!("Failed to flush terminal: {}", e);
        }
    }

    fn view_lines(&self, view: &ResultView) -> Vec<String> {
        match self.format {
            OutputFormat::Text => {
                let mut lines = view.lines();
                lines.push(view.timestamp_line());
                lines
            }
            OutputFormat::Markup => vec![view.to_markup()],
        }
    }
}

impl<W: Write + Send> PresentationSurface for TerminalSurface<W> {
    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_loading(&self, visible: bool) {
        let was_visible = self.loading.swap(visible, Ordering::SeqCst);
        if visible && !was_visible {
            self.emit(&["Analyzing...".to_string()]);
        }
    }

    fn show_notice(&self, notice: &Notice) {
        let prefix = match notice.kind {
            NoticeKind::Validation => "!",
            NoticeKind::Alert => "[alert]",
            NoticeKind::Failure => "x",
        };
        self.emit(&[format!("{} {}", prefix, notice.message)]);
    }

    fn render_result(&self, view: &ResultView) {
        self.emit(&self.view_lines(view));
    }

    fn prepend_history(&self, entry: &HistoryEntry) {
        let marker = if entry.highlighted { "*" } else { " " };
        let mut lines = vec![format!("{} #{}", marker, entry.id)];
        lines.extend(self.view_lines(&entry.view));
        self.emit(&lines);
    }

    fn clear_highlight(&self, entry_id: u64) {
        debug!("Highlight expired for history entry #{}", entry_id);
    }

    fn clear_result(&self) {
        debug!("Result area cleared");
    }
}
