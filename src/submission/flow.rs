use super::{
    history::{HistoryEntry, ResultHistory},
    input::{self, ValidationError},
    render::{ErrorView, PredictionView, ResultView},
};
use crate::{
    Error, Result,
    config::{Config, ErrorStyle, Sanitize, SingleFlight},
    predictor::{PredictionRequest, PredictionResult, Predictor},
    storage::ResultHandoff,
    surface::{Notice, NoticeKind, PresentationSurface},
};
use chrono::Local;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const RETRY_LATER: &str = "Request failed, please try again later.";
pub const ALREADY_RUNNING: &str = "A check is already running, please wait for its result.";

#[derive(Debug, Clone)]
pub struct FlowOptions {
    pub max_title_chars: Option<usize>,
    pub sanitize: Sanitize,
    pub language_tag: bool,
    pub error_style: ErrorStyle,
    pub history: bool,
    pub highlight: Duration,
    pub auto_scroll: bool,
    pub single_flight: SingleFlight,
    pub expose_transport_detail: bool,
    pub persist_result: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            max_title_chars: Some(input::DEFAULT_MAX_TITLE_CHARS),
            sanitize: Sanitize::Quotes,
            language_tag: true,
            error_style: ErrorStyle::Panel,
            history: false,
            highlight: Duration::from_secs(2),
            auto_scroll: true,
            single_flight: SingleFlight::Supersede,
            expose_transport_detail: false,
            persist_result: false,
        }
    }
}

impl FlowOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_title_chars: config.submission.max_title_chars,
            sanitize: config.predictor.sanitize,
            language_tag: config.predictor.language_tag,
            error_style: config.display.error_style,
            history: config.display.history,
            highlight: Duration::from_millis(config.display.highlight_ms),
            auto_scroll: config.display.auto_scroll,
            single_flight: config.submission.single_flight,
            expose_transport_detail: config.display.expose_transport_detail,
            persist_result: config.submission.persist_result,
        }
    }
}

/// Turns one submit action into at most one prediction call and at most one
/// render of its outcome.
pub struct SubmissionFlow {
    predictor: Arc<dyn Predictor>,
    surface: Arc<dyn PresentationSurface>,
    options: FlowOptions,
    handoff: Option<ResultHandoff>,
    latest: AtomicU64,
    in_flight: AtomicBool,
    history: Arc<Mutex<ResultHistory>>,
}

/// Shows the loading indicator for the lifetime of one submission. The
/// indicator is hidden on drop unless a newer submission has taken over.
struct LoadingGuard<'a> {
    flow: &'a SubmissionFlow,
    seq: u64,
    holds_flight: bool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flow: &'a SubmissionFlow, seq: u64, holds_flight: bool) -> Self {
        flow.surface.set_loading(true);
        Self {
            flow,
            seq,
            holds_flight,
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.flow.is_latest(self.seq) {
            self.flow.surface.set_loading(false);
        }
        if self.holds_flight {
            self.flow.in_flight.store(false, Ordering::SeqCst);
        }
    }
}

impl SubmissionFlow {
    pub fn new(
        predictor: Arc<dyn Predictor>,
        surface: Arc<dyn PresentationSurface>,
        options: FlowOptions,
    ) -> Self {
        Self {
            predictor,
            surface,
            options,
            handoff: None,
            latest: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
            history: Arc::new(Mutex::new(ResultHistory::new())),
        }
    }

    pub fn with_handoff(mut self, handoff: ResultHandoff) -> Self {
        self.handoff = Some(handoff);
        self
    }

    /// Reads the text from the surface and submits it.
    pub async fn submit(&self) -> Result<ResultView> {
        let raw = self.surface.input_text();
        self.submit_text(&raw).await
    }

    pub async fn submit_text(&self, raw: &str) -> Result<ResultView> {
        let submission_id = Uuid::new_v4();

        let request = match self.prepare(raw) {
            Ok(request) => request,
            Err(e) => {
                debug!("Submission {} rejected: {}", submission_id, e);
                self.surface
                    .show_notice(&Notice::new(NoticeKind::Validation, e.to_string()));
                return Err(e.into());
            }
        };

        let holds_flight = match self.options.single_flight {
            SingleFlight::Ignore => {
                if self
                    .in_flight
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    info!("Submission {} ignored, another one is in flight", submission_id);
                    self.surface
                        .show_notice(&Notice::new(NoticeKind::Alert, ALREADY_RUNNING));
                    return Err(Error::Busy);
                }
                true
            }
            SingleFlight::Supersede => false,
        };

        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = LoadingGuard::acquire(self, seq, holds_flight);
        info!(
            "Submission {} (#{}) sent, language: {:?}",
            submission_id, seq, request.language
        );

        let outcome = self.predictor.predict(request).await;
        drop(guard);

        if !self.is_latest(seq) {
            debug!("Submission {} (#{}) superseded, not rendering", submission_id, seq);
            return Err(Error::Superseded);
        }

        match outcome {
            Ok(PredictionResult::Success(prediction)) => {
                let view = PredictionView::new(&prediction, Local::now());
                info!(
                    "Submission {} (#{}) classified as {}",
                    submission_id, seq, view.category
                );
                self.stash(&view).await;

                let view = ResultView::Prediction(view);
                self.show(seq, view.clone());
                Ok(view)
            }
            Ok(PredictionResult::Error(message)) => {
                warn!(
                    "Submission {} (#{}) rejected by service: {}",
                    submission_id, seq, message
                );
                let view = ResultView::Error(ErrorView::new(message.clone(), Local::now()));
                match self.options.error_style {
                    ErrorStyle::Panel => self.show(seq, view),
                    ErrorStyle::Alert => self.surface.show_notice(&Notice::new(
                        NoticeKind::Alert,
                        format!("Error: {} ({})", message, view.timestamp_line()),
                    )),
                }
                Err(Error::Semantic(message))
            }
            Err(e) => {
                error!("Submission {} (#{}) failed: {}", submission_id, seq, e);
                if !self.options.history {
                    self.surface.clear_result();
                }
                let message = if self.options.expose_transport_detail {
                    format!("{} ({})", RETRY_LATER, e)
                } else {
                    RETRY_LATER.to_string()
                };
                self.surface
                    .show_notice(&Notice::new(NoticeKind::Failure, message));
                Err(e)
            }
        }
    }

    /// Clears the result area, and the history list when one is kept.
    pub fn reset(&self) {
        self.lock_history().clear();
        self.surface.clear_result();
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_history().entries()
    }

    fn prepare(&self, raw: &str) -> std::result::Result<PredictionRequest, ValidationError> {
        let text = input::validate(raw, self.options.max_title_chars)?;
        let title = input::sanitize(text, self.options.sanitize);
        if title.trim().is_empty() {
            return Err(ValidationError::Empty);
        }

        let language = self
            .options
            .language_tag
            .then(|| input::classify_language(&title));

        Ok(PredictionRequest::new(title, language))
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    fn show(&self, seq: u64, view: ResultView) {
        if self.options.history {
            let (entry, dimmed) = self.lock_history().prepend(seq, view);
            for id in dimmed {
                self.surface.clear_highlight(id);
            }
            self.surface.prepend_history(&entry);
            self.schedule_unhighlight(entry.id);
        } else {
            self.surface.render_result(&view);
        }

        if self.options.auto_scroll {
            self.surface.scroll_result_into_view();
        }
    }

    fn schedule_unhighlight(&self, entry_id: u64) {
        let history = Arc::clone(&self.history);
        let surface = Arc::clone(&self.surface);
        let window = self.options.highlight;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let cleared = match history.lock() {
                Ok(mut history) => history.clear_highlight(entry_id),
                Err(poisoned) => poisoned.into_inner().clear_highlight(entry_id),
            };
            if cleared {
                surface.clear_highlight(entry_id);
            }
        });
    }

    async fn stash(&self, view: &PredictionView) {
        if !self.options.persist_result {
            return;
        }
        if let Some(ref handoff) = self.handoff {
            if let Err(e) = handoff.stash(view).await {
                warn!("Failed to stash prediction result: {}", e);
            }
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, ResultHistory> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{Language, Prediction, Probabilities};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingPredictor {
        requests: StdMutex<Vec<PredictionRequest>>,
    }

    #[async_trait]
    impl Predictor for RecordingPredictor {
        async fn predict(&self, request: PredictionRequest) -> Result<PredictionResult> {
            self.requests.lock().unwrap().push(request);
            Ok(PredictionResult::Success(Prediction {
                category: "real".to_string(),
                probabilities: Probabilities {
                    fake: 0.3,
                    real: 0.7,
                },
                matched_title: None,
                database_entry: None,
                input_title: None,
            }))
        }
    }

    #[derive(Default)]
    struct NullSurface {
        notices: StdMutex<Vec<Notice>>,
    }

    impl PresentationSurface for NullSurface {
        fn input_text(&self) -> String {
            String::new()
        }
        fn set_loading(&self, _visible: bool) {}
        fn show_notice(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
        fn render_result(&self, _view: &ResultView) {}
        fn prepend_history(&self, _entry: &HistoryEntry) {}
        fn clear_highlight(&self, _entry_id: u64) {}
        fn clear_result(&self) {}
    }

    fn flow(options: FlowOptions) -> (SubmissionFlow, Arc<RecordingPredictor>, Arc<NullSurface>) {
        let predictor = Arc::new(RecordingPredictor::default());
        let surface = Arc::new(NullSurface::default());
        let flow = SubmissionFlow::new(predictor.clone(), surface.clone(), options);
        (flow, predictor, surface)
    }

    #[test]
    fn test_options_from_config() {
        let config = crate::config::parse(
            "predictor:\n  base_url: http://localhost\n  language_tag: false\ndisplay:\n  highlight_ms: 250\n",
        )
        .unwrap();
        let options = FlowOptions::from_config(&config);

        assert!(!options.language_tag);
        assert_eq!(options.highlight, Duration::from_millis(250));
        assert_eq!(options.max_title_chars, Some(200));
    }

    #[tokio::test]
    async fn test_request_is_trimmed_sanitized_and_tagged() {
        let (flow, predictor, _) = flow(FlowOptions::default());
        flow.submit_text("  \"Breaking\" news  ").await.unwrap();

        let requests = predictor.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].title, "Breaking news");
        assert_eq!(requests[0].language, Some(Language::En));
    }

    #[tokio::test]
    async fn test_language_omitted_when_tagging_disabled() {
        let options = FlowOptions {
            language_tag: false,
            ..FlowOptions::default()
        };
        let (flow, predictor, _) = flow(options);
        flow.submit_text("假新聞").await.unwrap();

        assert_eq!(predictor.requests.lock().unwrap()[0].language, None);
    }

    #[tokio::test]
    async fn test_quotes_only_input_is_empty() {
        let (flow, predictor, surface) = flow(FlowOptions::default());
        let err = flow.submit_text(r#" '" "#).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ValidationError::Empty)));
        assert!(predictor.requests.lock().unwrap().is_empty());
        assert_eq!(surface.notices.lock().unwrap()[0].kind, NoticeKind::Validation);
    }

    #[tokio::test]
    async fn test_sequence_numbers_increase() {
        let options = FlowOptions {
            history: true,
            ..FlowOptions::default()
        };
        let (flow, _, _) = flow(options);
        flow.submit_text("first").await.unwrap();
        flow.submit_text("second").await.unwrap();

        let ids: Vec<u64> = flow.history().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_reset_clears_history() {
        let options = FlowOptions {
            history: true,
            ..FlowOptions::default()
        };
        let (flow, _, _) = flow(options);
        flow.submit_text("first").await.unwrap();
        flow.reset();

        assert!(flow.history().is_empty());
    }
}
