use async_trait::async_trait;
use fakenews_detector::{
    Error, Result,
    predictor::{PredictionRequest, PredictionResult, Predictor},
    submission::{HistoryEntry, ResultView},
    surface::{Notice, PresentationSurface},
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Loading(bool),
    Notice(Notice),
    Rendered(ResultView),
    Prepended(HistoryEntry),
    HighlightCleared(u64),
    Cleared,
    Scrolled,
}

/// Mock presentation surface that records every call
#[derive(Debug, Default)]
pub struct MockSurface {
    input: Mutex<String>,
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
    loading: AtomicBool,
}

impl MockSurface {
    pub fn new(input: &str) -> Self {
        Self {
            input: Mutex::new(input.to_string()),
            ..Self::default()
        }
    }

    pub fn set_input(&self, input: &str) {
        *self.input.lock().unwrap() = input.to_string();
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn rendered(&self) -> Vec<ResultView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Rendered(view) => Some(view),
                SurfaceEvent::Prepended(entry) => Some(entry.view),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl PresentationSurface for MockSurface {
    fn input_text(&self) -> String {
        self.input.lock().unwrap().clone()
    }

    fn set_loading(&self, visible: bool) {
        self.loading.store(visible, Ordering::SeqCst);
        self.record(SurfaceEvent::Loading(visible));
    }

    fn show_notice(&self, notice: &Notice) {
        self.record(SurfaceEvent::Notice(notice.clone()));
    }

    fn render_result(&self, view: &ResultView) {
        self.record(SurfaceEvent::Rendered(view.clone()));
    }

    fn prepend_history(&self, entry: &HistoryEntry) {
        self.record(SurfaceEvent::Prepended(entry.clone()));
    }

    fn clear_highlight(&self, entry_id: u64) {
        self.record(SurfaceEvent::HighlightCleared(entry_id));
    }

    fn clear_result(&self) {
        self.record(SurfaceEvent::Cleared);
    }

    fn scroll_result_into_view(&self) {
        self.record(SurfaceEvent::Scrolled);
    }
}

/// Mock predictor that replays scripted outcomes in order
#[derive(Debug, Default)]
pub struct MockPredictor {
    pub outcomes: Mutex<VecDeque<std::result::Result<PredictionResult, String>>>,
    pub requests: Mutex<Vec<PredictionRequest>>,
}

impl MockPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: PredictionResult) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(result));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn get_requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResult> {
        self.requests.lock().unwrap().push(request);

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(Error::invalid_response(message)),
            None => Err(Error::internal("No more mock outcomes")),
        }
    }
}
