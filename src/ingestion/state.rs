use serde::Serialize;

use super::error::IngestError;
use super::types::SiteViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase { Idle, Validating, Fetching, ValidatingSchema, Mapping, Succeeded, Failed }

impl Phase {
    /// Window during which the sink shows a progress indicator.
    pub fn in_progress(self) -> bool {
        matches!(self, Phase::Fetching | Phase::ValidatingSchema | Phase::Mapping)
    }

    pub fn is_terminal(self) -> bool { matches!(self, Phase::Succeeded | Phase::Failed) }
}

/// What the widget currently shows. Data and error are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Empty,
    Ready(SiteViewModel),
    Failed(IngestError),
}

/// Controller-owned state. Every write is tagged with the generation of the
/// call making it and is dropped unless that call is still the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    generation: u64,
    phase: Phase,
    view: ViewState,
}

impl Default for WidgetState {
    fn default() -> Self { WidgetState { generation: 0, phase: Phase::Idle, view: ViewState::Empty } }
}

impl WidgetState {
    pub fn generation(&self) -> u64 { self.generation }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn view(&self) -> &ViewState { &self.view }

    pub fn is_current(&self, generation: u64) -> bool { self.generation == generation }

    /// Starts a new call: supersedes whatever is in flight and clears the previous view.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Validating;
        self.view = ViewState::Empty;
        self.generation
    }

    pub fn advance(&mut self, generation: u64, phase: Phase) -> bool {
        if !self.is_current(generation) || self.phase.is_terminal() { return false; }
        self.phase = phase;
        true
    }

    pub fn succeed(&mut self, generation: u64, vm: SiteViewModel) -> bool {
        if !self.advance(generation, Phase::Succeeded) { return false; }
        self.view = ViewState::Ready(vm);
        true
    }

    pub fn fail(&mut self, generation: u64, err: IngestError) -> bool {
        if !self.advance(generation, Phase::Failed) { return false; }
        self.view = ViewState::Failed(err);
        true
    }

    pub fn frame(&self) -> Frame {
        let (data, error) = match &self.view {
            ViewState::Empty => (None, None),
            ViewState::Ready(vm) => (Some(vm.clone()), None),
            ViewState::Failed(err) => (None, Some(FrameError { kind: err.kind(), message: err.to_string() })),
        };
        Frame { generation: self.generation, phase: self.phase, in_progress: self.phase.in_progress(), data, error }
    }
}

/// Snapshot handed to a rendering sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub generation: u64,
    pub phase: Phase,
    pub in_progress: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SiteViewModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FrameError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameError {
    pub kind: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::error::FetchError;

    #[test]
    fn begin_clears_previous_result() {
        let mut st = WidgetState::default();
        let g1 = st.begin();
        assert!(st.succeed(g1, SiteViewModel::default()));
        assert!(matches!(st.view(), ViewState::Ready(_)));

        let g2 = st.begin();
        assert_eq!(g2, g1 + 1);
        assert_eq!(st.phase(), Phase::Validating);
        assert_eq!(st.view(), &ViewState::Empty);
    }

    #[test]
    fn stale_generation_cannot_write() {
        let mut st = WidgetState::default();
        let g1 = st.begin();
        let g2 = st.begin();
        assert!(!st.advance(g1, Phase::Fetching));
        assert!(!st.fail(g1, FetchError::HttpStatus(500).into()));
        assert!(st.advance(g2, Phase::Fetching));
        assert_eq!(st.phase(), Phase::Fetching);
        assert_eq!(st.view(), &ViewState::Empty);
    }

    #[test]
    fn terminal_state_is_final_for_its_call() {
        let mut st = WidgetState::default();
        let g = st.begin();
        assert!(st.fail(g, FetchError::HttpStatus(404).into()));
        assert!(!st.succeed(g, SiteViewModel::default()));
        assert_eq!(st.phase(), Phase::Failed);
    }

    #[test]
    fn frame_never_carries_data_and_error() {
        let mut st = WidgetState::default();
        let g = st.begin();
        st.advance(g, Phase::Fetching);
        let f = st.frame();
        assert!(f.in_progress);
        assert!(f.data.is_none() && f.error.is_none());

        st.fail(g, FetchError::HttpStatus(404).into());
        let f = st.frame();
        assert!(!f.in_progress);
        assert!(f.data.is_none());
        let err = f.error.unwrap();
        assert_eq!(err.kind, "http_status");
        assert!(err.message.contains("404"));
    }
}
