use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use tracing::warn;

use super::Emitter;
use super::types::{Meta, Report};
use crate::ingestion::state::Frame;

/// Receives every state change the controller applies. Never validates or fetches.
pub trait RenderSink: Send + Sync {
    fn render(&self, frame: &Frame);
}

/// Writes terminal frames to stdout through the configured presenter.
pub struct StdoutSink {
    op: &'static str,
    emitter: Emitter,
    started: Instant,
}

impl StdoutSink {
    pub fn new(op: &'static str, emitter: Emitter) -> Self { StdoutSink { op, emitter, started: Instant::now() } }

    // duration is measured from sink creation to the frame being rendered
    fn meta(&self, frame: &Frame) -> Meta {
        Meta { duration_ms: Some(self.started.elapsed().as_millis()), generation: Some(frame.generation) }
    }
}

impl RenderSink for StdoutSink {
    fn render(&self, frame: &Frame) {
        let meta = Some(self.meta(frame));
        let report = match (&frame.data, &frame.error) {
            (Some(vm), _) => Report::Site(vm),
            (None, Some(err)) => Report::Failure { kind: err.kind, message: &err.message },
            (None, None) => return,
        };
        if let Err(e) = self.emitter.emit(self.op, &report, meta) {
            warn!(error = %e, "failed to write frame to stdout");
        }
    }
}

/// Keeps every frame in memory, in arrival order.
#[derive(Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<Frame>>,
}

impl RecordingSink {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl RenderSink for RecordingSink {
    fn render(&self, frame: &Frame) {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).push(frame.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::error::FetchError;
    use crate::ingestion::state::WidgetState;
    use crate::output::config::{OutputConfig, OutputFormat};

    #[test]
    fn terminal_meta_carries_duration_and_generation() {
        let sink = StdoutSink::new("analyze", Emitter::new(OutputConfig { format: OutputFormat::Json, pretty: false }));
        let mut st = WidgetState::default();
        let g = st.begin();
        st.fail(g, FetchError::HttpStatus(404).into());

        let meta = sink.meta(&st.frame());
        assert!(meta.duration_ms.is_some());
        assert_eq!(meta.generation, Some(1));
    }

    #[test]
    fn recording_sink_keeps_arrival_order() {
        let sink = RecordingSink::default();
        let mut st = WidgetState::default();
        let g = st.begin();
        sink.render(&st.frame());
        st.fail(g, FetchError::HttpStatus(500).into());
        sink.render(&st.frame());

        assert_eq!(sink.frames().len(), 2);
        assert_eq!(sink.last().unwrap().error.unwrap().kind, "http_status");
    }
}
