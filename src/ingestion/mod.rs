use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Instrument;

use crate::output::RenderSink;
use crate::telemetry::{self};
use crate::telemetry::ops::analyze::Phase as AnalyzePhase;

pub mod error;
pub mod fetch;
pub mod map;
pub mod schema;
pub mod state;
pub mod types;
pub mod url;

use error::IngestError;
use fetch::SiteFetcher;
use state::{Frame, Phase, WidgetState};
use types::SiteViewModel;

/// Runs validate → fetch → schema → map for one URL at a time.
///
/// Calls may overlap: each call is tagged with a generation when it starts and
/// only the most recently started call may write the shared state. A call that
/// was overtaken still runs its fetch to completion but its outcome is dropped
/// and it returns [`IngestError::Superseded`].
pub struct IngestionController<F> {
    fetcher: F,
    state: Mutex<WidgetState>,
    sink: Option<Arc<dyn RenderSink>>,
}

impl<F: SiteFetcher> IngestionController<F> {
    pub fn new(fetcher: F) -> Self {
        IngestionController { fetcher, state: Mutex::new(WidgetState::default()), sink: None }
    }

    pub fn with_sink(mut self, sink: Arc<dyn RenderSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn snapshot(&self) -> WidgetState { self.lock().clone() }

    pub async fn ingest(&self, candidate: &str) -> Result<SiteViewModel, IngestError> {
        let log = telemetry::analyze();
        let generation = {
            let (generation, frame) = {
                let mut st = self.lock();
                let generation = st.begin();
                (generation, st.frame())
            };
            self.render(&frame);
            generation
        };
        let span = log.root_span_kv([("generation", generation.to_string()), ("url", candidate.to_string())]);
        self.run(generation, candidate).instrument(span).await
    }

    async fn run(&self, generation: u64, candidate: &str) -> Result<SiteViewModel, IngestError> {
        let log = telemetry::analyze();

        let validated = { let _s = log.span(&AnalyzePhase::Validate).entered(); url::validate(candidate) };
        let url = match validated {
            Ok(url) => url,
            Err(e) => return self.fail(generation, e.into()),
        };

        self.advance(generation, Phase::Fetching)?;
        let fetched = self.fetcher.fetch(&url).instrument(log.span(&AnalyzePhase::Fetch)).await;
        let payload = match fetched {
            Ok(payload) => payload,
            Err(e) => return self.fail(generation, e.into()),
        };

        self.advance(generation, Phase::ValidatingSchema)?;
        let checked = { let _s = log.span(&AnalyzePhase::Schema).entered(); schema::validate_schema(payload) };
        let doc = match checked {
            Ok(doc) => doc,
            Err(e) => return self.fail(generation, e.into()),
        };

        self.advance(generation, Phase::Mapping)?;
        let vm = { let _s = log.span(&AnalyzePhase::Map).entered(); map::to_view_model(&doc, url.as_str()) };

        if self.apply(|st| st.succeed(generation, vm.clone())) {
            log.succeeded(generation, vm.cards.len());
            Ok(vm)
        } else {
            Err(self.superseded(generation))
        }
    }

    fn advance(&self, generation: u64, phase: Phase) -> Result<(), IngestError> {
        if self.apply(|st| st.advance(generation, phase)) { Ok(()) } else { Err(self.superseded(generation)) }
    }

    fn fail(&self, generation: u64, err: IngestError) -> Result<SiteViewModel, IngestError> {
        if self.apply(|st| st.fail(generation, err.clone())) {
            telemetry::analyze().failed(generation, &err);
            Err(err)
        } else {
            Err(self.superseded(generation))
        }
    }

    fn superseded(&self, generation: u64) -> IngestError {
        let current = self.lock().generation();
        telemetry::analyze().superseded(generation, current);
        IngestError::Superseded { generation }
    }

    // Runs a guarded transition and notifies the sink if it was applied.
    fn apply(&self, transition: impl FnOnce(&mut WidgetState) -> bool) -> bool {
        let frame = {
            let mut st = self.lock();
            if !transition(&mut st) { return false; }
            st.frame()
        };
        self.render(&frame);
        true
    }

    fn render(&self, frame: &Frame) {
        if let Some(sink) = &self.sink { sink.render(frame); }
    }

    fn lock(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
