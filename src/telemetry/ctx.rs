use std::marker::PhantomData;
use tracing::{info, debug, warn, Span};

use crate::ingestion::error::IngestError;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(parent: &span, op = %self.op_name(), "start");
        } else {
            info!(parent: &span, op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span {
        let span = ph.span();
        debug!(parent: &span, op = %self.op_name(), phase = ph.name(), "span_start");
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{}", msg); }
    }
}

// Analyze-specific helpers on the typed context
impl LogCtx<crate::telemetry::ops::analyze::Analyze> {
    pub fn succeeded(&self, generation: u64, cards: usize) {
        if self.json { info!(op = %self.op_name(), generation, cards, "ingest_succeeded"); }
        else { info!("✅ Site loaded — generation={} cards={}", generation, cards); }
    }

    pub fn failed(&self, generation: u64, err: &IngestError) {
        if self.json { warn!(op = %self.op_name(), generation, kind = err.kind(), error = %err, "ingest_failed"); }
        else { warn!("❌ Ingestion failed — generation={} kind={} {}", generation, err.kind(), err); }
    }

    pub fn superseded(&self, generation: u64, current: u64) {
        if self.json { debug!(op = %self.op_name(), generation, current, "result_discarded"); }
        else { debug!("↩️ discarding result of generation={} (current={})", generation, current); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
