use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Analyze;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Validate, Fetch, Schema, Map }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Validate => "validate",
        Phase::Fetch => "fetch",
        Phase::Schema => "schema",
        Phase::Map => "map",
    }}
    fn span(&self) -> Span { match self {
        Phase::Validate => info_span!("validate"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Schema => info_span!("schema"),
        Phase::Map => info_span!("map"),
    }}
}

impl OpMarker for Analyze {
    const NAME: &'static str = "analyze";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("analyze") }
}
