pub mod config;
pub mod presenter;
pub mod sink;
pub mod types;

pub use presenter::Emitter;
pub use sink::{RecordingSink, RenderSink, StdoutSink};
