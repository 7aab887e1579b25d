//! Site document ingestion: validate a `site.json` URL, fetch it, check its
//! shape and map it to a view model for a rendering sink.

pub mod analyze;
pub mod check;
pub mod ingestion;
pub mod output;
pub mod telemetry;
pub mod util;

pub use ingestion::IngestionController;
pub use ingestion::error::{FetchError, IngestError, SchemaError, ValidationError};
pub use ingestion::types::{CardViewModel, SiteViewModel};
