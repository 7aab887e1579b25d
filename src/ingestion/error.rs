use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not a site document URL (expected a URL ending in site.json)")]
    NotASiteDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("site document request failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("could not reach site document: {0}")]
    Transport(String),

    #[error("site document is not valid JSON: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("site document must be a JSON object")]
    NotAnObject,

    #[error("site document has no `items` list")]
    MissingItems,

    #[error("site document has no `metadata` object")]
    MissingMetadata,

    #[error("site document field `{0}` must be a string")]
    InvalidField(&'static str),
}

/// Failure of one ingestion call. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A newer call started before this one finished; its result was discarded.
    #[error("ingestion {generation} was superseded by a newer request")]
    Superseded { generation: u64 },
}

impl IngestError {
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Validation(ValidationError::NotASiteDocument) => "not_a_site_document",
            IngestError::Fetch(FetchError::HttpStatus(_)) => "http_status",
            IngestError::Fetch(FetchError::Transport(_)) => "transport",
            IngestError::Fetch(FetchError::Decode(_)) => "decode",
            IngestError::Schema(SchemaError::NotAnObject) => "not_an_object",
            IngestError::Schema(SchemaError::MissingItems) => "missing_items",
            IngestError::Schema(SchemaError::MissingMetadata) => "missing_metadata",
            IngestError::Schema(SchemaError::InvalidField(_)) => "invalid_field",
            IngestError::Superseded { .. } => "superseded",
        }
    }
}
