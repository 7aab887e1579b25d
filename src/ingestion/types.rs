use serde::Serialize;
use serde_json::Value;

/// Decoded, not yet validated, site document body.
pub type RawPayload = Value;

/// Item image used when an item carries no `metadata.image`.
pub const PLACEHOLDER_IMAGE: &str = "placeholder-image";

/// Path appended to an item's slug to reach its source page.
pub const SOURCE_SUFFIX: &str = "/index.html";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub logo: Option<String>,
    pub theme: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    pub location: String,
    pub slug: String,
    pub metadata: Option<Metadata>,
}

/// A document that passed the structural checks in `schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteDocument {
    pub title: String,
    pub description: String,
    pub metadata: Metadata,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteSummary {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardViewModel {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub open_content_url: String,
    pub open_source_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteViewModel {
    pub summary: SiteSummary,
    pub cards: Vec<CardViewModel>,
    pub source_url: String,
}
