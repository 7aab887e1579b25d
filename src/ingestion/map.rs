use super::types::{
    CardViewModel, ContentItem, PLACEHOLDER_IMAGE, SOURCE_SUFFIX, SiteDocument, SiteSummary, SiteViewModel,
};

/// Total: every missing optional field resolves to a display-safe fallback.
pub fn to_view_model(doc: &SiteDocument, source_url: &str) -> SiteViewModel {
    SiteViewModel {
        summary: SiteSummary {
            title: doc.title.clone(),
            description: doc.description.clone(),
            metadata: doc.metadata.clone(),
        },
        // document order is kept as-is, duplicates included
        cards: doc.items.iter().map(to_card).collect(),
        source_url: source_url.to_string(),
    }
}

fn to_card(item: &ContentItem) -> CardViewModel {
    let image_url = item.metadata.as_ref()
        .and_then(|m| m.image.as_deref())
        .filter(|img| !img.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string();

    CardViewModel {
        title: item.title.clone(),
        description: item.description.clone(),
        image_url,
        open_content_url: item.location.clone(),
        open_source_url: format!("{}{}", item.slug, SOURCE_SUFFIX),
    }
}
