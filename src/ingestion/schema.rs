use serde_json::{Map, Value};

use super::error::SchemaError;
use super::types::{ContentItem, Metadata, RawPayload, SiteDocument};

/// Shallow structural check. Rules run in order and stop at the first failure;
/// anything inside `items` is read permissively.
pub fn validate_schema(payload: RawPayload) -> Result<SiteDocument, SchemaError> {
    let Value::Object(root) = payload else { return Err(SchemaError::NotAnObject) };

    let Some(Value::Array(items)) = root.get("items") else { return Err(SchemaError::MissingItems) };
    let Some(Value::Object(metadata)) = root.get("metadata") else { return Err(SchemaError::MissingMetadata) };

    let title = required_string(&root, "title")?;
    let description = required_string(&root, "description")?;

    Ok(SiteDocument {
        title,
        description,
        metadata: read_metadata(metadata),
        items: items.iter().map(read_item).collect(),
    })
}

// Absent is fine (empty string); present with the wrong type is not.
fn required_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, SchemaError> {
    match obj.get(field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::InvalidField(field)),
    }
}

fn scalar(obj: &Map<String, Value>, field: &str) -> Option<String> {
    match obj.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn read_metadata(obj: &Map<String, Value>) -> Metadata {
    Metadata {
        logo: scalar(obj, "logo"),
        theme: scalar(obj, "theme"),
        created: scalar(obj, "created"),
        updated: scalar(obj, "updated"),
        image: scalar(obj, "image"),
    }
}

fn read_item(value: &Value) -> ContentItem {
    let Value::Object(obj) = value else { return ContentItem::default() };
    ContentItem {
        title: scalar(obj, "title").unwrap_or_default(),
        description: scalar(obj, "description").unwrap_or_default(),
        location: scalar(obj, "location").unwrap_or_default(),
        slug: scalar(obj, "slug").unwrap_or_default(),
        metadata: match obj.get("metadata") {
            Some(Value::Object(m)) => Some(read_metadata(m)),
            _ => None,
        },
    }
}
