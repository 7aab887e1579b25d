use std::fmt;

use serde::Serialize;

use super::error::ValidationError;

const SITE_DOCUMENT_SUFFIX: &str = "site.json";

/// A candidate that passed `validate`. Only constructible through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidUrl(String);

impl ValidUrl {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Purely syntactic: no network or filesystem access.
pub fn validate(candidate: &str) -> Result<ValidUrl, ValidationError> {
    if candidate.is_empty() || !candidate.ends_with(SITE_DOCUMENT_SUFFIX) {
        return Err(ValidationError::NotASiteDocument);
    }
    Ok(ValidUrl(candidate.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_site_json_suffix() {
        let url = validate("https://haxtheweb.org/site.json").unwrap();
        assert_eq!(url.as_str(), "https://haxtheweb.org/site.json");
    }

    #[test]
    fn rejects_everything_else() {
        for bad in [
            "",
            "https://haxtheweb.org/",
            "https://haxtheweb.org/site.JSON",
            "https://haxtheweb.org/site.json?x=1",
            "https://haxtheweb.org/site.json/",
            "site.jso",
        ] {
            assert_eq!(validate(bad), Err(ValidationError::NotASiteDocument), "{bad:?}");
        }
    }
}
