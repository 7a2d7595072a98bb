//! Submission payload adapter.
//!
//! A payload is a JSON document carrying everything about a submission
//! except the images:
//!
//! ```json
//! {"category": "Saree", "attrs": {"brand": "Acme"}, "known_hashes": ["c3e1..."]}
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use listing_qa_core::{AttributeMap, FingerprintHistory, DEFAULT_CATEGORY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Category, attributes and fingerprint history of one submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    /// Listing category; the default category when absent.
    pub category: Option<String>,
    /// Attribute values keyed by attribute name.
    pub attrs: AttributeMap,
    /// Fingerprints already seen by the caller.
    pub known_hashes: Vec<String>,
}

impl Submission {
    /// Parses a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid payload object.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid submission payload")
    }

    /// Reads and parses a payload file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading payload: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("In payload file {}", path.display()))
    }

    /// Returns the submitted category, or the default category.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Sets an attribute from a `key=value` string.
    ///
    /// The value is parsed as JSON when possible (`true`, `3`, `["a"]`),
    /// otherwise stored as a plain string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string has no `=` or an empty key.
    pub fn set_attr(&mut self, assignment: &str) -> Result<()> {
        let (key, raw) = assignment
            .split_once('=')
            .with_context(|| format!("Attribute '{assignment}' is not in key=value form"))?;
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("Attribute '{assignment}' has an empty key");
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.attrs.insert(key.to_string(), value);
        Ok(())
    }

    /// Fingerprint history to feed the scorer.
    #[must_use]
    pub fn history(&self) -> FingerprintHistory {
        FingerprintHistory::from(self.known_hashes.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_payload() {
        let submission = Submission::from_json(
            r#"{"category": "Footwear", "attrs": {"brand": "Acme", "size": 42}, "known_hashes": ["ab", "cd"]}"#,
        )
        .unwrap();

        assert_eq!(submission.category_or_default(), "Footwear");
        assert_eq!(submission.attrs["size"], json!(42));
        assert_eq!(submission.history().as_slice(), ["ab", "cd"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let submission = Submission::from_json("{}").unwrap();
        assert_eq!(submission.category_or_default(), DEFAULT_CATEGORY);
        assert!(submission.attrs.is_empty());
        assert!(submission.history().is_empty());
    }

    #[test]
    fn test_invalid_payload() {
        assert!(Submission::from_json("[1, 2]").is_err());
        assert!(Submission::from_json(r#"{"attrs": 5}"#).is_err());
    }

    #[test]
    fn test_set_attr_parses_json_scalars() {
        let mut submission = Submission::default();
        submission.set_attr("brand=Acme").unwrap();
        submission.set_attr("size=42").unwrap();
        submission.set_attr("organic=false").unwrap();
        submission.set_attr("note=a=b").unwrap();

        assert_eq!(submission.attrs["brand"], json!("Acme"));
        assert_eq!(submission.attrs["size"], json!(42));
        assert_eq!(submission.attrs["organic"], json!(false));
        assert_eq!(submission.attrs["note"], json!("a=b"));
    }

    #[test]
    fn test_set_attr_rejects_malformed() {
        let mut submission = Submission::default();
        assert!(submission.set_attr("brand").is_err());
        assert!(submission.set_attr("=x").is_err());
    }
}
