//! Fingerprint history threaded between submissions.

use serde::{Deserialize, Serialize};

/// Ordered collection of previously-seen perceptual fingerprints.
///
/// The caller owns the history: scoring takes it by value and hands back
/// the extended collection, so reuse across submissions is explicit.
/// Retention is the caller's concern; the history only ever grows here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintHistory(Vec<String>);

impl FingerprintHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns true if the exact fingerprint has been seen.
    #[must_use]
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.0.iter().any(|known| known == fingerprint)
    }

    /// Appends a fingerprint, duplicates included.
    pub fn push(&mut self, fingerprint: impl Into<String>) {
        self.0.push(fingerprint.into());
    }

    /// Number of recorded fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fingerprints in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

}

impl From<Vec<String>> for FingerprintHistory {
    fn from(fingerprints: Vec<String>) -> Self {
        Self(fingerprints)
    }
}
