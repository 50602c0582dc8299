//! Canonical identification values shared by every provider.
//!
//! Provider replies differ wildly in shape; the normalizer folds each of them
//! into an [`IdentificationResult`] so adapters never see provider JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw JSON returned by a recognition provider. Only the normalizer reads it.
pub type ProviderRawReply = Value;

/// Identification confidence as a percentage in `[0, 100]`.
///
/// # Examples
/// ```
/// use lens_backend::domain::Confidence;
///
/// let confidence = Confidence::from_fraction(0.8734);
/// assert_eq!(confidence.to_string(), "87.34%");
/// assert_eq!(Confidence::parse("87.34%"), confidence);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence, used by every "no result" default.
    pub const ZERO: Self = Self(0.0);

    /// Build from a percentage, clamping into range. `NaN` becomes zero.
    #[must_use]
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::ZERO;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// Build from a provider score in `[0, 1]`, rounded to two decimals.
    #[must_use]
    pub fn from_fraction(score: f64) -> Self {
        Self::new((score * 100.0 * 100.0).round() / 100.0)
    }

    /// Parse a display string such as `"93.50%"` or `" 87 "`.
    ///
    /// Anything unparsable yields zero.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_or(Self::ZERO, Self::new)
    }

    /// Percentage value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Provider-independent identification outcome.
///
/// ## Invariants
/// - `name` is never empty.
/// - `description` is always present, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationResult {
    name: String,
    confidence: Confidence,
    description: String,
    link: Option<String>,
}

impl IdentificationResult {
    /// Build a result, falling back to `"Unknown"` for a blank name.
    pub fn new(
        name: impl Into<String>,
        confidence: Confidence,
        description: impl Into<String>,
        link: Option<String>,
    ) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            UNKNOWN_NAME.to_owned()
        } else {
            name
        };
        Self {
            name,
            confidence,
            description: description.into(),
            link: link.filter(|value| !value.trim().is_empty()),
        }
    }

    /// The "nothing recognised" result for a provider.
    #[must_use]
    pub fn fallback(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Label => Self::new(UNKNOWN_NAME, Confidence::ZERO, NO_LABELS, None),
            ProviderKind::Multimodal => {
                Self::new(UNKNOWN_NAME, Confidence::ZERO, NO_DESCRIPTION, None)
            }
            ProviderKind::Botanical => Self::new(NOT_FOUND_NAME, Confidence::ZERO, NO_MATCH, None),
        }
    }

    /// Display name of the identified object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identification confidence.
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional purchase or reference link.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

pub(crate) const UNKNOWN_NAME: &str = "Unknown";
pub(crate) const NOT_FOUND_NAME: &str = "Not Found";
pub(crate) const NO_LABELS: &str = "No labels returned";
pub(crate) const NO_DESCRIPTION: &str = "No description";
pub(crate) const NO_MATCH: &str = "Pl@ntNet could not identify a match";

/// Recognition provider selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Generic label detection (Google Vision).
    Label,
    /// Multimodal language model (OpenAI chat completions).
    Multimodal,
    /// Plant identification (Pl@ntNet).
    Botanical,
}

impl ProviderKind {
    /// Stable name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Multimodal => "multimodal",
            Self::Botanical => "botanical",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default organ hint sent to the botanical provider.
pub const DEFAULT_ORGANS: &str = "auto";

/// Per-request provider hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOptions {
    organs: String,
}

impl ProviderOptions {
    /// Options with an explicit organ hint; blank input keeps the default.
    pub fn with_organs(organs: impl Into<String>) -> Self {
        let organs = organs.into();
        if organs.trim().is_empty() {
            return Self::default();
        }
        Self {
            organs: organs.trim().to_owned(),
        }
    }

    /// Organ hint for the botanical provider.
    pub fn organs(&self) -> &str {
        &self.organs
    }
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            organs: DEFAULT_ORGANS.to_owned(),
        }
    }
}

/// Validation failures for [`ImagePayload`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImagePayloadError {
    /// No bytes were supplied.
    #[error("no image provided")]
    Empty,
}

/// Non-empty image bytes as uploaded by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload(Vec<u8>);

impl ImagePayload {
    /// Wrap uploaded bytes, rejecting an empty buffer.
    pub fn try_new(bytes: impl Into<Vec<u8>>) -> Result<Self, ImagePayloadError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ImagePayloadError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.0.len())
            .finish()
    }
}
