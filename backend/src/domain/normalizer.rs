//! Folds raw provider replies into [`IdentificationResult`]s.
//!
//! Every lookup into the provider JSON is fallible; a missing or mistyped
//! field degrades to the provider's defaults instead of failing the request.
//! The only hard failure is a multimodal `error` envelope, which means the
//! provider rejected the call rather than failing to recognise anything.

use serde_json::Value;

use super::identification::{
    Confidence, IdentificationResult, NO_DESCRIPTION, ProviderKind, ProviderRawReply,
    UNKNOWN_NAME,
};

/// Reasons a reply cannot be turned into a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The provider answered with an explicit API error.
    #[error("provider rejected the request: {message}")]
    UpstreamApi {
        /// Message extracted from the provider's error envelope.
        message: String,
    },
}

/// Normalise a provider reply.
///
/// # Examples
/// ```
/// use lens_backend::domain::{normalize, ProviderKind};
/// use serde_json::json;
///
/// let raw = json!({"results": [{"score": 0.87, "species": {
///     "scientificName": "Rosa canina", "commonNames": ["Rose"]}}]});
/// let result = normalize(ProviderKind::Botanical, &raw).expect("botanical reply");
/// assert_eq!(result.name(), "Rose");
/// assert_eq!(result.confidence().value(), 87.0);
/// ```
pub fn normalize(
    kind: ProviderKind,
    raw: &ProviderRawReply,
) -> Result<IdentificationResult, NormalizeError> {
    match kind {
        ProviderKind::Label => Ok(normalize_label(raw)),
        ProviderKind::Multimodal => normalize_multimodal(raw),
        ProviderKind::Botanical => Ok(normalize_botanical(raw)),
    }
}

/// Extract the message of a multimodal `error` envelope, if present.
///
/// The envelope may arrive either as a successful body or as the body of a
/// non-2xx reply, so callers inspect both.
pub fn upstream_error_message(raw: &Value) -> Option<String> {
    let error = raw.get("error")?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .filter(|message| !message.trim().is_empty())
        .unwrap_or("provider returned an error");
    Some(message.to_owned())
}

fn normalize_label(raw: &Value) -> IdentificationResult {
    let Some(annotations) = raw
        .get("responses")
        .and_then(Value::as_array)
        .and_then(|responses| responses.first())
        .and_then(|response| response.get("labelAnnotations"))
        .and_then(Value::as_array)
    else {
        return IdentificationResult::fallback(ProviderKind::Label);
    };

    let Some((primary, rest)) = annotations.split_first() else {
        return IdentificationResult::new(UNKNOWN_NAME, Confidence::ZERO, "", None);
    };

    let name = primary
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_NAME);
    let confidence = primary
        .get("score")
        .and_then(Value::as_f64)
        .map_or(Confidence::ZERO, Confidence::from_fraction);
    let description = rest
        .iter()
        .filter_map(|label| label.get("description").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(", ");

    IdentificationResult::new(name, confidence, description, None)
}

fn normalize_multimodal(raw: &Value) -> Result<IdentificationResult, NormalizeError> {
    if let Some(message) = upstream_error_message(raw) {
        return Err(NormalizeError::UpstreamApi { message });
    }

    let Some(content) = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.pointer("/message/content"))
        .and_then(Value::as_str)
    else {
        return Ok(IdentificationResult::fallback(ProviderKind::Multimodal));
    };

    let Ok(document) = serde_json::from_str::<Value>(strip_code_fences(content)) else {
        return Ok(IdentificationResult::fallback(ProviderKind::Multimodal));
    };

    let name = document
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_NAME);
    let confidence = match document.get("confidence") {
        Some(Value::String(text)) => Confidence::parse(text),
        Some(Value::Number(number)) => number.as_f64().map_or(Confidence::ZERO, Confidence::new),
        _ => Confidence::ZERO,
    };
    let description = document
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or(NO_DESCRIPTION);
    let link = document
        .get("link")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(IdentificationResult::new(name, confidence, description, link))
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

fn normalize_botanical(raw: &Value) -> IdentificationResult {
    let Some(best) = raw
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
    else {
        return IdentificationResult::fallback(ProviderKind::Botanical);
    };

    let species = best.get("species");
    let scientific = species
        .and_then(|value| value.get("scientificName"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown Plant");
    let name = species
        .and_then(|value| value.get("commonNames"))
        .and_then(Value::as_array)
        .and_then(|names| names.first())
        .and_then(Value::as_str)
        .filter(|common| !common.trim().is_empty())
        .unwrap_or(scientific);
    let confidence = best
        .get("score")
        .and_then(Value::as_f64)
        .map_or(Confidence::ZERO, Confidence::from_fraction);

    let description = format!(
        "Scientific Name: {scientific}. Confidence: {confidence}. Identification provided by Pl@ntNet."
    );
    let link = format!(
        "https://www.google.com/search?q={}+plant",
        name.replace(' ', "+")
    );

    IdentificationResult::new(name, confidence, description, Some(link))
}
