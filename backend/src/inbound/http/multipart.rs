//! Reads multipart uploads into an image plus text fields.
//!
//! A part counts as the image when it is named `image` or carries a filename;
//! the first non-empty one wins. Known form fields are read as UTF-8 text and
//! any other part is drained without being stored.

use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::domain::{Error, UserId};

const IMAGE_FIELD: &str = "image";
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;
const TEXT_FIELDS: [&str; 6] = [
    "user_id",
    "organs",
    "object_name",
    "confidence",
    "description",
    "buy_link",
];

/// Parsed multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    image: Vec<u8>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Uploaded image bytes; empty when no image part was sent.
    pub fn take_image(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.image)
    }

    /// Trimmed text field, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Optional `user_id` field.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        self.text("user_id").map(parse_user_id).transpose()
    }
}

/// Parse a `user_id` form value.
pub fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>().map_err(|_| {
        Error::invalid_request("user_id must be an integer")
            .with_details(json!({ "field": "user_id", "code": "invalid_user_id" }))
    })
}

fn malformed(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

fn is_image_part(field: &Field) -> bool {
    field.name() == Some(IMAGE_FIELD)
        || field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .is_some()
}

async fn read_limited(field: &mut Field, limit: usize, name: &str) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if buffer.len() + chunk.len() > limit {
            return Err(
                Error::invalid_request(format!("{name} exceeds {limit} bytes"))
                    .with_details(json!({ "field": name, "code": "too_large", "limit": limit })),
            );
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

async fn discard(field: &mut Field) -> Result<(), Error> {
    while field.try_next().await.map_err(malformed)?.is_some() {}
    Ok(())
}

/// Drain `payload`, enforcing `max_image_bytes` on the image part.
pub async fn read_upload(
    mut payload: Multipart,
    max_image_bytes: usize,
) -> Result<UploadForm, Error> {
    let mut form = UploadForm::default();
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_owned();
        if is_image_part(&field) {
            let bytes = read_limited(&mut field, max_image_bytes, IMAGE_FIELD).await?;
            if form.image.is_empty() {
                form.image = bytes;
            }
            continue;
        }
        if !TEXT_FIELDS.contains(&name.as_str()) {
            discard(&mut field).await?;
            continue;
        }

        let bytes = read_limited(&mut field, MAX_TEXT_FIELD_BYTES, &name).await?;
        let text = String::from_utf8(bytes).map_err(|_| {
            Error::invalid_request(format!("{name} must be UTF-8 text"))
                .with_details(json!({ "field": name, "code": "invalid_encoding" }))
        })?;
        form.fields.insert(name, text);
    }
    Ok(form)
}
