//! Wire format of the style service's generate endpoint.
//!
//! Request: `multipart/form-data` with a `content` file, a `style` file,
//! and an `image_size` text field.
//!
//! Response: `{"stylized_image": "<url or data URI>"}` on success, or
//! `{"error": "<message>"}` alongside a non-2xx status.

use serde::Deserialize;

use crate::types::{ImageFile, RequestError, Slot, StylizedImage};

/// Edge length in pixels the service resizes both inputs to.
pub const IMAGE_SIZE: u32 = 512;

/// Form field carrying [`IMAGE_SIZE`].
pub const IMAGE_SIZE_FIELD: &str = "image_size";

/// The payload of one generate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Content image, sent as the `content` part.
    pub content: ImageFile,
    /// Style image, sent as the `style` part.
    pub style: ImageFile,
    /// Target size, sent as the `image_size` part.
    pub image_size: u32,
}

/// Value of a single multipart part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartValue<'a> {
    /// A file part: bytes plus file name and MIME type.
    File(&'a ImageFile),
    /// A plain text part.
    Text(u32),
}

/// A named multipart part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormPart<'a> {
    /// Form field name.
    pub name: &'static str,
    /// Field value.
    pub value: PartValue<'a>,
}

impl GenerateRequest {
    /// Build a request at the fixed [`IMAGE_SIZE`].
    #[must_use]
    pub const fn new(content: ImageFile, style: ImageFile) -> Self {
        Self {
            content,
            style,
            image_size: IMAGE_SIZE,
        }
    }

    /// The multipart parts in the order they are appended to the form.
    #[must_use]
    pub const fn parts(&self) -> [FormPart<'_>; 3] {
        [
            FormPart {
                name: Slot::Content.field_name(),
                value: PartValue::File(&self.content),
            },
            FormPart {
                name: Slot::Style.field_name(),
                value: PartValue::File(&self.style),
            },
            FormPart {
                name: IMAGE_SIZE_FIELD,
                value: PartValue::Text(self.image_size),
            },
        ]
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    stylized_image: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Interpret a generate response.
///
/// Any 2xx status must carry a JSON body with a non-empty
/// `stylized_image` string. Other statuses are failures; their `error`
/// field, when the body has one, is kept as diagnostic detail.
///
/// # Errors
///
/// Returns [`RequestError::Status`] for non-2xx statuses and
/// [`RequestError::MalformedBody`] for a success status whose body is
/// not the expected JSON shape or has an empty `stylized_image`.
pub fn parse_response(status: u16, body: &str) -> Result<StylizedImage, RequestError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|e| e.error)
            .filter(|e| !e.is_empty());
        return Err(RequestError::Status { status, detail });
    }

    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| RequestError::MalformedBody(e.to_string()))?;

    if parsed.stylized_image.trim().is_empty() {
        return Err(RequestError::MalformedBody(
            "stylized_image is empty".to_owned(),
        ));
    }

    Ok(StylizedImage::new(parsed.stylized_image))
}
