//! Shared types for the restyle panel.

use std::fmt;
use std::rc::Rc;

use crate::config::API_URL_ENV;

/// Notification shown when a submission is attempted with an empty slot.
pub const MISSING_INPUT_MESSAGE: &str = "Upload both images!";

/// Notification shown when the generate request fails for any reason.
pub const REQUEST_FAILED_MESSAGE: &str = "Error generating image";

/// MIME type used when a file name carries no recognizable extension.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Extension to MIME type table for common browser image formats.
const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Guess a MIME type from a file name's extension.
///
/// Matching is case-insensitive. Unknown or missing extensions fall back
/// to `application/octet-stream`; nothing is rejected.
#[must_use]
pub fn mime_for_name(name: &str) -> &'static str {
    name.rsplit_once('.')
        .and_then(|(_, ext)| {
            IMAGE_MIME_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|&(_, mime)| mime)
        })
        .unwrap_or(FALLBACK_MIME)
}

/// One of the two image inputs on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The image whose structure is preserved.
    Content,
    /// The image whose visual style is transferred.
    Style,
}

impl Slot {
    /// Both slots in display order.
    pub const ALL: [Self; 2] = [Self::Content, Self::Style];

    /// Multipart form field name for this slot's file.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Style => "style",
        }
    }

    /// Drop zone prompt shown while the slot is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Content => "Drop Content Image or Click to Upload",
            Self::Style => "Drop Style Image or Click to Upload",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// An image picked by the user, held in memory for the page session.
///
/// The payload is opaque: no decoding or size checks happen here. Bytes
/// are reference-counted so handing the file to a request does not copy
/// the payload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    mime: String,
    bytes: Rc<[u8]>,
}

impl ImageFile {
    /// Create a file, inferring its MIME type from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Rc<[u8]>>) -> Self {
        let name = name.into();
        let mime = mime_for_name(&name).to_owned();
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Override the inferred MIME type.
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// The file name as reported by the browser.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type sent with the multipart part.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Reference to the image returned by the service: a URL or data URI.
///
/// Only constructed from a successful, non-empty service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylizedImage(String);

impl StylizedImage {
    pub(crate) const fn new(reference: String) -> Self {
        Self(reference)
    }

    /// The reference, suitable for an `<img src>` attribute.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the reference is an inline `data:` URI.
    #[must_use]
    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// File name to use when saving the image.
    ///
    /// The extension follows the data URI's MIME type (`data:image/jpeg`
    /// gives `stylized.jpg`), or the URL path's extension. Anything else
    /// is saved as PNG, which is what the service produces.
    #[must_use]
    pub fn suggested_filename(&self) -> String {
        let ext = if let Some(rest) = self.0.strip_prefix("data:") {
            let mime = rest.split([';', ',']).next().unwrap_or_default();
            IMAGE_MIME_TYPES
                .iter()
                .find(|&&(_, known)| known.eq_ignore_ascii_case(mime))
                .map(|&(ext, _)| ext)
        } else {
            let path = self.0.split(['?', '#']).next().unwrap_or_default();
            let last = path.rsplit('/').next().unwrap_or_default();
            last.rsplit_once('.').and_then(|(_, ext)| {
                IMAGE_MIME_TYPES
                    .iter()
                    .find(|&&(known, _)| known.eq_ignore_ascii_case(ext))
                    .map(|&(known, _)| known)
            })
        };
        format!("stylized.{}", ext.unwrap_or("png"))
    }
}

impl fmt::Display for StylizedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Data URIs run to megabytes; keep log lines readable.
        const PREVIEW: usize = 48;
        if self.0.len() > PREVIEW {
            let cut = (0..=PREVIEW)
                .rev()
                .find(|&i| self.0.is_char_boundary(i))
                .unwrap_or(0);
            write!(f, "{}... ({} bytes)", &self.0[..cut], self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}

/// A submission was refused before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// One or both image slots were empty.
    #[error("missing input image: {}", list_slots(.0))]
    MissingInput(Vec<Slot>),
}

impl SubmitError {
    /// Text for the blocking notification shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => MISSING_INPUT_MESSAGE,
        }
    }
}

fn list_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|slot| slot.field_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The generate request failed.
///
/// The variant is logged for diagnostics; the user only ever sees
/// [`REQUEST_FAILED_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// No service base URL was configured at build time.
    #[error("service base URL is not configured (set {} at build time)", API_URL_ENV)]
    NotConfigured,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service responded with HTTP {status}{}", detail_suffix(.detail))]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, if it had one.
        detail: Option<String>,
    },

    /// A success response whose body lacked a usable `stylized_image`.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl RequestError {
    /// Text for the blocking notification shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        REQUEST_FAILED_MESSAGE
    }
}

#[allow(clippy::ref_option)] // thiserror passes fields by reference
fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map_or_else(String::new, |d| format!(": {d}"))
}
