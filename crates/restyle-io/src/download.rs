//! Saving the stylized image.
//!
//! Dioxus has no built-in file download API.  The result is already a
//! data URI (or a URL), so this module points a temporary
//! `<a download>` element at it and clicks it programmatically.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use restyle_core::StylizedImage;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Save `image` under its suggested file name.
///
/// # Errors
///
/// See [`trigger_download`].
pub fn download_image(image: &StylizedImage) -> Result<(), DownloadError> {
    trigger_download(image.as_str(), &image.suggested_filename())
}

/// Trigger a browser download of `href`.
///
/// Programmatically clicks a temporary `<a href download="filename">`
/// element. Browsers honor the file name for data URIs and same-origin
/// URLs; for cross-origin URLs they may navigate instead.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails
/// (e.g., missing document, element creation).
pub fn trigger_download(href: &str, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(href);
    anchor.set_download(filename);

    // Append to body, click, and remove.
    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download is already initiated; a failed removal is not an error.
    let _ = body.remove_child(&anchor);

    tracing::info!(filename, "download triggered");
    Ok(())
}
