//! Style service transport over the browser `fetch` API.
//!
//! [`FetchService`] turns a [`GenerateRequest`] into a `FormData` body
//! (one `Blob` per image, plus the size field), POSTs it, and hands the
//! status and body text to [`parse_response`]. The browser sets the
//! multipart boundary and `Content-Type` header itself.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use restyle_core::{
    GenerateRequest, ImageFile, PartValue, RequestError, StyleService, StylizedImage,
    parse_response,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestInit, Response};

/// Sends generate requests with `window.fetch`.
///
/// Requests are never retried or aborted. CORS is left to the browser;
/// a cross-origin service must allow the page's origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchService;

impl StyleService for FetchService {
    #[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
    async fn generate(
        &self,
        url: &str,
        request: &GenerateRequest,
    ) -> Result<StylizedImage, RequestError> {
        let form = build_form(request)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let window =
            web_sys::window().ok_or_else(|| RequestError::Network("no global window".into()))?;
        let response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
            .await
            .map_err(network_error)?;
        let response: Response = response.dyn_into().map_err(|value| {
            RequestError::Network(format!("fetch resolved to a non-Response: {value:?}"))
        })?;

        let status = response.status();
        let body = JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?
            .as_string()
            .ok_or_else(|| RequestError::MalformedBody("response body is not text".into()))?;
        tracing::debug!(status, bytes = body.len(), "generate response received");

        parse_response(status, &body)
    }
}

/// Build the multipart body from the request's parts, in order.
fn build_form(request: &GenerateRequest) -> Result<FormData, RequestError> {
    let form = FormData::new().map_err(network_error)?;
    for part in request.parts() {
        match part.value {
            PartValue::File(file) => {
                let blob = file_blob(file)?;
                form.append_with_blob_and_filename(part.name, &blob, file.name())
                    .map_err(network_error)?;
            }
            PartValue::Text(value) => {
                form.append_with_str(part.name, &value.to_string())
                    .map_err(network_error)?;
            }
        }
    }
    Ok(form)
}

/// Copy a file's bytes into a typed `Blob`.
fn file_blob(file: &ImageFile) -> Result<Blob, RequestError> {
    let array = js_sys::Uint8Array::from(file.bytes());
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let opts = BlobPropertyBag::new();
    opts.set_type(file.mime());

    Blob::new_with_buffer_source_sequence_and_options(&parts, &opts).map_err(network_error)
}

/// Convert a rejected promise or thrown value into a request error.
///
/// Prefers the JS `Error.message` (e.g. `"Failed to fetch"` for CORS or
/// connection failures) over the debug rendering of the value.
fn network_error(value: JsValue) -> RequestError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    RequestError::Network(message)
}
