//! restyle-core: Panel state and style service protocol (sans-IO).
//!
//! Models the upload/display panel: two image slots, the stylized
//! result, and the busy flag, plus the generate request and response
//! format and a submission driver that ties them together.
//!
//! This crate has **no browser dependencies** -- file bytes come in as
//! slices and the network call goes through the [`StyleService`] trait.
//! The `fetch` transport and Dioxus components live in `restyle-io`.

pub mod config;
pub mod panel;
pub mod protocol;
pub mod submit;
pub mod types;

pub use config::{API_URL_ENV, ConfigError, ServiceConfig};
pub use panel::{Completion, PanelState, PendingRequest, RequestToken};
pub use protocol::{FormPart, GenerateRequest, IMAGE_SIZE, PartValue, parse_response};
pub use submit::{PanelStore, StyleService, SubmitOutcome, submit};
pub use types::{ImageFile, RequestError, Slot, StylizedImage, SubmitError};
