//! restyle-io: Browser I/O and Dioxus component library.
//!
//! Sends generate requests with `fetch`, shows blocking notifications,
//! saves results through a temporary anchor element, bridges the panel
//! state into a Dioxus signal, and provides the drop zone and result
//! components for the restyle web application.

pub mod components;
pub mod download;
pub mod notify;
pub mod store;
pub mod transport;

pub use components::{DropZone, ResultPanel};
pub use store::SignalPanel;
pub use transport::FetchService;
