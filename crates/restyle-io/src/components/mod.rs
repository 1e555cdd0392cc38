//! Dioxus UI components for restyle.
//!
//! Provides the per-slot image drop zone and the result panel with its
//! download button.

mod drop_zone;
mod result;

pub use drop_zone::DropZone;
pub use result::ResultPanel;
