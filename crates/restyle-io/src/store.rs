//! Panel state held in a Dioxus signal.

use dioxus::prelude::*;
use restyle_core::{PanelState, PanelStore};

/// A [`PanelStore`] backed by a `Signal<PanelState>`.
///
/// Writes go through the signal, so every component reading the panel
/// re-renders when the submission driver updates it.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalPanel(Signal<PanelState>);

impl SignalPanel {
    /// Wrap the app's panel signal.
    #[must_use]
    pub const fn new(signal: Signal<PanelState>) -> Self {
        Self(signal)
    }
}

impl PanelStore for SignalPanel {
    fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        let mut signal = self.0;
        f(&mut signal.write())
    }
}
