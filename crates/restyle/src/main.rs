use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use restyle_core::{ImageFile, PanelState, ServiceConfig, Slot};
use restyle_io::{DropZone, FetchService, ResultPanel, SignalPanel, notify};

fn main() {
    // Route `tracing` events from all crates to the browser console.
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        web_sys::console::error_1(&format!("failed to initialize logger: {e}").into());
    }
    dioxus::launch(app);
}

/// Read the service base URL captured at build time.
///
/// `build.rs` runs the same validation and fails the build on a
/// malformed value, so the error arm is not expected in practice.
fn service_config() -> Option<ServiceConfig> {
    match ServiceConfig::from_env_value(option_env!("RESTYLE_API_URL")) {
        Ok(Some(config)) => {
            tracing::info!(base_url = config.base_url(), "style service configured");
            Some(config)
        }
        Ok(None) => {
            tracing::warn!(
                "{} was not set at build time; generate requests will fail",
                restyle_core::API_URL_ENV
            );
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid style service base URL");
            None
        }
    }
}

/// Root application component.
///
/// Owns the panel state in a signal and wires the two drop zones, the
/// generate button, and the result panel to it. Submission runs in a
/// spawned task so the button switches to "Generating..." while the
/// request is in flight.
fn app() -> Element {
    // --- Application state ---
    let mut panel = use_signal(PanelState::new);
    let config = use_hook(service_config);

    // --- Generate handler ---
    // The button is disabled while busy, but nothing else stops a second
    // submission; the panel's request tokens keep only the newest result.
    let on_generate = move |_| {
        let config = config.clone();
        spawn(async move {
            let store = SignalPanel::new(panel);
            let outcome = restyle_core::submit(&store, config.as_ref(), &FetchService).await;
            notify::report(&outcome);
        });
    };

    let (content_label, style_label, busy, button_label, output) = {
        let state = panel.read();
        (
            state.slot_label(Slot::Content).to_owned(),
            state.slot_label(Slot::Style).to_owned(),
            state.is_busy(),
            state.button_label(),
            state.output().cloned(),
        )
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/restyle.css") }

        div { class: "app",
            h1 { class: "title", "Neural Style Transfer" }

            div { class: "upload-container",
                DropZone {
                    slot: Slot::Content,
                    label: content_label,
                    on_select: move |file: ImageFile| panel.write().select(Slot::Content, file),
                }
                DropZone {
                    slot: Slot::Style,
                    label: style_label,
                    on_select: move |file: ImageFile| panel.write().select(Slot::Style, file),
                }

                button {
                    class: "primary",
                    disabled: busy,
                    onclick: on_generate,
                    "{button_label}"
                }
            }

            if let Some(image) = output {
                ResultPanel { image }
            }
        }
    }
}
