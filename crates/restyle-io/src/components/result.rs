//! Result panel showing the stylized image.

use dioxus::prelude::*;
use restyle_core::StylizedImage;

use crate::download;

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// The latest successful result.
    image: StylizedImage,
}

/// Displays the stylized image with a download button.
///
/// Only rendered once a result exists; the parent decides visibility.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    let mut download_error = use_signal(|| Option::<String>::None);

    let src = props.image.as_str().to_owned();
    let on_download = {
        let image = props.image;
        move |_| {
            if let Err(e) = download::download_image(&image) {
                tracing::warn!(error = %e, "download failed");
                download_error.set(Some(format!("Download failed: {e}")));
            } else {
                download_error.set(None);
            }
        }
    };

    rsx! {
        div { class: "output-container",
            h2 { "Result" }
            img {
                class: "output-image",
                src: "{src}",
                alt: "Stylized",
            }
            button {
                class: "secondary",
                onclick: on_download,
                "Download"
            }
            if let Some(ref err) = download_error() {
                p { class: "error-text", "{err}" }
            }
        }
    }
}
