//! Image drop zone with drag-and-drop and click-to-pick.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use restyle_core::{ImageFile, Slot};

/// File picker filter hint. Dropped files are not filtered.
const ACCEPT: &str = "image/*";

/// A file handed over by the picker or a drop.
///
/// Lets [`first_image`] run against in-memory files in tests.
trait PickedFile {
    fn file_name(&self) -> String;
    async fn contents(&self) -> Result<Vec<u8>, String>;
}

impl PickedFile for FileData {
    fn file_name(&self) -> String {
        self.name()
    }

    async fn contents(&self) -> Result<Vec<u8>, String> {
        self.read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string())
    }
}

/// Read the first of `files` into an [`ImageFile`].
///
/// Returns `None` for an empty list, so a drop without files does
/// nothing. Read failures come back as a message for the zone.
#[allow(clippy::future_not_send)] // WASM is single-threaded; FileData is !Send
async fn first_image<F: PickedFile>(files: &[F]) -> Option<Result<ImageFile, String>> {
    let file = files.first()?;
    let name = file.file_name();
    Some(
        file.contents()
            .await
            .map(|bytes| ImageFile::new(name.clone(), bytes))
            .map_err(|e| format!("Failed to read {name}: {e}")),
    )
}

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Which panel slot this zone fills.
    slot: Slot,
    /// Text shown in the zone: the selected file name or a prompt.
    label: String,
    /// Called with the first picked or dropped file once its bytes are read.
    on_select: EventHandler<ImageFile>,
}

/// A clickable drop target for one image slot.
///
/// The whole zone is a `<label>` around a hidden file input, so a click
/// anywhere opens the picker. Dropping files prevents the browser's
/// default navigation and uses the first file, exactly as if it had been
/// picked.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let slot = props.slot;

    // Shared by the file-picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths so both end in the same `on_select` call.
    let process_files = move |files: Vec<FileData>| async move {
        match first_image(&files).await {
            None => {}
            Some(Ok(file)) => {
                error.set(None);
                props.on_select.call(file);
            }
            Some(Err(e)) => {
                tracing::warn!(%slot, "{e}");
                error.set(Some(e));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let state_class = if dragging() {
        "drop-zone drop-zone-active"
    } else {
        "drop-zone"
    };

    rsx! {
        label {
            class: "{state_class}",
            "data-slot": "{slot}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                r#type: "file",
                accept: ACCEPT,
                class: "hidden",
                onchange: handle_files,
            }

            span { class: "drop-zone-label", "{props.label}" }

            if let Some(ref err) = error() {
                span { class: "drop-zone-error", "{err}" }
            }
        }
    }
}
