//! Upload/display panel state.
//!
//! [`PanelState`] holds everything the page shows: the two selected
//! files, the last stylized result, and whether a request is in flight.
//! Submissions are split into [`PanelState::begin_submit`] and
//! [`PanelState::finish`] so the network call can happen in between
//! without holding a borrow of the state.
//!
//! Every submission gets a fresh [`RequestToken`]. Only the response for
//! the most recently issued token is applied; an older request that
//! resolves late is reported as [`Completion::Superseded`] and leaves the
//! state untouched.

use std::fmt;

use crate::protocol::GenerateRequest;
use crate::types::{ImageFile, RequestError, Slot, StylizedImage, SubmitError};

/// Button text while idle.
pub const GENERATE_LABEL: &str = "Generate";

/// Button text while a request is in flight.
pub const GENERATING_LABEL: &str = "Generating...";

/// Sequence number identifying one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A submission that passed validation and is ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Token to hand back to [`PanelState::finish`].
    pub token: RequestToken,
    /// What to send.
    pub request: GenerateRequest,
}

/// What [`PanelState::finish`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The result replaced the output reference.
    Applied(StylizedImage),
    /// The request failed; the previous output is kept.
    Failed(RequestError),
    /// A newer submission was issued; the response was discarded.
    Superseded,
}

/// In-memory state of the upload/display panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    content: Option<ImageFile>,
    style: Option<ImageFile>,
    output: Option<StylizedImage>,
    /// Last token handed out; zero before the first submission.
    issued: u64,
    in_flight: Option<RequestToken>,
}

impl PanelState {
    /// An empty panel: no files, no result, idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `file` into `slot`, replacing whatever was there.
    ///
    /// Used for both the file picker and drag-and-drop.
    pub fn select(&mut self, slot: Slot, file: ImageFile) {
        tracing::debug!(%slot, name = file.name(), bytes = file.len(), "image selected");
        *self.slot_mut(slot) = Some(file);
    }

    /// The file currently in `slot`.
    #[must_use]
    pub const fn file(&self, slot: Slot) -> Option<&ImageFile> {
        match slot {
            Slot::Content => self.content.as_ref(),
            Slot::Style => self.style.as_ref(),
        }
    }

    /// Drop zone text: the selected file's name, or the slot's prompt.
    #[must_use]
    pub fn slot_label(&self, slot: Slot) -> &str {
        self.file(slot).map_or(slot.placeholder(), ImageFile::name)
    }

    /// The most recent successful result.
    #[must_use]
    pub const fn output(&self) -> Option<&StylizedImage> {
        self.output.as_ref()
    }

    /// Returns `true` while the latest submission awaits its response.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Text for the submit button.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        if self.is_busy() {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    /// Validate the slots and start a submission.
    ///
    /// On success the panel becomes busy and the returned
    /// [`PendingRequest`] carries a new token. Calling this while busy is
    /// allowed; the new token supersedes the one in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::MissingInput`] listing the empty slots. The
    /// state is left unchanged and no token is issued.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, SubmitError> {
        let (Some(content), Some(style)) = (&self.content, &self.style) else {
            let missing = Slot::ALL
                .into_iter()
                .filter(|&slot| self.file(slot).is_none())
                .collect();
            return Err(SubmitError::MissingInput(missing));
        };
        let request = GenerateRequest::new(content.clone(), style.clone());

        self.issued += 1;
        let token = RequestToken(self.issued);
        self.in_flight = Some(token);

        Ok(PendingRequest { token, request })
    }

    /// Apply the outcome of the request identified by `token`.
    ///
    /// If `token` is the one in flight, a success replaces the output
    /// reference and a failure leaves it as it was; either way the panel
    /// is idle afterward. Any other token is stale and changes nothing.
    pub fn finish(
        &mut self,
        token: RequestToken,
        outcome: Result<StylizedImage, RequestError>,
    ) -> Completion {
        if self.in_flight != Some(token) {
            return Completion::Superseded;
        }

        let completion = match outcome {
            Ok(image) => {
                self.output = Some(image.clone());
                Completion::Applied(image)
            }
            Err(e) => Completion::Failed(e),
        };
        self.in_flight = None;
        completion
    }

    const fn slot_mut(&mut self, slot: Slot) -> &mut Option<ImageFile> {
        match slot {
            Slot::Content => &mut self.content,
            Slot::Style => &mut self.style,
        }
    }
}
