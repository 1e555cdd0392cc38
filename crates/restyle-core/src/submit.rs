//! Submission driver.
//!
//! [`submit`] runs one Submit operation end to end: validate the panel,
//! mark it busy, call the style service, and apply the outcome. The
//! panel storage ([`PanelStore`]) and the transport ([`StyleService`])
//! are traits so the same driver runs against a Dioxus signal and
//! browser `fetch` in the app, and against a `RefCell` and a fake
//! service in tests.

use std::cell::RefCell;
use std::future::Future;

use crate::config::ServiceConfig;
use crate::panel::{Completion, PanelState};
use crate::protocol::GenerateRequest;
use crate::types::{RequestError, StylizedImage, SubmitError};

/// Shared, mutable access to a [`PanelState`].
///
/// Implementations must not hold the borrow past `f`; the driver never
/// calls `update` across an `.await`.
pub trait PanelStore {
    /// Run `f` with exclusive access to the panel.
    fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R;
}

impl PanelStore for RefCell<PanelState> {
    fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Transport for the generate call.
pub trait StyleService {
    /// POST `request` to `url` and interpret the response.
    ///
    /// Implementations should use [`crate::parse_response`] so status and
    /// body handling is the same for every transport.
    fn generate(
        &self,
        url: &str,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<StylizedImage, RequestError>>;
}

/// Result of one Submit operation, for deciding what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(SubmitError),
    /// The service returned a result and it is now displayed.
    Applied(StylizedImage),
    /// The request failed; the previous result is still displayed.
    Failed(RequestError),
    /// A later submission superseded this one before it resolved.
    Superseded,
}

impl SubmitOutcome {
    /// Blocking notification to show, if any.
    ///
    /// Only rejected and failed submissions notify. A superseded
    /// submission stays silent; the newer one reports for both.
    #[must_use]
    pub const fn notification(&self) -> Option<&'static str> {
        match self {
            Self::Rejected(e) => Some(e.user_message()),
            Self::Failed(e) => Some(e.user_message()),
            Self::Applied(_) | Self::Superseded => None,
        }
    }
}

/// Run the Submit operation against `panel`.
///
/// With both slots filled this issues exactly one call to `service`;
/// otherwise it issues none. `config` of `None` means no base URL was
/// configured, which fails the submission without calling the service.
/// The panel is busy from validation until the outcome is applied.
#[allow(clippy::future_not_send)] // WASM is single-threaded; panel stores are !Send
pub async fn submit<P, S>(panel: &P, config: Option<&ServiceConfig>, service: &S) -> SubmitOutcome
where
    P: PanelStore + ?Sized,
    S: StyleService,
{
    let pending = match panel.update(PanelState::begin_submit) {
        Ok(pending) => pending,
        Err(e) => {
            tracing::warn!(error = %e, "submit rejected");
            return SubmitOutcome::Rejected(e);
        }
    };
    let token = pending.token;

    let outcome = if let Some(config) = config {
        let url = config.generate_url();
        tracing::info!(
            %token,
            %url,
            content = pending.request.content.name(),
            style = pending.request.style.name(),
            image_size = pending.request.image_size,
            "sending generate request",
        );
        service.generate(&url, &pending.request).await
    } else {
        Err(RequestError::NotConfigured)
    };

    match panel.update(|state| state.finish(token, outcome)) {
        Completion::Applied(image) => {
            tracing::info!(%token, %image, "stylized image received");
            SubmitOutcome::Applied(image)
        }
        Completion::Failed(e) => {
            tracing::error!(%token, error = %e, "generate request failed");
            SubmitOutcome::Failed(e)
        }
        Completion::Superseded => {
            tracing::debug!(%token, "discarding response for superseded request");
            SubmitOutcome::Superseded
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::executor::block_on;

    use super::*;
    use crate::protocol::{IMAGE_SIZE, PartValue, parse_response};
    use crate::types::{ImageFile, MISSING_INPUT_MESSAGE, REQUEST_FAILED_MESSAGE, Slot};

    /// One recorded call to [`FakeService`].
    #[derive(Debug, Clone)]
    struct Call {
        url: String,
        request: GenerateRequest,
        busy_during_call: bool,
    }

    /// Answers every call with a canned status and body.
    struct FakeService {
        panel: Rc<RefCell<PanelState>>,
        status: u16,
        body: String,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeService {
        fn new(panel: &Rc<RefCell<PanelState>>, status: u16, body: &str) -> Self {
            Self {
                panel: Rc::clone(panel),
                status,
                body: body.to_owned(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl StyleService for FakeService {
        async fn generate(
            &self,
            url: &str,
            request: &GenerateRequest,
        ) -> Result<StylizedImage, RequestError> {
            self.calls.borrow_mut().push(Call {
                url: url.to_owned(),
                request: request.clone(),
                busy_during_call: self.panel.borrow().is_busy(),
            });
            parse_response(self.status, &self.body)
        }
    }

    /// Fails every call at the network level.
    struct OfflineService {
        calls: Cell<usize>,
    }

    impl StyleService for OfflineService {
        async fn generate(
            &self,
            _url: &str,
            _request: &GenerateRequest,
        ) -> Result<StylizedImage, RequestError> {
            self.calls.set(self.calls.get() + 1);
            Err(RequestError::Network("TypeError: Failed to fetch".into()))
        }
    }

    /// Resolves each call with whatever is sent on its channel, so tests
    /// control the order in which overlapping requests complete.
    struct GatedService {
        gates: RefCell<Vec<oneshot::Receiver<Result<StylizedImage, RequestError>>>>,
    }

    impl StyleService for GatedService {
        async fn generate(
            &self,
            _url: &str,
            _request: &GenerateRequest,
        ) -> Result<StylizedImage, RequestError> {
            let gate = self.gates.borrow_mut().remove(0);
            gate.await
                .unwrap_or_else(|_| Err(RequestError::Network("gate dropped".into())))
        }
    }

    fn config() -> ServiceConfig {
        ServiceConfig::new("https://style.example.com/").unwrap()
    }

    fn content() -> ImageFile {
        ImageFile::new("portrait.jpg", vec![0xFF, 0xD8, 0xFF])
    }

    fn style() -> ImageFile {
        ImageFile::new("starry-night.png", vec![0x89, 0x50])
    }

    fn panel_with(slots: &[Slot]) -> Rc<RefCell<PanelState>> {
        let mut panel = PanelState::new();
        for &slot in slots {
            let file = match slot {
                Slot::Content => content(),
                Slot::Style => style(),
            };
            panel.select(slot, file);
        }
        Rc::new(RefCell::new(panel))
    }

    fn image(reference: &str) -> StylizedImage {
        parse_response(200, &format!(r#"{{"stylized_image": "{reference}"}}"#)).unwrap()
    }

    #[test]
    fn empty_slot_never_calls_service() {
        let cases: [&[Slot]; 3] = [&[], &[Slot::Content], &[Slot::Style]];
        for slots in cases {
            let panel = panel_with(slots);
            let service = FakeService::new(&panel, 200, r#"{"stylized_image": "X"}"#);

            let outcome = block_on(submit(&*panel, Some(&config()), &service));

            assert!(
                matches!(outcome, SubmitOutcome::Rejected(SubmitError::MissingInput(_))),
                "slots {slots:?}: got {outcome:?}"
            );
            assert_eq!(outcome.notification(), Some(MISSING_INPUT_MESSAGE));
            assert!(service.calls.borrow().is_empty());
            assert!(!panel.borrow().is_busy());
        }
    }

    #[test]
    fn filled_slots_issue_exactly_one_call() {
        let panel = panel_with(&Slot::ALL);
        let service = FakeService::new(&panel, 200, r#"{"stylized_image": "X"}"#);

        block_on(submit(&*panel, Some(&config()), &service));

        let calls = service.calls.borrow();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.url, "https://style.example.com/generate");

        let parts = call.request.parts();
        assert_eq!(parts[0].name, "content");
        assert_eq!(parts[0].value, PartValue::File(&content()));
        assert_eq!(parts[1].name, "style");
        assert_eq!(parts[1].value, PartValue::File(&style()));
        assert_eq!(parts[2].name, "image_size");
        assert_eq!(parts[2].value, PartValue::Text(IMAGE_SIZE));
    }

    #[test]
    fn success_applies_result_and_ends_busy() {
        let panel = panel_with(&Slot::ALL);
        let service = FakeService::new(&panel, 200, r#"{"stylized_image": "X"}"#);

        let outcome = block_on(submit(&*panel, Some(&config()), &service));

        assert_eq!(outcome, SubmitOutcome::Applied(image("X")));
        assert_eq!(outcome.notification(), None);
        let state = panel.borrow();
        assert_eq!(state.output().map(StylizedImage::as_str), Some("X"));
        assert!(!state.is_busy());
    }

    #[test]
    fn server_error_keeps_output_and_ends_busy() {
        let panel = panel_with(&Slot::ALL);
        let ok = FakeService::new(&panel, 200, r#"{"stylized_image": "previous"}"#);
        block_on(submit(&*panel, Some(&config()), &ok));

        let failing = FakeService::new(&panel, 500, r#"{"error": "model exploded"}"#);
        let outcome = block_on(submit(&*panel, Some(&config()), &failing));

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(RequestError::Status {
                status: 500,
                detail: Some("model exploded".into()),
            })
        );
        assert_eq!(outcome.notification(), Some(REQUEST_FAILED_MESSAGE));
        let state = panel.borrow();
        assert_eq!(state.output().map(StylizedImage::as_str), Some("previous"));
        assert!(!state.is_busy());
    }

    #[test]
    fn network_error_is_a_request_failure() {
        let panel = panel_with(&Slot::ALL);
        let service = OfflineService {
            calls: Cell::new(0),
        };

        let outcome = block_on(submit(&*panel, Some(&config()), &service));

        assert!(matches!(outcome, SubmitOutcome::Failed(RequestError::Network(_))));
        assert_eq!(service.calls.get(), 1, "no retry");
        assert!(panel.borrow().output().is_none());
        assert!(!panel.borrow().is_busy());
    }

    #[test]
    fn malformed_success_body_is_a_request_failure() {
        let panel = panel_with(&Slot::ALL);
        let service = FakeService::new(&panel, 200, "<html>oops</html>");

        let outcome = block_on(submit(&*panel, Some(&config()), &service));

        assert!(matches!(outcome, SubmitOutcome::Failed(RequestError::MalformedBody(_))));
        assert!(panel.borrow().output().is_none());
    }

    #[test]
    fn unconfigured_service_fails_without_calling() {
        let panel = panel_with(&Slot::ALL);
        let service = FakeService::new(&panel, 200, r#"{"stylized_image": "X"}"#);

        let outcome = block_on(submit(&*panel, None, &service));

        assert_eq!(outcome, SubmitOutcome::Failed(RequestError::NotConfigured));
        assert_eq!(outcome.notification(), Some(REQUEST_FAILED_MESSAGE));
        assert!(service.calls.borrow().is_empty());
        assert!(!panel.borrow().is_busy());
    }

    #[test]
    fn busy_only_while_request_is_pending() {
        let panel = panel_with(&Slot::ALL);
        let service = FakeService::new(&panel, 200, r#"{"stylized_image": "X"}"#);

        assert!(!panel.borrow().is_busy());
        block_on(submit(&*panel, Some(&config()), &service));
        assert!(!panel.borrow().is_busy());

        assert!(service.calls.borrow()[0].busy_during_call);
    }

    #[test]
    fn overlapping_submissions_keep_latest_result() {
        let panel = panel_with(&Slot::ALL);
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let service = GatedService {
            gates: RefCell::new(vec![first_rx, second_rx]),
        };
        let config = config();

        let first = submit(&*panel, Some(&config), &service);
        let second = submit(&*panel, Some(&config), &service);

        let (first_outcome, second_outcome) = block_on(async {
            let mut first = Box::pin(first);
            let mut second = Box::pin(second);

            // Both requests start and wait on their gates.
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert!(futures::poll!(second.as_mut()).is_pending());
            assert!(panel.borrow().is_busy());

            // The second request resolves before the first.
            second_tx.send(Ok(image("second"))).unwrap();
            let second_outcome = second.await;
            assert!(!panel.borrow().is_busy());

            first_tx.send(Ok(image("first"))).unwrap();
            let first_outcome = first.await;
            (first_outcome, second_outcome)
        });

        assert_eq!(second_outcome, SubmitOutcome::Applied(image("second")));
        assert_eq!(first_outcome, SubmitOutcome::Superseded);
        assert_eq!(first_outcome.notification(), None);
        let state = panel.borrow();
        assert_eq!(state.output().map(StylizedImage::as_str), Some("second"));
        assert!(!state.is_busy());
    }
}
