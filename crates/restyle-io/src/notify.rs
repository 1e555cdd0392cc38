//! Blocking user notifications via `window.alert`.

use restyle_core::SubmitOutcome;

/// Show `message` in a blocking browser dialog.
///
/// Logs instead when there is no window (e.g. inside a worker).
pub fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        tracing::warn!(notification = message, "no global window; notification not shown");
        return;
    };
    if let Err(e) = window.alert_with_message(message) {
        tracing::warn!(notification = message, error = ?e, "window.alert failed");
    }
}

/// Notify the user about a finished submission, if it warrants it.
///
/// Rejected and failed submissions raise an alert; successful and
/// superseded ones stay silent.
pub fn report(outcome: &SubmitOutcome) {
    if let Some(message) = outcome.notification() {
        alert(message);
    }
}
