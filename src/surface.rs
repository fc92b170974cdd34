//! Collaborator surfaces the pipeline pushes side effects through.
//!
//! The pipeline never renders or routes by itself; the embedding console
//! injects these at construction time, which keeps the pipeline testable
//! with recording fakes.

use tracing::warn;

/// User-visible, non-blocking error display (toast, banner, status line).
///
/// Called at most once per failed call, in addition to the returned error.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Navigation side effect: send the user to the login entry point.
pub trait Navigator: Send + Sync {
    fn go_to_login(&self);
}

/// Default notifier: logs the message through `tracing`.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(message, "request failed");
    }
}

/// Default navigator: does nothing. Embedders without a routing layer
/// (scripts, tests) can leave this in place.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn go_to_login(&self) {}
}
