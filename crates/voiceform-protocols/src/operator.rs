//! Manual-continuation signal.

use async_trait::async_trait;

/// Blocking wait for a human operator.
///
/// Used when a file upload cannot be committed programmatically and the
/// operator has to drive the native file chooser by hand before the session
/// moves on to the next field.
#[async_trait]
pub trait OperatorGate: Send + Sync {
    /// Block until the operator signals continuation.
    async fn wait(&self);
}
