//! Shared context for every generation stage.

use std::future::Future;
use std::sync::Arc;

use postpilot_gateway::{GatewayError, ModelGateway};
use tokio_util::sync::CancellationToken;

use crate::error::StudioError;

/// Handle over a [`ModelGateway`] plus the cancellation token every gateway
/// call races against.
///
/// Stage operations (`research`, `draft`, `render_asset`, `build_post`,
/// `plan_week`, `suggest_topics`) are implemented on this type in their own
/// modules. Cloning is cheap and shares both the gateway and the token.
#[derive(Clone)]
pub struct Studio {
    gateway: Arc<dyn ModelGateway>,
    cancel: CancellationToken,
}

impl Studio {
    #[must_use]
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token, e.g. with a child of a caller-owned one.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub(crate) fn gateway(&self) -> &dyn ModelGateway {
        self.gateway.as_ref()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Await a gateway future unless cancellation fires first.
    pub(crate) async fn call<T, F>(&self, context: &str, fut: F) -> Result<T, StudioError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(StudioError::Cancelled),
            result = fut => result.map_err(|e| StudioError::from_gateway(e, context)),
        }
    }
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Swap a stage failure for its fallback value, logging the cause.
///
/// Cancellation is not a stage failure and passes through untouched.
pub(crate) fn or_fallback<T>(
    stage: &'static str,
    result: Result<T, StudioError>,
    fallback: impl FnOnce() -> T,
) -> Result<T, StudioError> {
    match result {
        Ok(value) => Ok(value),
        Err(StudioError::Cancelled) => Err(StudioError::Cancelled),
        Err(e) => {
            tracing::warn!(stage, error = %e, "stage failed; using fallback");
            Ok(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_replaces_gateway_failures() {
        let result: Result<u8, _> = Err(StudioError::malformed("t", "bad json"));
        assert_eq!(or_fallback("t", result, || 7).unwrap(), 7);
    }

    #[test]
    fn fallback_keeps_successful_value() {
        assert_eq!(or_fallback("t", Ok::<u8, _>(1), || 7).unwrap(), 1);
    }

    #[test]
    fn fallback_lets_cancellation_through() {
        let result: Result<u8, _> = Err(StudioError::Cancelled);
        assert!(matches!(
            or_fallback("t", result, || 7),
            Err(StudioError::Cancelled)
        ));
    }
}
