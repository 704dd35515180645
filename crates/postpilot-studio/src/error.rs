use postpilot_core::PostError;
use postpilot_gateway::GatewayError;
use thiserror::Error;

/// Failures surfaced by the studio stages.
///
/// Research, asset rendering, trend lookups and the planner absorb the first
/// two variants into their fallbacks; drafting and post assembly propagate them.
#[derive(Debug, Error)]
pub enum StudioError {
    /// The model gateway could not be reached or refused the request.
    #[error("model gateway unavailable: {0}")]
    GatewayUnavailable(#[source] GatewayError),

    /// The gateway answered but the payload did not match the expected shape.
    #[error("malformed model response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    /// A stage was invoked without a required field.
    #[error("missing required input: {0}")]
    EmptyInput(&'static str),

    #[error("operation cancelled")]
    Cancelled,
}

impl StudioError {
    /// Classify a gateway failure for the stage named by `context`.
    pub(crate) fn from_gateway(err: GatewayError, context: &str) -> Self {
        if err.is_malformed_payload() {
            StudioError::MalformedResponse {
                context: context.to_owned(),
                reason: err.to_string(),
            }
        } else {
            StudioError::GatewayUnavailable(err)
        }
    }

    pub(crate) fn malformed(context: &str, reason: impl std::fmt::Display) -> Self {
        StudioError::MalformedResponse {
            context: context.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Failures from the publish simulator.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("a publish sequence is already running")]
    Busy,

    #[error("publish cancelled")]
    Cancelled,

    #[error(transparent)]
    InvalidPost(#[from] PostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_errors_become_malformed_response() {
        let err = StudioError::from_gateway(GatewayError::EmptyResponse("x".to_owned()), "draft");
        assert!(
            matches!(err, StudioError::MalformedResponse { ref context, .. } if context == "draft")
        );
    }

    #[test]
    fn transport_errors_become_gateway_unavailable() {
        let err = StudioError::from_gateway(
            GatewayError::Api {
                status: 503,
                message: "overloaded".to_owned(),
            },
            "draft",
        );
        assert!(matches!(
            err,
            StudioError::GatewayUnavailable(GatewayError::Api { status: 503, .. })
        ));
    }
}
