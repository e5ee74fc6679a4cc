use thiserror::Error;

/// Errors recorded or returned while building requests or talking to the API.
///
/// Most of these never surface as `Err` from an operation: the orchestrator
/// records them in its error log and hands back a degenerate response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VersandError {
    /// More shipments or shipment numbers than the API accepts in one call.
    #[error(
        "There are only {max} Request/s for one call allowed for the action \"{action}\"! You tried to request {count} ones"
    )]
    RequestLimit {
        action: String,
        max: usize,
        count: usize,
    },

    /// An operation that only works on exactly one shipment got something else.
    #[error("{action}: Updating Shipments is a Single-Operation only! ({count} registered)")]
    SingleOperationOnly { action: String, count: usize },

    /// The injected transport failed to deliver the request.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The API answered with a status the operation cannot use.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The reply body was not a JSON document.
    #[error("response could not be decoded: {0}")]
    Decode(String),

    /// An export document position was missing one of its required values.
    #[error("invalid export document position: {0}")]
    InvalidExportDocPosition(String),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("invalid URL: {0}")]
    Url(String),

    /// Credentials could not be loaded from the environment.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure reported by a [`Transport`](crate::client::Transport) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single pre-flight validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "shipper.address.city").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_limit_message_names_limit_and_count() {
        let err = VersandError::RequestLimit {
            action: "createShipment".into(),
            max: 30,
            count: 31,
        };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("31"));
        assert!(msg.contains("createShipment"));
    }

    #[test]
    fn transport_error_is_transparent() {
        let err: VersandError = TransportError::new("connection refused").into();
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError::new("shipper.address.city", "must not be empty");
        assert_eq!(err.to_string(), "shipper.address.city: must not be empty");
    }
}
