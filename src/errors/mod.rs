/// Error types for wallhub
///
/// Per-message failures inside the hub are contained and logged, never
/// propagated; these types exist for the boundaries that can fail: parsing a
/// payload, talking to a stopped hub, and starting the service.
use thiserror::Error;

// =============================================================================
// ENVELOPE ERRORS
// =============================================================================

/// A raw payload that could not be split into `(kind, body)`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The delimiter was missing or appeared more than once
    #[error("Poorly formatted message: expected 2 parts, found {parts}")]
    BadSplit { parts: usize },

    #[error("Poorly formatted message: payload is not valid UTF-8")]
    InvalidUtf8,
}

// =============================================================================
// HUB ERRORS
// =============================================================================

/// Returned by `HubHandle` when the coordination loop is gone
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("Hub is not running ({queue} queue closed)")]
    Closed { queue: &'static str },
}

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Error)]
pub enum WallHubError {
    #[error("Envelope Error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Hub Error: {0}")]
    Hub(#[from] HubError),

    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Webserver Error: {0}")]
    Webserver(String),
}
