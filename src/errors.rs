//! Error types for the harvesting pipeline
//!
//! Navigation failures are classified so callers can tell a skippable page
//! apart from a dead browser session. Extraction gaps are deliberately absent
//! here: they resolve to sentinel values (see [`crate::extract::Extraction`]).

use thiserror::Error;

/// Result type alias for pipeline operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Failure while driving the browser to a page
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// Page did not finish loading within the navigation budget
    #[error("Navigation to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// Driver reported a failure for this page only
    #[error("Browser driver error while loading {url}: {message}")]
    Driver { url: String, message: String },

    /// The browser session itself is gone; no further page can be loaded
    #[error("Browser session closed: {0}")]
    SessionClosed(String),
}

impl NavigationError {
    /// Classify a raw driver error for `url`.
    ///
    /// Errors that mean the browser process or its CDP connection died become
    /// [`NavigationError::SessionClosed`]; everything else stays page-scoped.
    pub fn from_driver(url: &str, error: impl std::fmt::Display) -> Self {
        let message = error.to_string();
        if is_session_lost(&message) {
            Self::SessionClosed(message)
        } else {
            Self::Driver {
                url: url.to_string(),
                message,
            }
        }
    }

    /// Whether this error ends the whole run rather than one candidate.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SessionClosed(_))
    }
}

/// Messages chromiumoxide and CDP produce once the browser connection is gone
const SESSION_LOST_MESSAGES: &[&str] = &[
    // CdpError::NoResponse
    "received no response from the chromium instance",
    // CdpError::ChannelSendError, handler task no longer receiving
    "send failed because receiver is gone",
    "oneshot canceled",
    // CdpError::Ws
    "trying to work with closed connection",
    "connection closed normally",
    // CDP protocol errors for a dead target
    "target closed",
    "session with given id not found",
    "browser closed",
    "browser disconnected",
];

fn is_session_lost(message: &str) -> bool {
    let msg = message.to_lowercase();
    SESSION_LOST_MESSAGES.iter().any(|needle| msg.contains(needle))
}

/// Error type for the pipeline and its collaborators
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Configuration rejected at build time
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Browser could not be started for a run
    #[error("Failed to start browser session: {0}")]
    SessionInit(String),

    /// Navigation failure that escaped candidate-level recovery
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Excel workbook error
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
