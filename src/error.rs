//! Failure taxonomy for upstream API calls
//!
//! Every client returns `ApiError`. The UI never shows an `ApiError` directly;
//! it asks for a `MessageKey` for the screen that failed and renders its text.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when calling an upstream service
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected our credential
    #[error("credential rejected with status {0}")]
    Unauthorized(StatusCode),

    /// The service is throttling us
    #[error("rate limited by upstream service")]
    RateLimited,

    /// Any other non-success status
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body was missing or did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No credential is configured for this service
    #[error("missing API key for {0}")]
    MissingKey(&'static str),

    /// The configured base URL cannot have path segments appended
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::InvalidUrl(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Malformed(e.to_string())
    }
}

/// Coarse classification used to pick a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credential missing, invalid or without a subscription
    Credential,
    /// Too many requests
    RateLimited,
    /// Everything else
    Generic,
}

impl FailureKind {
    /// Classifies a non-success HTTP status
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => FailureKind::Credential,
            429 => FailureKind::RateLimited,
            _ => FailureKind::Generic,
        }
    }
}

impl ApiError {
    /// Builds the error for a non-success response
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match FailureKind::from_status(status) {
            FailureKind::Credential => ApiError::Unauthorized(status),
            FailureKind::RateLimited => ApiError::RateLimited,
            FailureKind::Generic => ApiError::Status { status, body },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Unauthorized(_) | ApiError::MissingKey(_) => FailureKind::Credential,
            ApiError::RateLimited => FailureKind::RateLimited,
            ApiError::Transport(_)
            | ApiError::Status { .. }
            | ApiError::Malformed(_)
            | ApiError::InvalidUrl(_) => FailureKind::Generic,
        }
    }
}

/// Which screen a failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    ExerciseDetail,
    CategoryList,
    BodyPartCatalog,
    EquipmentCatalog,
    Chat,
}

/// Every message the application can show for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    CredentialRejected,
    RateLimited,
    DetailFetchFailed,
    ExercisesFetchFailed,
    BodyPartsFetchFailed,
    EquipmentFetchFailed,
    ChatFailed,
    ChatKeyMissing,
}

impl MessageKey {
    /// Picks the message for a failure on a given surface
    pub fn for_failure(surface: Surface, error: &ApiError) -> Self {
        match (surface, error.kind()) {
            (Surface::Chat, FailureKind::Credential) if matches!(error, ApiError::MissingKey(_)) => {
                MessageKey::ChatKeyMissing
            }
            (Surface::Chat, _) => MessageKey::ChatFailed,
            (Surface::ExerciseDetail | Surface::CategoryList, FailureKind::Credential) => {
                MessageKey::CredentialRejected
            }
            (Surface::ExerciseDetail | Surface::CategoryList, FailureKind::RateLimited) => {
                MessageKey::RateLimited
            }
            (Surface::ExerciseDetail, FailureKind::Generic) => MessageKey::DetailFetchFailed,
            (Surface::CategoryList, FailureKind::Generic) => MessageKey::ExercisesFetchFailed,
            (Surface::BodyPartCatalog, _) => MessageKey::BodyPartsFetchFailed,
            (Surface::EquipmentCatalog, _) => MessageKey::EquipmentFetchFailed,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MessageKey::CredentialRejected => {
                "API key error: Please check your RapidAPI subscription"
            }
            MessageKey::RateLimited => "API rate limit exceeded. Please try again later",
            MessageKey::DetailFetchFailed => "Failed to fetch data. Please try again later.",
            MessageKey::ExercisesFetchFailed => {
                "Failed to fetch exercises. Please try again later."
            }
            MessageKey::BodyPartsFetchFailed => {
                "Failed to fetch body parts. Please try again later."
            }
            MessageKey::EquipmentFetchFailed => {
                "Failed to fetch equipment. Please try again later."
            }
            MessageKey::ChatFailed => "Sorry, I encountered an error. Please try again later.",
            MessageKey::ChatKeyMissing => {
                "Configuration error: API key is missing. Please contact support."
            }
        }
    }
}
