//! Caller-facing error taxonomy.
//!
//! Operational errors (bad uploads, sheets without a schema, validator
//! failures) are reported back and the service keeps running. Everything else
//! signals a misconfigured service that should stop after responding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BAD_REQUEST: u16 = 400;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Name reported for every non-operational failure.
pub const CRITICAL_ERROR_NAME: &str = "Internal server error";
/// Message reported for every non-operational failure.
pub const CRITICAL_ERROR_MESSAGE: &str =
    "Application will shut down. Please inform the admin team.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Dictionary service unreachable, dictionary missing, service not
    /// initialized, or a field definition missing during enrichment.
    #[error("{message}")]
    Configuration { message: String },

    /// Problem with the submitted file itself.
    #[error("{message}")]
    BadRequest { status: u16, message: String },

    #[error("{message}")]
    Unexpected { message: String },
}

impl ServiceError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            status: BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceError::Configuration { .. } => "Server configuration error",
            ServiceError::BadRequest { .. } => "Bad request error",
            ServiceError::Unexpected { .. } => "Error",
        }
    }

    /// Operational errors are recovered at the boundary; the rest are fatal.
    pub fn is_operational(&self) -> bool {
        matches!(self, ServiceError::BadRequest { .. })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::BadRequest { status, .. } => *status,
            _ => INTERNAL_SERVER_ERROR,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        if self.is_operational() {
            ErrorPayload {
                name: self.name().to_string(),
                message: self.to_string(),
                details: None,
            }
        } else {
            ErrorPayload {
                name: CRITICAL_ERROR_NAME.to_string(),
                message: CRITICAL_ERROR_MESSAGE.to_string(),
                details: Some(self.to_string()),
            }
        }
    }
}

/// Structured body returned for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
