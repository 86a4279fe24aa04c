//! Error types for the alert subsystem
//!
//! Every failure inside the core collapses into one of two kinds: something the
//! slot expected to exist was missing (window, screen, UI thread), or a caller
//! gave up waiting for an alert to go away.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by slots and the pool manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    /// Missing screen, missing window, failed window creation, dead UI domain
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
    /// The wait-for-dismissal bound was exceeded
    #[error("alert was not dismissed within {0:?}")]
    Timeout(Duration),
}

impl AlertError {
    /// Shorthand for [`AlertError::InternalInconsistency`]
    pub fn internal(message: impl Into<String>) -> Self {
        AlertError::InternalInconsistency(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;
