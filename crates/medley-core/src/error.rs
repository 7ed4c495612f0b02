// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Medley media plugin core.

use thiserror::Error;

/// The primary error type used across the Medley registry and operation crates.
#[derive(Debug, Error)]
pub enum MedleyError {
    /// A content-type identifier was empty or not of the `type/subtype` shape.
    /// Raised synchronously at the registration boundary; nothing is stored.
    #[error("invalid content-type identifier: {0:?}")]
    InvalidMimeType(String),

    /// An in-flight operation was stopped because its caller asked it to.
    ///
    /// This is a rejection, not a silent success: callers that need to
    /// suppress expected cancellation noise branch on [`MedleyError::is_aborted`].
    #[error("operation aborted")]
    Aborted,

    /// A plugin instance's own failure (parse error, transmux error, I/O).
    /// The registry and operation layers pass these through unwrapped.
    #[error("plugin error: {message}")]
    Plugin {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MedleyError {
    /// Returns true for the distinguished "operation aborted" kind.
    pub fn is_aborted(&self) -> bool {
        matches!(self, MedleyError::Aborted)
    }
}
