//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Numeric
//! coercion problems inside reconciliation and receipt totals are handled
//! locally (coerced to zero or skipped with a log line) and never surface
//! through this type.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing required input to a composition or submission.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// A claim receipt was requested for a programme without a claim bill.
    #[error("No claim bill found for programme '{programme}'")]
    ClaimBillNotFound {
        /// Title of the programme that lacks a claim bill
        programme: String,
    },

    /// Certificate composition referenced an unknown template id.
    #[error("Certificate template '{template_id}' not found")]
    TemplateNotFound {
        /// The template id that failed to resolve
        template_id: String,
    },

    /// Certificate composition requested a version the template does not support.
    #[error("Template '{template_id}' does not support version {version}")]
    UnsupportedTemplateVersion {
        /// The template id the version was requested for
        template_id: String,
        /// The requested version
        version: u32,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// The PDF backend failed while producing document bytes.
    #[error("PDF generation error: {message}")]
    Pdf {
        /// What the backend reported
        message: String,
    },

    /// I/O error while writing to a document sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
