//! Error types for the ISSN audit pipeline.
//!
//! Two levels:
//!
//! - [`WorkbookError`] - spreadsheet reading errors
//! - [`AuditError`] - top-level audit orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Remote lookup
//! failures are deliberately *not* errors: they are folded into
//! [`crate::doaj::LookupResult::Failed`] so that a flaky registry
//! never aborts a run.

use thiserror::Error;

// =============================================================================
// Workbook Errors
// =============================================================================

/// Errors while reading a spreadsheet workbook.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Failed to open or detect the workbook format.
    #[error("Failed to open workbook: {0}")]
    Open(#[from] calamine::Error),

    /// A named sheet could not be read.
    #[error("Failed to read sheet '{name}': {message}")]
    Sheet { name: String, message: String },
}

// =============================================================================
// Audit Errors (top-level)
// =============================================================================

/// Top-level audit orchestration errors.
///
/// This is the main error type returned by the workbook drivers in
/// [`crate::report`]. It wraps lower-level errors and adds audit-specific
/// variants.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Workbook reading error.
    #[error("Workbook error: {0}")]
    Workbook(#[from] WorkbookError),

    /// A token given on the command line is not a syntactically valid ISSN.
    #[error("Not a valid ISSN: '{0}'")]
    InvalidIssn(String),

    /// IO error (report output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (report output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook operations.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // WorkbookError -> AuditError
        let wb_err = WorkbookError::Sheet {
            name: "List 2016".into(),
            message: "sheet not found".into(),
        };
        let audit_err: AuditError = wb_err.into();
        assert!(audit_err.to_string().contains("List 2016"));
    }

    #[test]
    fn test_invalid_issn_format() {
        let err = AuditError::InvalidIssn("not-an-issn".into());
        assert!(err.to_string().contains("not-an-issn"));
    }
}
