//! # Issnaudit - ISSN extraction and DOAJ presence auditing
//!
//! Issnaudit scans journal accreditation workbooks (`.xls`/`.xlsx`/`.ods`)
//! for ISSN identifiers and checks each one against the DOAJ (Directory of
//! Open Access Journals) search API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Workbook   │────▶│   Scanner   │────▶│ DOAJ lookup │────▶│   Report    │
//! │ (calamine)  │     │ (issn sets) │     │ (throttled) │     │ (per sheet) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use issnaudit::{audit_workbook, AuditOptions, DoajClient};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = DoajClient::new();
//!     let options = AuditOptions { sheet_suffix: Some("2016".into()), ..Default::default() };
//!     let audits = audit_workbook(Path::new("journals.xls"), &client, &options).await.unwrap();
//!     for audit in audits {
//!         println!("{}", audit);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`issn`] - ISSN token recognition
//! - [`workbook`] - Spreadsheet reading and cell normalization
//! - [`scan`] - Per-sheet and per-row ISSN extraction
//! - [`doaj`] - Throttled DOAJ search client
//! - [`report`] - Aggregation and reporting

// Core modules
pub mod error;
pub mod issn;

// Spreadsheet reading
pub mod workbook;

// Scanning
pub mod scan;

// Remote lookup
pub mod doaj;

// Aggregation and reporting
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{AuditError, AuditResult, WorkbookError, WorkbookResult};

// =============================================================================
// Re-exports - ISSN recognition
// =============================================================================

pub use issn::{is_issn_token, Issn};

// =============================================================================
// Re-exports - Workbook
// =============================================================================

pub use workbook::{normalize, CellValue, SheetGrid, Workbook};

// =============================================================================
// Re-exports - Scanning
// =============================================================================

pub use scan::{scan_sheet, scan_sheet_by_row, IssnSet};

// =============================================================================
// Re-exports - DOAJ lookup
// =============================================================================

pub use doaj::{DoajClient, DoajConfig, DoajLookup, LookupResult, DOAJ_SEARCH_URL};

// =============================================================================
// Re-exports - Reporting
// =============================================================================

pub use report::{
    audit_sheet, audit_sheet_by_row, audit_workbook, audit_workbook_by_row, AuditOptions,
    RowAudit, SheetAudit,
};
