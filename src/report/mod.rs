//! Aggregation and reporting.
//!
//! Drives the scanner output through the lookup client and folds the
//! results into per-sheet aggregates:
//!
//! - [`audit_sheet`] - whole-sheet mode: one pool of distinct ISSNs per
//!   sheet, with duplicate, present and failed counts.
//! - [`audit_sheet_by_row`] - per-row mode: one journal per row with up to
//!   two ISSNs (print/online); rows are bucketed by how many of their
//!   ISSNs the DOAJ found.
//!
//! The workbook drivers ([`audit_workbook`], [`audit_workbook_by_row`])
//! open a workbook, select sheets by name suffix and audit each one.
//! Lookups run strictly one at a time; set iteration order is unspecified
//! and only the final counts matter.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::doaj::{DoajLookup, LookupResult};
use crate::error::AuditResult;
use crate::scan::{scan_sheet, scan_sheet_by_row};
use crate::workbook::{SheetGrid, Workbook};

/// Options for a workbook audit run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditOptions {
    /// Only audit sheets whose name ends with this suffix.
    ///
    /// The accreditation workbooks overlap across years, so a run is
    /// usually pinned to one year (e.g. `"2016"`). `None` selects every
    /// sheet.
    pub sheet_suffix: Option<String>,

    /// Per-row mode: surface failed lookups as a separate count instead
    /// of folding them into the "not found" tally.
    pub track_failures: bool,
}

/// Whole-sheet aggregate for one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SheetAudit {
    /// Sheet name.
    pub sheet: String,
    /// Distinct ISSNs found on the sheet.
    pub distinct: usize,
    /// Matching cells that repeated an ISSN already seen on the sheet.
    pub duplicates: usize,
    /// Distinct ISSNs the DOAJ reported present.
    pub present: usize,
    /// Distinct ISSNs whose lookup failed (no determination).
    pub failed: usize,
}

/// Per-row aggregate for one sheet.
///
/// Row sums count `Found` results only. By default a failed lookup counts
/// as a miss, exactly as the reference behavior coerced failure to false;
/// with [`AuditOptions::track_failures`] the failures are also surfaced
/// as their own count.
#[derive(Debug, Clone, Serialize)]
pub struct RowAudit {
    /// Sheet name.
    pub sheet: String,
    /// Rows containing at least one ISSN.
    pub rows_with_issns: usize,
    /// Rows where exactly two ISSNs were found in the DOAJ.
    pub both_found: usize,
    /// Rows where exactly one ISSN was found.
    pub one_found: usize,
    /// Rows where none were found.
    pub none_found: usize,
    /// Failed lookups across the sheet, when tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
}

/// Audit one sheet in whole-sheet mode.
pub async fn audit_sheet<L: DoajLookup>(grid: &SheetGrid, client: &L) -> SheetAudit {
    let set = scan_sheet(grid);

    let mut present = 0;
    let mut failed = 0;
    for issn in set.iter() {
        match client.lookup(issn).await {
            LookupResult::Found => present += 1,
            LookupResult::NotFound => {}
            LookupResult::Failed => failed += 1,
        }
    }

    SheetAudit {
        sheet: grid.name().to_string(),
        distinct: set.len(),
        duplicates: set.duplicates(),
        present,
        failed,
    }
}

/// Audit one sheet in per-row mode.
pub async fn audit_sheet_by_row<L: DoajLookup>(
    grid: &SheetGrid,
    client: &L,
    track_failures: bool,
) -> RowAudit {
    let mut sums = Vec::new();
    let mut failed = 0usize;

    for set in scan_sheet_by_row(grid) {
        let mut found = 0usize;
        for issn in set.iter() {
            match client.lookup(issn).await {
                LookupResult::Found => found += 1,
                LookupResult::NotFound => {}
                LookupResult::Failed => {
                    if track_failures {
                        failed += 1;
                    }
                }
            }
        }
        sums.push(found);
    }

    RowAudit {
        sheet: grid.name().to_string(),
        rows_with_issns: sums.len(),
        both_found: sums.iter().filter(|&&n| n == 2).count(),
        one_found: sums.iter().filter(|&&n| n == 1).count(),
        none_found: sums.iter().filter(|&&n| n == 0).count(),
        failed: track_failures.then_some(failed),
    }
}

/// Audit every selected sheet of a workbook in whole-sheet mode.
pub async fn audit_workbook<L: DoajLookup>(
    path: &Path,
    client: &L,
    options: &AuditOptions,
) -> AuditResult<Vec<SheetAudit>> {
    let mut workbook = Workbook::open(path)?;
    let mut audits = Vec::new();
    for name in selected_sheets(&workbook, options) {
        let grid = workbook.sheet(&name)?;
        audits.push(audit_sheet(&grid, client).await);
    }
    Ok(audits)
}

/// Audit every selected sheet of a workbook in per-row mode.
pub async fn audit_workbook_by_row<L: DoajLookup>(
    path: &Path,
    client: &L,
    options: &AuditOptions,
) -> AuditResult<Vec<RowAudit>> {
    let mut workbook = Workbook::open(path)?;
    let mut audits = Vec::new();
    for name in selected_sheets(&workbook, options) {
        let grid = workbook.sheet(&name)?;
        audits.push(audit_sheet_by_row(&grid, client, options.track_failures).await);
    }
    Ok(audits)
}

fn selected_sheets(workbook: &Workbook, options: &AuditOptions) -> Vec<String> {
    workbook
        .sheet_names()
        .into_iter()
        .filter(|name| {
            options
                .sheet_suffix
                .as_deref()
                .map_or(true, |suffix| name.ends_with(suffix))
        })
        .collect()
}

impl fmt::Display for SheetAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tSheet {}", self.sheet)?;
        writeln!(
            f,
            "\t\tFound {} ISSNs. {} duplicate(s) on the sheet.",
            self.distinct, self.duplicates
        )?;
        write!(f, "\t\t{} ISSNs are present in the DOAJ.", self.present)?;
        if self.failed > 0 {
            write!(
                f,
                "\n\t\t\t* However, the DOAJ search failed on {} ISSNs.",
                self.failed
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for RowAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tSheet {}", self.sheet)?;
        writeln!(
            f,
            "\t\tFound {} rows containing ISSNs.",
            self.rows_with_issns
        )?;
        write!(
            f,
            "\t\t{} journals found by both ISSNs, {} found by one, {} found by neither.",
            self.both_found, self.one_found, self.none_found
        )?;
        if let Some(failed) = self.failed {
            if failed > 0 {
                write!(
                    f,
                    "\n\t\t\t* However, the DOAJ search failed on {} ISSNs.",
                    failed
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issn::Issn;
    use crate::workbook::CellValue;
    use std::collections::HashMap;

    /// Lookup stub backed by a fixed table; unknown ISSNs are NotFound.
    struct StubLookup(HashMap<Issn, LookupResult>);

    impl StubLookup {
        fn new(entries: &[(&str, LookupResult)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(s, r)| (Issn::parse(s).unwrap(), *r))
                    .collect(),
            )
        }
    }

    impl DoajLookup for StubLookup {
        async fn lookup(&self, issn: &Issn) -> LookupResult {
            self.0
                .get(issn)
                .copied()
                .unwrap_or(LookupResult::NotFound)
        }
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[tokio::test]
    async fn test_whole_sheet_end_to_end() {
        let grid = SheetGrid::from_rows(
            "List 2016",
            vec![
                vec![
                    text("1234-5678"),
                    text("1234-5678"),
                    text("0001-0002"),
                    text("not an issn"),
                ],
                vec![CellValue::Empty, CellValue::Empty],
            ],
        );
        let client = StubLookup::new(&[
            ("1234-5678", LookupResult::Found),
            ("0001-0002", LookupResult::NotFound),
        ]);

        let audit = audit_sheet(&grid, &client).await;
        assert_eq!(audit.distinct, 2);
        assert_eq!(audit.duplicates, 1);
        assert_eq!(audit.present, 1);
        assert_eq!(audit.failed, 0);
    }

    #[tokio::test]
    async fn test_whole_sheet_failures_counted_separately() {
        let grid = SheetGrid::from_rows(
            "List",
            vec![vec![text("1234-5678"), text("0001-000X"), text("5678-123X")]],
        );
        let client = StubLookup::new(&[
            ("1234-5678", LookupResult::Found),
            ("0001-000X", LookupResult::Failed),
            ("5678-123X", LookupResult::Failed),
        ]);

        let audit = audit_sheet(&grid, &client).await;
        assert_eq!(audit.distinct, 3);
        assert_eq!(audit.present, 1);
        assert_eq!(audit.failed, 2);
        assert!(audit.present <= audit.distinct);
    }

    #[tokio::test]
    async fn test_by_row_end_to_end() {
        // Row A: two distinct ISSNs, both found. Row B: one ISSN, lookup fails.
        let grid = SheetGrid::from_rows(
            "Journals 2017",
            vec![
                vec![text("Journal A"), text("1234-5678"), text("5678-123X")],
                vec![text("Journal B"), text("0001-0009")],
                vec![text("no issns in this row")],
            ],
        );
        let client = StubLookup::new(&[
            ("1234-5678", LookupResult::Found),
            ("5678-123X", LookupResult::Found),
            ("0001-0009", LookupResult::Failed),
        ]);

        let audit = audit_sheet_by_row(&grid, &client, false).await;
        assert_eq!(audit.rows_with_issns, 2);
        assert_eq!(audit.both_found, 1);
        assert_eq!(audit.one_found, 0);
        assert_eq!(audit.none_found, 1);
        assert_eq!(audit.failed, None);
    }

    #[tokio::test]
    async fn test_by_row_track_failures() {
        let grid = SheetGrid::from_rows(
            "Journals",
            vec![vec![text("0001-0009"), text("1234-5678")]],
        );
        let client = StubLookup::new(&[
            ("0001-0009", LookupResult::Failed),
            ("1234-5678", LookupResult::Found),
        ]);

        let audit = audit_sheet_by_row(&grid, &client, true).await;
        assert_eq!(audit.one_found, 1);
        assert_eq!(audit.failed, Some(1));
    }

    #[tokio::test]
    async fn test_empty_sheet_still_reported() {
        let grid = SheetGrid::from_rows("Blank", vec![vec![CellValue::Empty]]);
        let client = StubLookup::new(&[]);

        let audit = audit_sheet(&grid, &client).await;
        assert_eq!(audit.distinct, 0);
        assert_eq!(audit.present, 0);

        let rows = audit_sheet_by_row(&grid, &client, false).await;
        assert_eq!(rows.rows_with_issns, 0);
    }

    #[test]
    fn test_sheet_display_hides_zero_failures() {
        let audit = SheetAudit {
            sheet: "List 2016".into(),
            distinct: 2,
            duplicates: 1,
            present: 1,
            failed: 0,
        };
        let rendered = audit.to_string();
        assert!(rendered.contains("Found 2 ISSNs"));
        assert!(rendered.contains("1 duplicate(s)"));
        assert!(rendered.contains("1 ISSNs are present"));
        assert!(!rendered.contains("failed"));
    }

    #[test]
    fn test_sheet_display_shows_nonzero_failures() {
        let audit = SheetAudit {
            sheet: "List 2016".into(),
            distinct: 5,
            duplicates: 0,
            present: 2,
            failed: 3,
        };
        assert!(audit.to_string().contains("failed on 3 ISSNs"));
    }

    #[test]
    fn test_row_display() {
        let audit = RowAudit {
            sheet: "Journals 2017".into(),
            rows_with_issns: 10,
            both_found: 4,
            one_found: 3,
            none_found: 3,
            failed: None,
        };
        let rendered = audit.to_string();
        assert!(rendered.contains("10 rows containing ISSNs"));
        assert!(rendered.contains("4 journals found by both"));
    }
}
