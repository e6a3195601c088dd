//! Sheet scanning: extract distinct ISSNs from a grid of cells.
//!
//! Two scopes, matching the two audit modes:
//!
//! - [`scan_sheet`] pools every cell on the sheet into one [`IssnSet`],
//!   counting duplicates exactly.
//! - [`scan_sheet_by_row`] treats each row as an independent unit (one
//!   journal per row, up to two ISSNs - print and online) and drops rows
//!   containing none.
//!
//! Cells that normalize to a string but do not match the ISSN pattern are
//! silently ignored; there is no partial-match reporting.

use std::collections::HashSet;

use crate::issn::Issn;
use crate::workbook::{normalize, CellValue, SheetGrid};

/// Distinct ISSNs collected from one scanning unit, plus an exact count of
/// re-encountered values.
///
/// Iteration order is unspecified; only the final counts are a contract.
#[derive(Debug, Default, Clone)]
pub struct IssnSet {
    values: HashSet<Issn>,
    duplicates: usize,
}

impl IssnSet {
    /// Insert a value; a value already present increments the duplicate
    /// counter instead.
    pub fn insert(&mut self, issn: Issn) {
        if !self.values.insert(issn) {
            self.duplicates += 1;
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// How many matching cells repeated a value already in the set.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn contains(&self, issn: &Issn) -> bool {
        self.values.contains(issn)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issn> {
        self.values.iter()
    }
}

/// Pool every ISSN on the sheet into one set, counting duplicates.
///
/// Returned even when empty: a sheet with no ISSNs is still reported.
pub fn scan_sheet(grid: &SheetGrid) -> IssnSet {
    let mut set = IssnSet::default();
    for row in grid.rows() {
        scan_row_into(row, &mut set);
    }
    set
}

/// One fresh set per row, in row order; rows without any ISSN are dropped.
pub fn scan_sheet_by_row(grid: &SheetGrid) -> Vec<IssnSet> {
    grid.rows()
        .filter_map(|row| {
            let mut set = IssnSet::default();
            scan_row_into(row, &mut set);
            (!set.is_empty()).then_some(set)
        })
        .collect()
}

fn scan_row_into(row: &[CellValue], set: &mut IssnSet) {
    for cell in row {
        if let Some(token) = normalize(cell) {
            if let Some(issn) = Issn::parse(&token) {
                set.insert(issn);
            }
        }
    }
}
