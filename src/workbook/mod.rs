//! Spreadsheet workbook reading.
//!
//! Thin adapter over calamine: open a workbook (format auto-detected from
//! the file - `.xls`, `.xlsx`, `.xlsb` or `.ods`), list its sheets, and
//! materialize one sheet as a rectangular [`SheetGrid`] of [`CellValue`]s.
//! No audit logic here.

pub mod cell;

pub use cell::{normalize, CellValue};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{WorkbookError, WorkbookResult};

/// An open spreadsheet workbook.
pub struct Workbook {
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook, auto-detecting its format.
    pub fn open<P: AsRef<Path>>(path: P) -> WorkbookResult<Self> {
        let sheets = open_workbook_auto(path)?;
        Ok(Self { sheets })
    }

    /// Names of all sheets, in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    /// Materialize a sheet as a grid of typed cells.
    pub fn sheet(&mut self, name: &str) -> WorkbookResult<SheetGrid> {
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| WorkbookError::Sheet {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(SheetGrid::from_range(name, &range))
    }
}

/// A sheet as a rectangular grid of typed cells.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl SheetGrid {
    fn from_range(name: &str, range: &Range<Data>) -> Self {
        let rows = range
            .rows()
            .map(|row| row.iter().map(CellValue::from).collect())
            .collect();
        Self {
            name: name.to_string(),
            rows,
        }
    }

    /// Build a grid directly from rows of cells. Rows may be ragged;
    /// out-of-range accesses read as empty.
    pub fn from_rows(name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (widest row).
    pub fn ncols(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Cell accessor; anything outside the grid is an empty cell.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Iterate rows in row-major order.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SheetGrid {
        SheetGrid::from_rows(
            "List 2016",
            vec![
                vec![
                    CellValue::Text("Journal".into()),
                    CellValue::Text("1234-5678".into()),
                ],
                vec![CellValue::Number(42.0)],
            ],
        )
    }

    #[test]
    fn test_dimensions() {
        let g = grid();
        assert_eq!(g.nrows(), 2);
        assert_eq!(g.ncols(), 2);
        assert_eq!(g.name(), "List 2016");
    }

    #[test]
    fn test_out_of_range_reads_empty() {
        let g = grid();
        assert_eq!(*g.cell(1, 1), CellValue::Empty);
        assert_eq!(*g.cell(99, 99), CellValue::Empty);
    }

    #[test]
    fn test_cell_access() {
        let g = grid();
        assert_eq!(*g.cell(0, 1), CellValue::Text("1234-5678".into()));
        assert_eq!(*g.cell(1, 0), CellValue::Number(42.0));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(Workbook::open("/nonexistent/journals.xls").is_err());
    }
}
