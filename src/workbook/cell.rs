//! Typed cell values and normalization.

use calamine::Data;

/// A single spreadsheet cell, reduced to what the scanner cares about.
///
/// Anything calamine reports that is neither textual nor numeric (booleans,
/// cell errors, datetimes, durations) maps to `Empty`: no ISSN can live
/// there, and a malformed cell must never abort a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            _ => CellValue::Empty,
        }
    }
}

/// Reduce a cell to a candidate token, or nothing.
///
/// Text is trimmed. Numbers render as their decimal string (integral floats
/// render without a trailing `.0`), accommodating ISSNs stored as numbers.
/// Leading zeros lost by the spreadsheet layer are not recovered here; that
/// is an accepted limitation of numeric storage, not something this layer
/// can correct.
pub fn normalize(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(s) => Some(s.trim().to_string()),
        CellValue::Number(n) => Some(n.to_string()),
    }
}
