//! A1 range addressing
//!
//! Ranges look like `Sheet1`, `Sheet1!A1:F` or `'Q3 Customers'!A2:F2`.

use std::fmt;

use crate::record::{RowPosition, COLUMN_COUNT};

use super::errors::{TableError, TableResult};

/// A sheet name plus an optional cell reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    sheet: String,
    cells: Option<String>,
}

impl SheetRange {
    /// Range covering a whole sheet
    pub fn sheet(name: impl Into<String>) -> Self {
        Self {
            sheet: name.into(),
            cells: None,
        }
    }

    /// Parse an A1 range.
    pub fn parse(input: &str) -> TableResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TableError::InvalidRange("range is empty".to_string()));
        }

        let (sheet, rest) = if let Some(quoted) = input.strip_prefix('\'') {
            let close = quoted.find('\'').ok_or_else(|| {
                TableError::InvalidRange(format!("unterminated sheet name: {}", input))
            })?;
            let rest = &quoted[close + 1..];
            let rest = match rest {
                "" => None,
                r => Some(r.strip_prefix('!').ok_or_else(|| {
                    TableError::InvalidRange(format!("expected '!' after sheet name: {}", input))
                })?),
            };
            (quoted[..close].to_string(), rest)
        } else {
            match input.split_once('!') {
                Some((sheet, cells)) => (sheet.to_string(), Some(cells)),
                None => (input.to_string(), None),
            }
        };

        if sheet.is_empty() {
            return Err(TableError::InvalidRange(format!("missing sheet name: {}", input)));
        }

        let cells = match rest {
            Some("") => {
                return Err(TableError::InvalidRange(format!("missing cells: {}", input)));
            }
            Some(cells) => Some(cells.to_string()),
            None => None,
        };

        Ok(Self { sheet, cells })
    }

    /// Range covering the record columns of a single row of a table that
    /// starts at `A1`
    pub fn row(sheet: impl Into<String>, position: RowPosition) -> Self {
        Self::sheet(sheet).record_row(position)
    }

    /// Record columns of the row at `position`, where `position` counts
    /// from this range's first row (the header).
    ///
    /// `Sheet1!B3:G` with the first data row gives `Sheet1!B4:G4`.
    pub fn record_row(&self, position: RowPosition) -> Self {
        let n = self.absolute(position).row_number();
        let first = self.start_column();
        let last = first + COLUMN_COUNT - 1;
        Self {
            sheet: self.sheet.clone(),
            cells: Some(format!(
                "{}{}:{}{}",
                column_letter(first),
                n,
                column_letter(last),
                n
            )),
        }
    }

    /// Sheet row of a position counted from this range's first row
    pub fn absolute(&self, position: RowPosition) -> RowPosition {
        position.offset(self.start_row().unwrap_or(1).saturating_sub(1))
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    pub fn cells(&self) -> Option<&str> {
        self.cells.as_deref()
    }

    /// Row number of the first cell reference, if it names one
    pub fn start_row(&self) -> Option<usize> {
        let cells = self.cells.as_deref()?;
        let start = cells.split(':').next()?;
        let digits: String = start
            .chars()
            .skip_while(|c| c.is_ascii_alphabetic() || *c == '$')
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// 1-based column of the first cell reference; 1 when it names none
    pub fn start_column(&self) -> usize {
        let start = match self.cells.as_deref().and_then(|c| c.split(':').next()) {
            Some(start) => start,
            None => return 1,
        };
        let index = start
            .trim_start_matches('$')
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .fold(0usize, |acc, c| {
                acc.saturating_mul(26) + (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize
            });
        index.max(1)
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = self
            .sheet
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if plain {
            write!(f, "{}", self.sheet)?;
        } else {
            write!(f, "'{}'", self.sheet)?;
        }
        if let Some(cells) = &self.cells {
            write!(f, "!{}", cells)?;
        }
        Ok(())
    }
}

/// Column letter for a 1-based column index (1 = A, 27 = AA)
pub fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}
