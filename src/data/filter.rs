use std::collections::HashSet;

use super::error::DataError;
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Location filtering
// ---------------------------------------------------------------------------

/// Distinct non-missing values of a column in first-seen order — the
/// selectable domain for the location dropdown.
pub fn distinct_values(table: &Table, column: &str) -> Vec<CellValue> {
    let Some(col) = table.column(column) else {
        return Vec::new();
    };
    let mut seen: HashSet<&CellValue> = HashSet::new();
    let mut domain = Vec::new();
    for v in &col.values {
        if !v.is_null() && seen.insert(v) {
            domain.push(v.clone());
        }
    }
    domain
}

/// Narrow the table to the rows whose `column` cell equals `value`,
/// preserving relative row order and all columns.
///
/// `value` must be a member of the column's distinct-value domain; anything
/// else is an [`DataError::InvalidSelection`]. The selection UI only offers
/// domain members, so this is a defensive contract for direct callers.
/// When a table has no location column at all, callers skip this step and
/// pass the table through unchanged — the common case, not an error.
pub fn filter_by_location(
    table: &Table,
    column: &str,
    value: &CellValue,
) -> Result<Table, DataError> {
    let col = table.column(column).ok_or_else(|| {
        DataError::InvalidArgument(format!("no column named '{column}'"))
    })?;

    // The domain holds non-missing values only.
    if value.is_null() {
        return Err(DataError::InvalidSelection {
            column: column.to_string(),
            value: value.to_string(),
        });
    }

    let indices: Vec<usize> = col
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| *v == value)
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        return Err(DataError::InvalidSelection {
            column: column.to_string(),
            value: value.to_string(),
        });
    }

    Ok(table.take_rows(&indices))
}

// ---------------------------------------------------------------------------
// Row limiting
// ---------------------------------------------------------------------------

/// How many leading rows of the (already filtered) table to retain for
/// display. Bounds display volume only; ingestion is never limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub limit: usize,
    pub unbounded: bool,
}

impl RowWindow {
    /// The default window the UI suggests for a table of `n_rows` rows:
    /// the first `min(100, n_rows)` rows. An empty table admits no valid
    /// bounded limit, so its suggestion is the unbounded window.
    pub fn suggested(n_rows: usize) -> Self {
        if n_rows == 0 {
            return RowWindow {
                limit: 1,
                unbounded: true,
            };
        }
        RowWindow {
            limit: n_rows.min(100),
            unbounded: false,
        }
    }
}

/// Keep the first `window.limit` rows in current table order, or the whole
/// table when the window is unbounded.
///
/// A bounded limit outside `1..=n_rows` is an [`DataError::InvalidArgument`];
/// clamping is the caller's responsibility.
pub fn limit_rows(table: &Table, window: RowWindow) -> Result<Table, DataError> {
    if window.unbounded {
        return Ok(table.clone());
    }
    let n_rows = table.n_rows();
    if window.limit == 0 || window.limit > n_rows {
        return Err(DataError::InvalidArgument(format!(
            "row limit {} outside 1..={n_rows}",
            window.limit
        )));
    }
    let indices: Vec<usize> = (0..window.limit).collect();
    Ok(table.take_rows(&indices))
}
