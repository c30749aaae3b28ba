use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common CSV dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Null,
}

// -- Manual Eq/Hash so CellValue can act as a set member --

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Int(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Interpret the cell as an `f64` for binning and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – the inferred storage type of a whole column
// ---------------------------------------------------------------------------

/// Storage type assigned to a column at load time. A column is `Int` when
/// every non-empty cell parses as an integer, `Float` when every non-empty
/// cell parses as a float, `Date` when every non-empty cell parses as a
/// date, and `Text` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Date,
    Text,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

// ---------------------------------------------------------------------------
// Column – one named, typed column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – the full in-memory dataset
// ---------------------------------------------------------------------------

/// The uploaded CSV as an ordered sequence of named columns. All columns
/// have identical length; rows are positionally aligned across columns.
/// A `Table` is never mutated in place — filtering, limiting and coercion
/// each build a new `Table`, leaving the source intact for other pages.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].len() == w[1].len()),
            "all columns in a table must have identical length"
        );
        Table { columns }
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Columns in declared order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Build a new table keeping only the given row indices, in the given
    /// order, across every column.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                dtype: c.dtype,
                values: indices.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();
        Table { columns }
    }

    /// Build a new table with one column replaced.
    pub fn with_column(&self, replacement: Column) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if c.name == replacement.name {
                    replacement.clone()
                } else {
                    c.clone()
                }
            })
            .collect();
        Table { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> Table {
        Table::new(vec![
            Column {
                name: "a".into(),
                dtype: ColumnType::Int,
                values: vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
            },
            Column {
                name: "b".into(),
                dtype: ColumnType::Text,
                values: vec![
                    CellValue::Text("x".into()),
                    CellValue::Null,
                    CellValue::Text("z".into()),
                ],
            },
        ])
    }

    #[test]
    fn take_rows_keeps_alignment_and_order() {
        let t = two_column_table();
        let taken = t.take_rows(&[2, 0]);
        assert_eq!(taken.n_rows(), 2);
        assert_eq!(taken.column("a").unwrap().values[0], CellValue::Int(3));
        assert_eq!(
            taken.column("b").unwrap().values[1],
            CellValue::Text("x".into())
        );
        // source untouched
        assert_eq!(t.n_rows(), 3);
    }

    #[test]
    fn cell_value_conversions() {
        assert_eq!(CellValue::Int(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Text("nope".into()).as_f64(), None);
        assert!(CellValue::Null.is_null());
    }

    #[test]
    fn column_lookup_by_name() {
        let t = two_column_table();
        assert!(t.column("b").is_some());
        assert!(t.column("missing").is_none());
    }
}
