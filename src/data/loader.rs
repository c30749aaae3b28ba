use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use super::error::DataError;
use super::model::{CellValue, Column, ColumnType, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a weather table from a CSV file with a header row.
///
/// Any read or parse failure surfaces as [`DataError::Ingest`] here, before
/// any page logic runs. Ingestion enforces no size or row-count limit; row
/// limiting is a display concern handled downstream.
pub fn load_csv(path: &Path) -> Result<Table, DataError> {
    read_table(path).map_err(|e| DataError::Ingest(format!("{e:#}")))
}

fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    // Raw text cells, column-major.
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, value) in record.iter().enumerate() {
            raw[col_idx].push(value.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| {
            let dtype = infer_column_type(&cells);
            let values = cells.iter().map(|s| parse_cell(s, dtype)).collect();
            Column {
                name,
                dtype,
                values,
            }
        })
        .collect();

    Ok(Table::new(columns))
}

// ---------------------------------------------------------------------------
// Column type inference
// ---------------------------------------------------------------------------

/// Infer the storage type of a whole column from its raw text cells.
/// Empty cells are ignored; a column with no non-empty cell is `Text`.
fn infer_column_type(cells: &[String]) -> ColumnType {
    let mut non_empty = cells.iter().filter(|s| !s.is_empty()).peekable();
    if non_empty.peek().is_none() {
        return ColumnType::Text;
    }

    let mut all_int = true;
    let mut all_float = true;
    let mut all_date = true;
    for s in non_empty {
        all_int = all_int && s.parse::<i64>().is_ok();
        all_float = all_float && s.parse::<f64>().is_ok();
        all_date = all_date && parse_date(s).is_some();
        if !all_int && !all_float && !all_date {
            return ColumnType::Text;
        }
    }

    if all_int {
        ColumnType::Int
    } else if all_float {
        ColumnType::Float
    } else if all_date {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

fn parse_cell(s: &str, dtype: ColumnType) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    match dtype {
        ColumnType::Int => s.parse().map(CellValue::Int).unwrap_or(CellValue::Null),
        ColumnType::Float => s.parse().map(CellValue::Float).unwrap_or(CellValue::Null),
        ColumnType::Date => parse_date(s).map(CellValue::Date).unwrap_or(CellValue::Null),
        ColumnType::Text => CellValue::Text(s.to_string()),
    }
}

/// Lenient date parsing over the formats weather exports actually use.
/// Datetime cells are truncated to their date part.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn infers_column_types() {
        let file = write_csv(
            "Date,Station,MinTemp,Rainfall,Flag\n\
             2024-01-01,Alpha,3,0.2,yes\n\
             2024-01-02,Beta,-1,1.6,no\n",
        );
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.column("Date").unwrap().dtype, ColumnType::Date);
        assert_eq!(table.column("Station").unwrap().dtype, ColumnType::Text);
        assert_eq!(table.column("MinTemp").unwrap().dtype, ColumnType::Int);
        assert_eq!(table.column("Rainfall").unwrap().dtype, ColumnType::Float);
        assert_eq!(table.column("Flag").unwrap().dtype, ColumnType::Text);
        assert_eq!(table.n_rows(), 2);
    }

    #[test]
    fn empty_cells_become_null_without_changing_the_type() {
        let file = write_csv("Station,MaxTemp\nAlpha,12.5\nBeta,\nGamma,13.1\n");
        let table = load_csv(file.path()).unwrap();
        let col = table.column("MaxTemp").unwrap();
        assert_eq!(col.dtype, ColumnType::Float);
        assert_eq!(col.values[1], CellValue::Null);
        assert_eq!(col.values[2], CellValue::Float(13.1));
    }

    #[test]
    fn mixed_cells_fall_back_to_text() {
        let file = write_csv("v\n1\ntwo\n3\n");
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.column("v").unwrap().dtype, ColumnType::Text);
    }

    #[test]
    fn date_formats_are_recognised() {
        assert_eq!(
            parse_date("2008-12-01"),
            NaiveDate::from_ymd_opt(2008, 12, 1)
        );
        assert_eq!(
            parse_date("2008/12/01"),
            NaiveDate::from_ymd_opt(2008, 12, 1)
        );
        assert_eq!(
            parse_date("2008-12-01 06:00:00"),
            NaiveDate::from_ymd_opt(2008, 12, 1)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn missing_file_is_an_ingest_error() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::Ingest(_)));
    }

    #[test]
    fn ragged_row_is_an_ingest_error() {
        let file = write_csv("a,b\n1,2\n3\n");
        assert!(matches!(
            load_csv(file.path()),
            Err(DataError::Ingest(_))
        ));
    }
}
