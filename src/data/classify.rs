use super::loader::parse_date;
use super::model::{CellValue, Column, ColumnType, Table};

// ---------------------------------------------------------------------------
// Column role classification
// ---------------------------------------------------------------------------

/// Name fragments that mark a column as holding weather station locations.
pub const LOCATION_KEYWORDS: [&str; 5] = ["location", "site", "station", "area", "place"];

/// The semantic role a column plays in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Location,
    Date,
    WindGustDirection,
    Numeric,
    Unclassified,
}

/// The date column chosen for a table, and whether its cells still need
/// coercion (name-based fallback on a text column) or are already typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub name: String,
    pub needs_coercion: bool,
}

/// Result of classifying a table's columns. Recomputed per table from
/// column names and inferred types only — never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub location: Option<String>,
    pub date: Option<DateColumn>,
    pub wind_gust_dir: Vec<String>,
    pub numeric: Vec<String>,
}

impl ColumnRoles {
    /// The role a given column was assigned, for annotating the table view.
    pub fn role_of(&self, name: &str) -> ColumnRole {
        if self.location.as_deref() == Some(name) {
            ColumnRole::Location
        } else if self.date.as_ref().is_some_and(|d| d.name == name) {
            ColumnRole::Date
        } else if self.wind_gust_dir.iter().any(|c| c == name) {
            ColumnRole::WindGustDirection
        } else if self.numeric.iter().any(|c| c == name) {
            ColumnRole::Numeric
        } else {
            ColumnRole::Unclassified
        }
    }
}

/// Heuristically identify the semantic columns of a table.
///
/// * Location: first column (declared order) whose name contains any of
///   [`LOCATION_KEYWORDS`], case-insensitively. At most one.
/// * Date: first `Date`-typed column; failing that, the first column whose
///   name contains "date", flagged for lenient coercion.
/// * Wind gust direction: every column whose name contains both "gust" and
///   "dir" — a set, the caller chooses among them.
/// * Numeric: every `Int`/`Float` column, declared order preserved.
///
/// Deterministic: identical column names and types always classify the
/// same way.
pub fn classify(table: &Table) -> ColumnRoles {
    let location = table
        .columns()
        .iter()
        .find(|c| {
            let lower = c.name.to_lowercase();
            LOCATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(|c| c.name.clone());

    let date = table
        .columns()
        .iter()
        .find(|c| c.dtype == ColumnType::Date)
        .map(|c| DateColumn {
            name: c.name.clone(),
            needs_coercion: false,
        })
        .or_else(|| {
            table
                .columns()
                .iter()
                .find(|c| c.name.to_lowercase().contains("date"))
                .map(|c| DateColumn {
                    name: c.name.clone(),
                    needs_coercion: true,
                })
        });

    let wind_gust_dir = table
        .columns()
        .iter()
        .filter(|c| {
            let lower = c.name.to_lowercase();
            lower.contains("gust") && lower.contains("dir")
        })
        .map(|c| c.name.clone())
        .collect();

    let numeric = table
        .columns()
        .iter()
        .filter(|c| c.dtype.is_numeric())
        .map(|c| c.name.clone())
        .collect();

    ColumnRoles {
        location,
        date,
        wind_gust_dir,
        numeric,
    }
}

/// Build a new table with the given column coerced to dates, cell by cell.
/// Unparseable cells degrade to `Null`; coercion never fails the page.
/// Columns already typed as dates pass through unchanged.
pub fn coerce_dates(table: &Table, column: &str) -> Table {
    let Some(col) = table.column(column) else {
        return table.clone();
    };
    if col.dtype == ColumnType::Date {
        return table.clone();
    }

    let values = col
        .values
        .iter()
        .map(|v| match v {
            CellValue::Text(s) => parse_date(s).map(CellValue::Date).unwrap_or(CellValue::Null),
            CellValue::Date(d) => CellValue::Date(*d),
            _ => CellValue::Null,
        })
        .collect();

    table.with_column(Column {
        name: col.name.clone(),
        dtype: ColumnType::Date,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn col(name: &str, dtype: ColumnType, values: Vec<CellValue>) -> Column {
        Column {
            name: name.into(),
            dtype,
            values,
        }
    }

    fn weather_table() -> Table {
        Table::new(vec![
            col("Date", ColumnType::Date, vec![CellValue::Null]),
            col("Station", ColumnType::Text, vec![CellValue::Null]),
            col("MinTemp", ColumnType::Float, vec![CellValue::Null]),
            col("MaxTemp", ColumnType::Float, vec![CellValue::Null]),
            col("WindGustDir", ColumnType::Text, vec![CellValue::Null]),
        ])
    }

    #[test]
    fn classification_is_deterministic() {
        let t = weather_table();
        assert_eq!(classify(&t), classify(&t));
    }

    #[test]
    fn location_takes_the_first_keyword_match_in_column_order() {
        let t = Table::new(vec![
            col("Date", ColumnType::Text, vec![]),
            col("Station", ColumnType::Text, vec![]),
            col("Rainfall", ColumnType::Float, vec![]),
            col("Area", ColumnType::Text, vec![]),
        ]);
        assert_eq!(classify(&t).location.as_deref(), Some("Station"));
    }

    #[test]
    fn location_matching_is_case_insensitive() {
        let t = Table::new(vec![col("LOCATION_ID", ColumnType::Text, vec![])]);
        assert_eq!(classify(&t).location.as_deref(), Some("LOCATION_ID"));
    }

    #[test]
    fn no_location_column_is_not_an_error() {
        let t = Table::new(vec![col("MinTemp", ColumnType::Float, vec![])]);
        assert_eq!(classify(&t).location, None);
    }

    #[test]
    fn typed_date_column_wins_over_name_fallback() {
        let t = Table::new(vec![
            col("UpdateDate", ColumnType::Text, vec![]),
            col("Observed", ColumnType::Date, vec![]),
        ]);
        let roles = classify(&t);
        assert_eq!(
            roles.date,
            Some(DateColumn {
                name: "Observed".into(),
                needs_coercion: false
            })
        );
    }

    #[test]
    fn name_fallback_flags_coercion() {
        let t = Table::new(vec![
            col("MinTemp", ColumnType::Float, vec![]),
            col("ReportDate", ColumnType::Text, vec![]),
        ]);
        let roles = classify(&t);
        assert_eq!(
            roles.date,
            Some(DateColumn {
                name: "ReportDate".into(),
                needs_coercion: true
            })
        );
    }

    #[test]
    fn gust_direction_returns_every_match() {
        let t = Table::new(vec![
            col("WindGustDir", ColumnType::Text, vec![]),
            col("gust_dir_9am", ColumnType::Text, vec![]),
            col("WindSpeed", ColumnType::Float, vec![]),
        ]);
        assert_eq!(
            classify(&t).wind_gust_dir,
            vec!["WindGustDir".to_string(), "gust_dir_9am".to_string()]
        );
    }

    #[test]
    fn numeric_columns_preserve_declared_order() {
        let t = weather_table();
        assert_eq!(
            classify(&t).numeric,
            vec!["MinTemp".to_string(), "MaxTemp".to_string()]
        );
    }

    #[test]
    fn role_lookup_covers_all_categories() {
        let roles = classify(&weather_table());
        assert_eq!(roles.role_of("Station"), ColumnRole::Location);
        assert_eq!(roles.role_of("Date"), ColumnRole::Date);
        assert_eq!(roles.role_of("WindGustDir"), ColumnRole::WindGustDirection);
        assert_eq!(roles.role_of("MinTemp"), ColumnRole::Numeric);
        assert_eq!(roles.role_of("Comment"), ColumnRole::Unclassified);
    }

    #[test]
    fn coercion_is_lenient_and_keeps_row_count() {
        let t = Table::new(vec![col(
            "ReportDate",
            ColumnType::Text,
            vec![
                CellValue::Text("2024-03-01".into()),
                CellValue::Text("not a date".into()),
                CellValue::Null,
            ],
        )]);
        let coerced = coerce_dates(&t, "ReportDate");
        let col = coerced.column("ReportDate").unwrap();
        assert_eq!(col.dtype, ColumnType::Date);
        assert_eq!(col.len(), 3);
        assert_eq!(
            col.values[0],
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(col.values[1], CellValue::Null);
        assert_eq!(col.values[2], CellValue::Null);
    }
}
