use chrono::{Datelike, NaiveDate};

use super::error::DataError;
use super::model::{Column, ColumnType, Table};

// ---------------------------------------------------------------------------
// Chart reductions: each page boils the filtered/limited table down to the
// exact series its chart needs. The display layer renders these verbatim.
// ---------------------------------------------------------------------------

/// The 16 compass points, in the fixed order frequency charts use.
pub const COMPASS_ORDER: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 100;

/// Days between 0001-01-01 (CE) and the Unix epoch; dates plot as
/// days-since-epoch on the x axis.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

pub fn date_to_days(d: NaiveDate) -> f64 {
    (d.num_days_from_ce() - UNIX_EPOCH_CE_DAYS) as f64
}

pub fn days_to_date(v: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(UNIX_EPOCH_CE_DAYS.saturating_add(v.trunc() as i32))
}

fn numeric_column<'t>(table: &'t Table, name: &str) -> Result<&'t Column, DataError> {
    let col = table
        .column(name)
        .ok_or_else(|| DataError::InvalidArgument(format!("no column named '{name}'")))?;
    if !col.dtype.is_numeric() {
        return Err(DataError::NoApplicableColumns("numeric"));
    }
    Ok(col)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One equal-width histogram bin; `lower` is inclusive, `upper` exclusive
/// except for the last bin, which also takes values on the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bin the non-missing values of a numeric column into `bins` equal-width
/// bins over the observed min/max, emitted in ascending lower-bound order.
/// Edges are derived from this call's column — recomputed per call, never
/// fixed globally. The sum of the counts equals the number of non-missing
/// values.
///
/// A degenerate range (all values equal) widens to `[min-0.5, max+0.5]` so
/// every bin exists. A column with no non-missing values yields no bins.
pub fn histogram(table: &Table, column: &str, bins: usize) -> Result<Vec<HistogramBin>, DataError> {
    if !(MIN_BINS..=MAX_BINS).contains(&bins) {
        return Err(DataError::InvalidArgument(format!(
            "bin count {bins} outside {MIN_BINS}..={MAX_BINS}"
        )));
    }
    let col = numeric_column(table, column)?;

    let values: Vec<f64> = col.values.iter().filter_map(|v| v.as_f64()).collect();
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: lo + (i + 1) as f64 * width,
            count,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// One point per retained input row: the date key plus one value per chosen
/// series. Missing dates and missing values are kept, not dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub date: Option<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub series_names: Vec<String>,
    pub points: Vec<TimeSeriesPoint>,
}

/// Reduce to a date-keyed series over one or two numeric columns.
///
/// The output has exactly one point per input row. Points are ordered by
/// date; points with a missing date sort after all dated points, keeping
/// their relative input order.
pub fn time_series(
    table: &Table,
    date_column: &str,
    y_columns: &[String],
) -> Result<TimeSeries, DataError> {
    if y_columns.is_empty() || y_columns.len() > 2 {
        return Err(DataError::InvalidArgument(format!(
            "expected 1 or 2 series columns, got {}",
            y_columns.len()
        )));
    }
    let date_col = table
        .column(date_column)
        .ok_or_else(|| DataError::InvalidArgument(format!("no column named '{date_column}'")))?;
    if date_col.dtype != ColumnType::Date {
        return Err(DataError::NoApplicableColumns("date"));
    }
    let y_cols = y_columns
        .iter()
        .map(|name| numeric_column(table, name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut points: Vec<TimeSeriesPoint> = (0..table.n_rows())
        .map(|i| TimeSeriesPoint {
            date: date_col.values[i].as_date(),
            values: y_cols.iter().map(|c| c.values[i].as_f64()).collect(),
        })
        .collect();

    // Stable sort: dated points ascending, missing dates last in input order.
    points.sort_by_key(|p| (p.date.is_none(), p.date));

    Ok(TimeSeries {
        series_names: y_columns.to_vec(),
        points,
    })
}

// ---------------------------------------------------------------------------
// Wind direction frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionCount {
    pub direction: &'static str,
    pub count: usize,
}

/// Count occurrences of each observed direction, reindexed onto the fixed
/// 16-point compass order. Always exactly 16 entries: a compass point
/// absent from the data contributes zero, and observed values outside the
/// 16-point list are ignored.
pub fn direction_frequency(table: &Table, column: &str) -> Result<Vec<DirectionCount>, DataError> {
    let col = table
        .column(column)
        .ok_or_else(|| DataError::InvalidArgument(format!("no column named '{column}'")))?;
    if col.dtype != ColumnType::Text {
        return Err(DataError::NoApplicableColumns("wind gust direction"));
    }

    let mut counts = [0usize; 16];
    for v in &col.values {
        if let Some(text) = v.as_text() {
            if let Some(idx) = COMPASS_ORDER.iter().position(|d| *d == text) {
                counts[idx] += 1;
            }
        }
    }

    Ok(COMPASS_ORDER
        .iter()
        .zip(counts)
        .map(|(direction, count)| DirectionCount { direction, count })
        .collect())
}

// ---------------------------------------------------------------------------
// XY series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct XySeries {
    pub x_label: String,
    pub y_label: String,
    /// Row-aligned `[x, y]` pairs, ready for plotting.
    pub points: Vec<[f64; 2]>,
}

/// Pair two numeric columns row by row; a pair is emitted only when both
/// sides are non-missing. With `x_column` as `None` the reduction degrades
/// to a single series of `y_column` over the row index — the fallback when
/// only one numeric column exists system-wide.
pub fn xy_series(
    table: &Table,
    x_column: Option<&str>,
    y_column: &str,
) -> Result<XySeries, DataError> {
    let y_col = numeric_column(table, y_column)?;

    let Some(x_name) = x_column else {
        let points = y_col
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_f64().map(|y| [i as f64, y]))
            .collect();
        return Ok(XySeries {
            x_label: "row".to_string(),
            y_label: y_column.to_string(),
            points,
        });
    };

    let x_col = numeric_column(table, x_name)?;
    let points = x_col
        .values
        .iter()
        .zip(&y_col.values)
        .filter_map(|(x, y)| Some([x.as_f64()?, y.as_f64()?]))
        .collect();

    Ok(XySeries {
        x_label: x_name.to_string(),
        y_label: y_column.to_string(),
        points,
    })
}
