use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong between upload and chart. None of these are
/// fatal: each page maps its error to a message and keeps the rest of the
/// application usable.
///
/// Date coercion failure is deliberately not a variant — an unparseable date
/// cell degrades to a null cell instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The uploaded file could not be read or parsed. Raised at ingestion,
    /// before any page logic runs.
    #[error("Could not read the CSV file: {0}")]
    Ingest(String),

    /// The session slot is empty. Pages render an informational prompt and
    /// skip all computation.
    #[error("Please upload a weather data CSV file to display its contents")]
    NoDataLoaded,

    /// The table has no column of the semantic category a page needs
    /// (numeric, date, wind gust direction). The page shell still renders.
    #[error("The loaded data has no {0} column")]
    NoApplicableColumns(&'static str),

    /// A location value outside the column's distinct-value domain. The
    /// selection UI only offers domain members, so reaching this means a
    /// caller broke the contract.
    #[error("'{value}' is not a value of column '{column}'")]
    InvalidSelection { column: String, value: String },

    /// A parameter outside its documented range, e.g. a row limit past the
    /// row count or a bin count outside 5..=100.
    #[error("{0}")]
    InvalidArgument(String),
}
