use crate::data::classify::{classify, DateColumn};
use crate::data::filter::{distinct_values, RowWindow};
use crate::data::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The pages selectable in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Table,
    Histogram,
    DateGraph,
    WindDirection,
    Scatter,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Table,
        Page::Histogram,
        Page::DateGraph,
        Page::WindDirection,
        Page::Scatter,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Table => "Table",
            Page::Histogram => "Histogram",
            Page::DateGraph => "Date graph",
            Page::WindDirection => "Wind direction",
            Page::Scatter => "Scatter",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-page user inputs
// ---------------------------------------------------------------------------

/// Everything the user has dialled in on the pages: the location selection,
/// the row window, and the per-chart column choices. Reset to defaults
/// whenever a new file replaces the dataset.
#[derive(Debug, Clone)]
pub struct PageInputs {
    pub selected_location: Option<CellValue>,
    pub row_limit: usize,
    pub show_all_rows: bool,
    pub bins: usize,
    pub hist_column: Option<String>,
    pub date_column: Option<DateColumn>,
    /// First and optional second series of the date graph.
    pub y_primary: Option<String>,
    pub y_secondary: Option<String>,
    pub dir_column: Option<String>,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
}

impl Default for PageInputs {
    fn default() -> Self {
        Self {
            selected_location: None,
            row_limit: 100,
            show_all_rows: false,
            bins: 20,
            hist_column: None,
            date_column: None,
            y_primary: None,
            y_secondary: None,
            dir_column: None,
            x_column: None,
            y_column: None,
        }
    }
}

impl PageInputs {
    /// Defaults for a freshly loaded table: first location value, first
    /// numeric column for the histogram, first two numeric columns for the
    /// date graph, first gust-direction match, and a row limit of
    /// `min(100, rows)`.
    pub fn for_table(table: &Table) -> Self {
        let roles = classify(table);
        let selected_location = roles
            .location
            .as_ref()
            .and_then(|col| distinct_values(table, col).into_iter().next());
        let numeric = &roles.numeric;
        let window = RowWindow::suggested(table.n_rows());

        Self {
            selected_location,
            row_limit: window.limit,
            show_all_rows: window.unbounded,
            bins: 20,
            hist_column: numeric.first().cloned(),
            date_column: roles.date.clone(),
            y_primary: numeric.first().cloned(),
            y_secondary: numeric.get(1).cloned(),
            dir_column: roles.wind_gust_dir.first().cloned(),
            x_column: numeric.first().cloned(),
            y_column: numeric.get(1).or_else(|| numeric.first()).cloned(),
        }
    }

    /// The row window the current inputs describe, clamped to the row count
    /// of the table being displayed.
    pub fn row_window(&self, n_rows: usize) -> RowWindow {
        RowWindow {
            limit: self.row_limit.clamp(1, n_rows.max(1)),
            unbounded: self.show_all_rows,
        }
    }

    pub fn date_graph_columns(&self) -> Vec<String> {
        let mut cols = Vec::new();
        if let Some(y) = &self.y_primary {
            cols.push(y.clone());
        }
        if let Some(y) = &self.y_secondary {
            if Some(y) != self.y_primary.as_ref() {
                cols.push(y.clone());
            }
        }
        cols
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `dataset` is the per-session slot for the uploaded table: `None` until a
/// file is opened, replaced wholesale by each upload, and shared read-only
/// across all pages in between.
pub struct AppState {
    pub page: Page,
    pub dataset: Option<Table>,
    /// File name of the current upload, for the status line.
    pub source_name: Option<String>,
    pub inputs: PageInputs,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            dataset: None,
            source_name: None,
            inputs: PageInputs::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: replace the session slot atomically and
    /// reset every page input to its defaults for the new data.
    pub fn set_dataset(&mut self, table: Table, source_name: String) {
        self.inputs = PageInputs::for_table(&table);
        self.dataset = Some(table);
        self.source_name = Some(source_name);
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column, ColumnType};

    fn weather_table() -> Table {
        Table::new(vec![
            Column {
                name: "Date".into(),
                dtype: ColumnType::Date,
                values: vec![CellValue::Null; 4],
            },
            Column {
                name: "Station".into(),
                dtype: ColumnType::Text,
                values: vec![
                    CellValue::Text("Beta".into()),
                    CellValue::Text("Alpha".into()),
                    CellValue::Text("Beta".into()),
                    CellValue::Text("Alpha".into()),
                ],
            },
            Column {
                name: "MinTemp".into(),
                dtype: ColumnType::Float,
                values: vec![CellValue::Float(1.0); 4],
            },
            Column {
                name: "MaxTemp".into(),
                dtype: ColumnType::Float,
                values: vec![CellValue::Float(2.0); 4],
            },
        ])
    }

    #[test]
    fn defaults_follow_the_classified_columns() {
        let inputs = PageInputs::for_table(&weather_table());
        assert_eq!(inputs.selected_location, Some(CellValue::Text("Beta".into())));
        assert_eq!(inputs.hist_column.as_deref(), Some("MinTemp"));
        assert_eq!(inputs.y_primary.as_deref(), Some("MinTemp"));
        assert_eq!(inputs.y_secondary.as_deref(), Some("MaxTemp"));
        assert_eq!(inputs.row_limit, 4);
    }

    #[test]
    fn upload_replaces_the_slot_and_resets_inputs() {
        let mut state = AppState::default();
        state.inputs.bins = 77;
        state.set_dataset(weather_table(), "weather.csv".into());
        assert!(state.dataset.is_some());
        assert_eq!(state.inputs.bins, 20);
        assert_eq!(state.source_name.as_deref(), Some("weather.csv"));
    }

    #[test]
    fn row_window_clamps_to_the_displayed_table() {
        let inputs = PageInputs {
            row_limit: 100,
            ..PageInputs::default()
        };
        assert_eq!(inputs.row_window(30).limit, 30);
        assert_eq!(inputs.row_window(500).limit, 100);
    }

    #[test]
    fn duplicate_secondary_series_is_dropped() {
        let inputs = PageInputs {
            y_primary: Some("MinTemp".into()),
            y_secondary: Some("MinTemp".into()),
            ..PageInputs::default()
        };
        assert_eq!(inputs.date_graph_columns(), vec!["MinTemp".to_string()]);
    }
}
