use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::generate_palette;
use crate::data::chart::{
    date_to_days, days_to_date, direction_frequency, histogram, time_series, xy_series,
    COMPASS_ORDER,
};
use crate::data::classify::{classify, coerce_dates, ColumnRole, ColumnRoles};
use crate::data::error::DataError;
use crate::data::filter::{filter_by_location, limit_rows};
use crate::data::model::Table;
use crate::state::{Page, PageInputs};

// ---------------------------------------------------------------------------
// Central panel – page dispatch
// ---------------------------------------------------------------------------

/// Render the active page. Each interaction re-runs the whole pipeline
/// (classify → filter → limit → reduce) against the immutable table; the
/// page output is a pure function of `(page, table, inputs)`.
pub fn central_panel(ui: &mut Ui, page: Page, dataset: Option<&Table>, inputs: &PageInputs) {
    if page == Page::Home {
        home(ui, dataset.is_some());
        return;
    }

    let Some(table) = dataset else {
        show_data_error(ui, &DataError::NoDataLoaded);
        return;
    };

    ui.heading(page.title());
    ui.add_space(4.0);

    let result = match page {
        Page::Home => Ok(()),
        Page::Table => {
            table_page(ui, table);
            Ok(())
        }
        Page::Histogram => histogram_page(ui, table, inputs),
        Page::DateGraph => date_graph_page(ui, table, inputs),
        Page::WindDirection => wind_direction_page(ui, table, inputs),
        Page::Scatter => scatter_page(ui, table, inputs),
    };
    if let Err(e) = result {
        show_data_error(ui, &e);
    }
}

fn home(ui: &mut Ui, loaded: bool) {
    ui.heading("Weather Data CSV File Viewer");
    ui.add_space(8.0);
    if loaded {
        ui.label("Weather data CSV file uploaded successfully.");
    } else {
        ui.label("Please upload a weather data CSV file to display its contents.");
    }
}

/// Map a data-layer failure to the right kind of message. Nothing here is
/// fatal: the rest of the page and every other page stay usable.
fn show_data_error(ui: &mut Ui, err: &DataError) {
    match err {
        DataError::NoDataLoaded => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(err.to_string());
            });
        }
        DataError::NoApplicableColumns(_) => {
            ui.label(RichText::new(err.to_string()).color(Color32::YELLOW));
        }
        _ => {
            ui.label(RichText::new(err.to_string()).color(Color32::RED));
        }
    }
}

/// Narrow to the selected location when one is classified; tables without a
/// location column pass through unchanged.
pub(crate) fn apply_location(
    table: &Table,
    roles: &ColumnRoles,
    inputs: &PageInputs,
) -> Result<Table, DataError> {
    match (&roles.location, &inputs.selected_location) {
        (Some(col), Some(sel)) => filter_by_location(table, col, sel),
        _ => Ok(table.clone()),
    }
}

fn empty_note(ui: &mut Ui) {
    ui.label("The table has no rows to display.");
}

// ---------------------------------------------------------------------------
// Table page
// ---------------------------------------------------------------------------

fn role_label(role: ColumnRole) -> &'static str {
    match role {
        ColumnRole::Location => "location",
        ColumnRole::Date => "date",
        ColumnRole::WindGustDirection => "wind gust direction",
        ColumnRole::Numeric => "numeric",
        ColumnRole::Unclassified => "unclassified",
    }
}

fn table_page(ui: &mut Ui, table: &Table) {
    let roles = classify(table);
    ui.label(format!(
        "{} rows × {} columns",
        table.n_rows(),
        table.n_cols()
    ));
    ui.add_space(4.0);

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(GridColumn::auto().at_least(80.0).clip(true), table.n_cols())
            .header(20.0, |mut header| {
                for col in table.columns() {
                    header.col(|ui| {
                        ui.strong(col.name.as_str())
                            .on_hover_text(role_label(roles.role_of(&col.name)));
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.n_rows(), |mut row| {
                    let r = row.index();
                    for col in table.columns() {
                        row.col(|ui| {
                            ui.label(col.values[r].to_string());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Histogram page
// ---------------------------------------------------------------------------

fn histogram_page(ui: &mut Ui, table: &Table, inputs: &PageInputs) -> Result<(), DataError> {
    let roles = classify(table);
    if roles.numeric.is_empty() {
        return Err(DataError::NoApplicableColumns("numeric"));
    }
    if table.is_empty() {
        empty_note(ui);
        return Ok(());
    }
    let column = match &inputs.hist_column {
        Some(c) => c.clone(),
        None => roles.numeric[0].clone(),
    };

    let filtered = apply_location(table, &roles, inputs)?;
    let limited = limit_rows(&filtered, inputs.row_window(filtered.n_rows()))?;
    let bins = histogram(&limited, &column, inputs.bins)?;
    if bins.is_empty() {
        ui.label("No values to bin in the current selection.");
        return Ok(());
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                .width(b.upper - b.lower)
                .name(format!("{:.2} to {:.2}", b.lower, b.upper))
        })
        .collect();
    let color = generate_palette(1)[0];
    let chart = BarChart::new(bars).color(color).name(&column);

    Plot::new("histogram")
        .legend(Legend::default())
        .x_axis_label(column)
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
    Ok(())
}

// ---------------------------------------------------------------------------
// Date graph page
// ---------------------------------------------------------------------------

fn date_graph_page(ui: &mut Ui, table: &Table, inputs: &PageInputs) -> Result<(), DataError> {
    let roles = classify(table);
    let date = roles
        .date
        .clone()
        .ok_or(DataError::NoApplicableColumns("date"))?;
    if roles.numeric.is_empty() {
        return Err(DataError::NoApplicableColumns("numeric"));
    }
    if table.is_empty() {
        empty_note(ui);
        return Ok(());
    }
    let y_columns = inputs.date_graph_columns();
    if y_columns.is_empty() {
        ui.label("Please select at least one data column to plot.");
        return Ok(());
    }

    let filtered = apply_location(table, &roles, inputs)?;
    let coerced = if date.needs_coercion {
        coerce_dates(&filtered, &date.name)
    } else {
        filtered
    };
    let limited = limit_rows(&coerced, inputs.row_window(coerced.n_rows()))?;
    let series = time_series(&limited, &date.name, &y_columns)?;

    let colors = generate_palette(series.series_names.len());
    Plot::new("date_graph")
        .legend(Legend::default())
        .x_axis_label(date.name.clone())
        .x_axis_formatter(|mark, _range| {
            days_to_date(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (si, name) in series.series_names.iter().enumerate() {
                // Points without a plottable date stay in the reduction but
                // have no x position, so the chart omits them.
                let points: PlotPoints = series
                    .points
                    .iter()
                    .filter_map(|p| Some([date_to_days(p.date?), p.values[si]?]))
                    .collect();
                plot_ui.line(Line::new(points).name(name).color(colors[si]).width(1.5));
            }
        });
    Ok(())
}

// ---------------------------------------------------------------------------
// Wind direction page
// ---------------------------------------------------------------------------

fn compass_label(v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() < 0.01 && (0.0..16.0).contains(&idx) {
        COMPASS_ORDER[idx as usize].to_string()
    } else {
        String::new()
    }
}

fn wind_direction_page(ui: &mut Ui, table: &Table, inputs: &PageInputs) -> Result<(), DataError> {
    let roles = classify(table);
    let column = inputs
        .dir_column
        .clone()
        .or_else(|| roles.wind_gust_dir.first().cloned())
        .ok_or(DataError::NoApplicableColumns("wind gust direction"))?;
    if table.is_empty() {
        empty_note(ui);
        return Ok(());
    }

    let filtered = apply_location(table, &roles, inputs)?;
    let limited = limit_rows(&filtered, inputs.row_window(filtered.n_rows()))?;
    let freq = direction_frequency(&limited, &column)?;

    let bars: Vec<Bar> = freq
        .iter()
        .enumerate()
        .map(|(i, d)| Bar::new(i as f64, d.count as f64).width(0.7).name(d.direction))
        .collect();
    let color = generate_palette(1)[0];
    let chart = BarChart::new(bars).color(color).name(&column);

    Plot::new("wind_direction")
        .legend(Legend::default())
        .x_axis_label(column)
        .y_axis_label("Count")
        .x_axis_formatter(|mark, _range| compass_label(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
    Ok(())
}

// ---------------------------------------------------------------------------
// Scatter page
// ---------------------------------------------------------------------------

fn scatter_page(ui: &mut Ui, table: &Table, inputs: &PageInputs) -> Result<(), DataError> {
    let roles = classify(table);
    if roles.numeric.is_empty() {
        return Err(DataError::NoApplicableColumns("numeric"));
    }
    if table.is_empty() {
        empty_note(ui);
        return Ok(());
    }

    let filtered = apply_location(table, &roles, inputs)?;
    let limited = limit_rows(&filtered, inputs.row_window(filtered.n_rows()))?;

    let series = if roles.numeric.len() >= 2 {
        let x = inputs
            .x_column
            .clone()
            .unwrap_or_else(|| roles.numeric[0].clone());
        let y = inputs
            .y_column
            .clone()
            .unwrap_or_else(|| roles.numeric[1].clone());
        xy_series(&limited, Some(&x), &y)?
    } else {
        // Only one numeric column in the whole table: single-series line
        // over the row index.
        ui.label("Only one numeric column found; plotting it over the row index.");
        xy_series(&limited, None, &roles.numeric[0])?
    };

    let color = generate_palette(1)[0];
    Plot::new("scatter")
        .legend(Legend::default())
        .x_axis_label(series.x_label.clone())
        .y_axis_label(series.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::new(series.points.clone()))
                    .name(&series.y_label)
                    .color(color)
                    .width(1.5),
            );
        });
    Ok(())
}
