use eframe::egui::{self, Color32, ComboBox, DragValue, RichText, ScrollArea, Slider, Ui};

use crate::data::chart::{MAX_BINS, MIN_BINS};
use crate::data::classify::{classify, ColumnRoles};
use crate::data::filter::distinct_values;
use crate::data::loader::load_csv;
use crate::data::model::Table;
use crate::state::{AppState, Page, PageInputs};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(name)) = (&state.dataset, &state.source_name) {
            ui.label(format!(
                "{name}: {} rows × {} columns",
                table.n_rows(),
                table.n_cols()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Side panel – page selection and per-page controls
// ---------------------------------------------------------------------------

/// Render the left panel: page list, upload button, and the controls of
/// whichever page is active.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pages");
    ui.separator();
    for page in Page::ALL {
        ui.selectable_value(&mut state.page, page, page.title());
    }
    ui.separator();

    if ui.button("Open weather CSV…").clicked() {
        open_file_dialog(state);
    }
    ui.separator();

    let page = state.page;
    let AppState {
        dataset, inputs, ..
    } = state;
    let Some(table) = dataset.as_ref() else {
        ui.label("No weather data loaded.");
        return;
    };
    let roles = classify(table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match page {
            Page::Home | Page::Table => {}
            Page::Histogram => {
                location_control(ui, table, &roles, inputs);
                column_combo(ui, "hist_column", "Histogram column", &roles.numeric, &mut inputs.hist_column);
                ui.strong("Bins");
                ui.add(Slider::new(&mut inputs.bins, MIN_BINS..=MAX_BINS));
                row_limit_controls(ui, table, &roles, inputs);
            }
            Page::DateGraph => {
                location_control(ui, table, &roles, inputs);
                if let Some(date) = &inputs.date_column {
                    ui.strong("Date column");
                    ui.label(date.name.as_str());
                    ui.add_space(4.0);
                }
                column_combo(ui, "y_primary", "Y column 1", &roles.numeric, &mut inputs.y_primary);
                optional_column_combo(ui, "y_secondary", "Y column 2", &roles.numeric, &mut inputs.y_secondary);
                row_limit_controls(ui, table, &roles, inputs);
            }
            Page::WindDirection => {
                location_control(ui, table, &roles, inputs);
                column_combo(ui, "dir_column", "Wind gust direction column", &roles.wind_gust_dir, &mut inputs.dir_column);
                row_limit_controls(ui, table, &roles, inputs);
            }
            Page::Scatter => {
                location_control(ui, table, &roles, inputs);
                if roles.numeric.len() >= 2 {
                    column_combo(ui, "x_column", "X axis", &roles.numeric, &mut inputs.x_column);
                    column_combo(ui, "y_column", "Y axis", &roles.numeric, &mut inputs.y_column);
                }
                row_limit_controls(ui, table, &roles, inputs);
            }
        });
}

fn location_control(ui: &mut Ui, table: &Table, roles: &ColumnRoles, inputs: &mut PageInputs) {
    // No location column classified: the filter is skipped entirely.
    let Some(loc_col) = &roles.location else {
        return;
    };
    let domain = distinct_values(table, loc_col);
    if domain.is_empty() {
        return;
    }
    if !domain
        .iter()
        .any(|v| Some(v) == inputs.selected_location.as_ref())
    {
        inputs.selected_location = Some(domain[0].clone());
    }

    ui.strong(format!("Location ({loc_col})"));
    let current = inputs
        .selected_location
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
    ComboBox::from_id_salt("location")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for val in &domain {
                let is_selected = inputs.selected_location.as_ref() == Some(val);
                if ui.selectable_label(is_selected, val.to_string()).clicked() {
                    inputs.selected_location = Some(val.clone());
                }
            }
        });
    ui.add_space(4.0);
}

fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selected: &mut Option<String>,
) {
    if options.is_empty() {
        return;
    }
    if !options.iter().any(|o| Some(o) == selected.as_ref()) {
        *selected = Some(options[0].clone());
    }

    ui.strong(label);
    let current = selected.clone().unwrap_or_default();
    ComboBox::from_id_salt(id.to_string())
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                if ui
                    .selectable_label(selected.as_deref() == Some(opt.as_str()), opt)
                    .clicked()
                {
                    *selected = Some(opt.clone());
                }
            }
        });
    ui.add_space(4.0);
}

/// Like [`column_combo`], but with a "(none)" entry clearing the selection.
fn optional_column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selected: &mut Option<String>,
) {
    if options.is_empty() {
        return;
    }
    if let Some(sel) = selected.as_ref() {
        if !options.iter().any(|o| o == sel) {
            *selected = None;
        }
    }

    ui.strong(label);
    let current = selected.clone().unwrap_or_else(|| "(none)".to_string());
    ComboBox::from_id_salt(id.to_string())
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), "(none)").clicked() {
                *selected = None;
            }
            for opt in options {
                if ui
                    .selectable_label(selected.as_deref() == Some(opt.as_str()), opt)
                    .clicked()
                {
                    *selected = Some(opt.clone());
                }
            }
        });
    ui.add_space(4.0);
}

fn row_limit_controls(ui: &mut Ui, table: &Table, roles: &ColumnRoles, inputs: &mut PageInputs) {
    // The limit ranges over the rows left after location filtering.
    let max_rows = match (&roles.location, &inputs.selected_location) {
        (Some(col), Some(sel)) => table
            .column(col)
            .map(|c| c.values.iter().filter(|v| *v == sel).count())
            .unwrap_or_else(|| table.n_rows()),
        _ => table.n_rows(),
    };
    if max_rows == 0 {
        return;
    }

    ui.strong("Rows to display");
    ui.horizontal(|ui: &mut Ui| {
        ui.add(DragValue::new(&mut inputs.row_limit).range(1..=max_rows));
        ui.checkbox(&mut inputs.show_all_rows, "Show all rows");
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open weather data CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match load_csv(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows x {} columns from {}",
                    table.n_rows(),
                    table.n_cols(),
                    path.display()
                );
                let name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("upload")
                    .to_string();
                state.set_dataset(table, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
