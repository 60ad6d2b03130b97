use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::LineSelection;
use crate::export;
use crate::state::AppState;

const ABOUT_TEXT: &str = "The growth of supermarkets in most populated cities is increasing \
and market competition is high as well. This dashboard turns the store's sales records \
into readable figures and a chart.";

// ---------------------------------------------------------------------------
// Left side panel – about text and product line selector
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("About the dataset");
    ui.separator();
    ui.label(ABOUT_TEXT);
    ui.add_space(12.0);

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Collect first so the selection can change inside the combo box.
    let options = dataset.selector_options();
    let current = state.selection.clone();
    let mut chosen = None;

    ui.strong("Product line");
    egui::ComboBox::from_id_salt("product_line")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                let mut text = RichText::new(option.to_string());
                if let (LineSelection::Line(_), Some(cm)) = (option, &state.color_map) {
                    text = text.color(cm.color_for(option));
                }
                if ui.selectable_label(*option == current, text).clicked() {
                    chosen = Some(option.clone());
                }
            }
        });

    if let Some(selection) = chosen {
        log::debug!("Product line selected: {selection}");
        state.select(selection);
    }
}

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
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(dash)) = (&state.dataset, &state.dashboard) {
            ui.label(format!(
                "{} invoices loaded, {} shown",
                ds.len(),
                dash.summary.total_invoices
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Hero and footer
// ---------------------------------------------------------------------------

pub fn hero(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(8.0);
        ui.label(RichText::new("Super Store DATA").size(32.0).strong());
        ui.add_space(8.0);
    });
}

pub fn footer(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        let source = state
            .dataset_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no file".to_string());
        ui.label(RichText::new(format!("Data source: {source}")).weak());
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "tsv", "txt", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("TSV", &["tsv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(dashboard) = state.dashboard.clone() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard")
        .add_filter("JSON", &["json"])
        .set_file_name("dashboard.json")
        .save_file();

    if let Some(path) = file {
        match export::write_json(&dashboard, &path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export dashboard: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
