use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use molscout::data::export::ExportError;
use molscout::data::filter::Bounds;

use crate::state::{ModuleTab, ViewSession};

// ---------------------------------------------------------------------------
// Left side panel – criteria widgets
// ---------------------------------------------------------------------------

/// Render the left criteria panel.
pub fn side_panel(ui: &mut Ui, session: &mut ViewSession) {
    ui.heading("Property Filter");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let draft = &mut session.criteria_draft;

            bounds_sliders(ui, "Molecular weight", &mut draft.mw_range, 0.0..=1000.0);
            bounds_sliders(ui, "LogP", &mut draft.logp_range, -5.0..=5.0);
            bounds_sliders(ui, "TPSA", &mut draft.tpsa_range, 0.0..=200.0);

            ui.strong("Counts");
            ui.add(Slider::new(&mut draft.hbd_max, 0..=10).text("HBD max"));
            ui.add(Slider::new(&mut draft.hba_max, 0..=20).text("HBA max"));
            ui.separator();

            ui.strong("Drug-likeness");
            ui.add(Slider::new(&mut draft.qed_min, 0.0..=1.0).text("QED min"));
            ui.checkbox(&mut draft.lipinski_compliant, "Lipinski compliant only");
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply").clicked() {
                    session.apply_criteria();
                }
                if ui.button("Reset").clicked() {
                    session.reset_criteria();
                }
            });

            ui.add_space(8.0);
            if ui.button("Export CSV…").clicked() {
                export_dialog(session);
            }
        });
}

/// Min/max slider pair for one range criterion.
fn bounds_sliders(
    ui: &mut Ui,
    label: &str,
    bounds: &mut Bounds,
    range: std::ops::RangeInclusive<f64>,
) {
    ui.strong(label);
    ui.add(Slider::new(&mut bounds.min, range.clone()).text("min"));
    ui.add(Slider::new(&mut bounds.max, range).text("max"));
    if bounds.min > bounds.max {
        ui.label(RichText::new("min > max: nothing will match").color(Color32::YELLOW));
    }
    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, module tabs and status line.
pub fn top_bar(ui: &mut Ui, session: &mut ViewSession) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open batch…").clicked() {
                open_file_dialog(session);
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                export_dialog(session);
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in ModuleTab::ALL {
            if ui.selectable_label(session.tab == tab, tab.label()).clicked() {
                session.tab = tab;
            }
        }

        ui.separator();

        if let Some(status) = &session.status {
            let color = if status.is_error {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(session: &mut ViewSession) {
    let file = rfd::FileDialog::new()
        .set_title("Open molecule batch")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match molscout::data::loader::load_file(&path) {
            Ok(records) => {
                log::info!("Loaded {} molecules from {}", records.len(), path.display());
                session.set_batch(records, path);
                session.tab = ModuleTab::Batch;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                session.error(format!("Error: {e:#}"));
            }
        }
    }
}

/// Ask where to save the active tab's visible rows and write them.
pub fn export_dialog(session: &mut ViewSession) {
    if let Err(ExportError::EmptyExport) = session.export_text() {
        session.error(ExportError::EmptyExport.to_string());
        return;
    }

    let context = session.tab.export_context();
    let file = rfd::FileDialog::new()
        .set_title("Export results")
        .set_file_name(context.file_name())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        // The outcome is reported through the session status.
        let _ = session.export_to(&path);
    }
}
