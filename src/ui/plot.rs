use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use molscout::data::model::TrainingMetrics;

use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Property scatter (MW vs LogP)
// ---------------------------------------------------------------------------

/// Scatter of molecular weight against LogP, one coloured dot per molecule.
pub fn property_scatter(ui: &mut Ui, id: &str, points: &[([f64; 2], Color32)]) {
    Plot::new(id)
        .x_axis_label("Molecular weight (Da)")
        .y_axis_label("LogP")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &(point, color) in points {
                plot_ui.points(Points::new(vec![point]).radius(3.5).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Training curves
// ---------------------------------------------------------------------------

/// Loss curves on top, FID below.
pub fn training_curves(ui: &mut Ui, history: &[TrainingMetrics]) {
    let palette = generate_palette(3);
    let series = |f: fn(&TrainingMetrics) -> f64| -> PlotPoints {
        history.iter().map(|m| [m.epoch as f64, f(m)]).collect()
    };

    Plot::new("loss_plot")
        .legend(Legend::default())
        .height(ui.available_height() * 0.55)
        .x_axis_label("Epoch")
        .y_axis_label("Loss")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(series(|m| m.generator_loss))
                    .name("Generator loss")
                    .color(palette[0])
                    .width(1.5),
            );
            plot_ui.line(
                Line::new(series(|m| m.discriminator_loss))
                    .name("Discriminator loss")
                    .color(palette[1])
                    .width(1.5),
            );
        });

    Plot::new("fid_plot")
        .legend(Legend::default())
        .x_axis_label("Epoch")
        .y_axis_label("FID")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(series(|m| m.fid))
                    .name("FID")
                    .color(palette[2])
                    .width(1.5),
            );
        });
}
