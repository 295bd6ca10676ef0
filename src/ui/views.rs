use eframe::egui::{Color32, ProgressBar, Slider, TextEdit, Ui};

use molscout::analysis::Trainer;

use crate::color::drug_likeness_color;
use crate::state::ViewSession;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// Module views (central panel)
// ---------------------------------------------------------------------------

fn match_summary(ui: &mut Ui, visible: usize, total: usize) {
    ui.label(format!("{visible} of {total} molecules match the criteria"));
}

/// VAE generator: sample molecules, list and plot them.
pub fn generator(ui: &mut Ui, session: &mut ViewSession) {
    ui.heading("Variational Autoencoder – Molecule Generator");
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Latent dimensions: {}", session.generator.latent_dim));
        ui.add(Slider::new(&mut session.generator.temperature, 0.1..=2.0).text("Temperature"));
        if ui.button("Generate").clicked() {
            session.generate();
        }
    });
    ui.separator();

    if session.generated.is_empty() {
        ui.label("Press Generate to sample molecules from the latent space.");
        return;
    }
    match_summary(ui, session.visible_generated.len(), session.generated.len());
    table::record_table(
        ui,
        "generated_table",
        &session.generated,
        &session.visible_generated,
        |m| Some(drug_likeness_color(m.qed)),
    );
    ui.separator();

    let points: Vec<([f64; 2], Color32)> = session
        .visible_generated
        .iter()
        .filter_map(|&i| session.generated.get(i))
        .map(|m| ([m.molecular_weight, m.logp], drug_likeness_color(m.qed)))
        .collect();
    plot::property_scatter(ui, "generated_scatter", &points);
}

/// GAN trainer: start/pause/reset and live metric curves.
pub fn trainer(ui: &mut Ui, session: &mut ViewSession) {
    ui.heading("Generative Adversarial Network – Trainer");
    ui.horizontal(|ui: &mut Ui| {
        if session.training {
            if ui.button("Pause").clicked() {
                session.stop_training();
            }
        } else if ui.button("Start training").clicked() {
            session.start_training();
        }
        if ui.button("Reset").clicked() {
            session.reset_training();
        }
    });

    ui.add(ProgressBar::new(session.trainer.progress()).show_percentage());
    match session.history.last() {
        Some(m) => {
            ui.label(format!(
                "Epoch {}/{}   G loss {:.3}   D loss {:.3}   FID {:.1}",
                m.epoch,
                session.trainer.epochs(),
                m.generator_loss,
                m.discriminator_loss,
                m.fid
            ));
        }
        None => {
            ui.label("Not started.");
        }
    }
    ui.separator();

    plot::training_curves(ui, &session.history);
}

/// SMILES analyzer: paste strings, score them, list and plot the results.
pub fn analyzer(ui: &mut Ui, session: &mut ViewSession) {
    ui.heading("SMILES Structure Analyzer");
    ui.add(
        TextEdit::multiline(&mut session.smiles_input)
            .hint_text("One SMILES per line, e.g. CC(=O)Oc1ccccc1C(=O)O")
            .desired_rows(5)
            .desired_width(f32::INFINITY)
            .code_editor(),
    );
    if ui.button("Analyze").clicked() {
        session.analyze();
    }
    ui.separator();

    if session.analyses.is_empty() {
        return;
    }
    match_summary(ui, session.visible_analyses.len(), session.analyses.len());
    table::record_table(
        ui,
        "analysis_table",
        &session.analyses,
        &session.visible_analyses,
        |a| {
            if a.valid {
                Some(drug_likeness_color(a.drug_likeness))
            } else {
                Some(Color32::DARK_RED)
            }
        },
    );
    ui.separator();

    let points: Vec<([f64; 2], Color32)> = session
        .visible_analyses
        .iter()
        .filter_map(|&i| session.analyses.get(i))
        .filter(|a| a.valid)
        .map(|a| ([a.molecular_weight, a.logp], drug_likeness_color(a.drug_likeness)))
        .collect();
    plot::property_scatter(ui, "analysis_scatter", &points);
}

/// Batch screening: records loaded from a file.
pub fn batch(ui: &mut Ui, session: &mut ViewSession) {
    ui.heading("Batch Screening");
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Open batch file…").clicked() {
            panels::open_file_dialog(session);
        }
        if let Some(src) = &session.batch_source {
            ui.label(src.display().to_string());
        }
    });
    ui.separator();

    if session.batch.is_empty() {
        ui.label("Load a .parquet, .json or .csv file of molecule records.");
        return;
    }
    match_summary(ui, session.visible_batch.len(), session.batch.len());
    table::record_table(
        ui,
        "batch_table",
        &session.batch,
        &session.visible_batch,
        |r| r.drug_likeness_score.map(drug_likeness_color),
    );
    ui.separator();

    let points: Vec<([f64; 2], Color32)> = session
        .visible_batch
        .iter()
        .filter_map(|&i| session.batch.get(i))
        .filter_map(|r| {
            let logp = r.logp?;
            let color = r
                .drug_likeness_score
                .map_or(Color32::LIGHT_BLUE, drug_likeness_color);
            Some(([r.molecular_weight, logp], color))
        })
        .collect();
    plot::property_scatter(ui, "batch_scatter", &points);
}
