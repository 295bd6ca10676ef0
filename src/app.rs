use eframe::egui;

use molscout::config::AppConfig;

use crate::state::{ModuleTab, ViewSession};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MolScoutApp {
    pub session: ViewSession,
}

impl MolScoutApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: ViewSession::new(config),
        }
    }
}

impl eframe::App for MolScoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One training epoch per frame while the trainer runs.
        if self.session.tick_training() {
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar + module tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.session);
        });

        // ---- Left side panel: criteria + export ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session);
            });

        // ---- Central panel: active module ----
        egui::CentralPanel::default().show(ctx, |ui| match self.session.tab {
            ModuleTab::Generator => views::generator(ui, &mut self.session),
            ModuleTab::Trainer => views::trainer(ui, &mut self.session),
            ModuleTab::Analyzer => views::analyzer(ui, &mut self.session),
            ModuleTab::Batch => views::batch(ui, &mut self.session),
        });
    }
}
