use std::path::{Path, PathBuf};

use molscout::analysis::{
    MockAnalyzer, MockGanTrainer, MockVaeGenerator, MoleculeAnalyzer, MoleculeGenerator, Trainer,
};
use molscout::config::AppConfig;
use molscout::data::export::{self, ExportContext, ExportError};
use molscout::data::filter::{FilterCriteria, filtered_indices};
use molscout::data::model::{
    FlatRecord, GeneratedMolecule, MoleculeRecord, SmilesAnalysis, TrainingMetrics,
};

// ---------------------------------------------------------------------------
// View session
// ---------------------------------------------------------------------------

/// The AI module panel currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleTab {
    Generator,
    Trainer,
    Analyzer,
    Batch,
}

impl ModuleTab {
    pub const ALL: [ModuleTab; 4] = [
        ModuleTab::Generator,
        ModuleTab::Trainer,
        ModuleTab::Analyzer,
        ModuleTab::Batch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModuleTab::Generator => "VAE Generator",
            ModuleTab::Trainer => "GAN Trainer",
            ModuleTab::Analyzer => "SMILES Analyzer",
            ModuleTab::Batch => "Batch Screening",
        }
    }

    pub fn export_context(self) -> ExportContext {
        match self {
            ModuleTab::Generator => ExportContext::VaeGenerated,
            ModuleTab::Trainer => ExportContext::GanTraining,
            ModuleTab::Analyzer => ExportContext::SmilesAnalysis,
            ModuleTab::Batch => ExportContext::Batch,
        }
    }
}

/// Notification shown in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

/// All interactive state, independent of rendering.
pub struct ViewSession {
    pub config: AppConfig,
    pub tab: ModuleTab,

    /// Criteria being edited in the side panel.
    pub criteria_draft: FilterCriteria,
    /// Criteria last applied to the result lists.
    pub criteria: FilterCriteria,

    pub generator: MockVaeGenerator,
    pub generated: Vec<GeneratedMolecule>,
    pub visible_generated: Vec<usize>,

    pub trainer: MockGanTrainer,
    pub training: bool,
    pub history: Vec<TrainingMetrics>,

    pub analyzer: MockAnalyzer,
    pub smiles_input: String,
    pub analyses: Vec<SmilesAnalysis>,
    pub visible_analyses: Vec<usize>,

    pub batch: Vec<MoleculeRecord>,
    pub visible_batch: Vec<usize>,
    pub batch_source: Option<PathBuf>,

    pub status: Option<Status>,
}

impl ViewSession {
    pub fn new(config: AppConfig) -> Self {
        Self {
            generator: MockVaeGenerator::new(config.seed, config.latent_dim, config.temperature),
            trainer: MockGanTrainer::new(config.seed, config.training_epochs),
            analyzer: MockAnalyzer::new(config.seed),
            config,
            tab: ModuleTab::Generator,
            criteria_draft: FilterCriteria::default(),
            criteria: FilterCriteria::default(),
            generated: Vec::new(),
            visible_generated: Vec::new(),
            training: false,
            history: Vec::new(),
            smiles_input: String::new(),
            analyses: Vec::new(),
            visible_analyses: Vec::new(),
            batch: Vec::new(),
            visible_batch: Vec::new(),
            batch_source: None,
            status: None,
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: true,
        });
    }

    // -- criteria --

    /// Commit the draft criteria and recompute every visible list.
    pub fn apply_criteria(&mut self) {
        self.criteria = self.criteria_draft;
        self.refilter();
    }

    /// Restore the match-everything criteria.
    pub fn reset_criteria(&mut self) {
        self.criteria_draft = FilterCriteria::default();
        self.apply_criteria();
    }

    /// Recompute visible indices after a criteria or data change.
    pub fn refilter(&mut self) {
        self.visible_generated = filtered_indices(&self.generated, &self.criteria);
        self.visible_analyses = filtered_indices(&self.analyses, &self.criteria);
        self.visible_batch = filtered_indices(&self.batch, &self.criteria);
    }

    // -- AI modules --

    pub fn generate(&mut self) {
        self.generated = self.generator.generate(self.config.generated_batch);
        self.visible_generated = filtered_indices(&self.generated, &self.criteria);
        self.info(format!("Generated {} molecules", self.generated.len()));
    }

    pub fn analyze(&mut self) {
        self.analyses = self.analyzer.analyze_batch(&self.smiles_input);
        self.visible_analyses = filtered_indices(&self.analyses, &self.criteria);
        let invalid = self.analyses.iter().filter(|a| !a.valid).count();
        if self.analyses.is_empty() {
            self.error("Enter at least one SMILES string");
        } else {
            self.info(format!(
                "Analyzed {} SMILES ({invalid} invalid)",
                self.analyses.len()
            ));
        }
    }

    pub fn start_training(&mut self) {
        if self.trainer.is_finished() {
            self.reset_training();
        }
        self.training = true;
    }

    pub fn stop_training(&mut self) {
        self.training = false;
    }

    pub fn reset_training(&mut self) {
        self.trainer.reset();
        self.history.clear();
        self.training = false;
    }

    /// Advance training by one epoch. Returns whether it is still running.
    pub fn tick_training(&mut self) -> bool {
        if !self.training {
            return false;
        }
        match self.trainer.step() {
            Some(metrics) => self.history.push(metrics),
            None => self.training = false,
        }
        if self.trainer.is_finished() && self.training {
            self.training = false;
            self.info(format!("Training complete ({} epochs)", self.history.len()));
        }
        self.training
    }

    // -- batch --

    /// Ingest a newly loaded batch and filter it with the current criteria.
    pub fn set_batch(&mut self, records: Vec<MoleculeRecord>, source: PathBuf) {
        self.visible_batch = filtered_indices(&records, &self.criteria);
        self.info(format!(
            "Loaded {} molecules from {}",
            records.len(),
            source.display()
        ));
        self.batch = records;
        self.batch_source = Some(source);
    }

    // -- export --

    /// Serialize the visible rows of the active tab.
    pub fn export_text(&self) -> Result<String, ExportError> {
        match self.tab {
            ModuleTab::Generator => export::serialize(&pick(&self.generated, &self.visible_generated)),
            ModuleTab::Trainer => export::serialize(&self.history),
            ModuleTab::Analyzer => export::serialize(&pick(&self.analyses, &self.visible_analyses)),
            ModuleTab::Batch => export::serialize(&pick(&self.batch, &self.visible_batch)),
        }
    }

    /// Write the visible rows of the active tab to `path`, reporting the
    /// outcome as a status message.
    pub fn export_to(&mut self, path: &Path) -> Result<(), ExportError> {
        let result = match self.tab {
            ModuleTab::Generator => {
                export::export_file(path, &pick(&self.generated, &self.visible_generated))
            }
            ModuleTab::Trainer => export::export_file(path, &self.history),
            ModuleTab::Analyzer => {
                export::export_file(path, &pick(&self.analyses, &self.visible_analyses))
            }
            ModuleTab::Batch => export::export_file(path, &pick(&self.batch, &self.visible_batch)),
        };
        match &result {
            Ok(()) => {
                self.info(format!("Saved {}", path.display()));
            }
            Err(ExportError::EmptyExport) => {
                log::warn!("Nothing to export for {}", self.tab.label());
                self.error(ExportError::EmptyExport.to_string());
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.error("Export failed, please try again");
            }
        }
        result
    }
}

/// Clone the rows at `indices`, in order.
fn pick<R: FlatRecord + Clone>(records: &[R], indices: &[usize]) -> Vec<R> {
    indices.iter().filter_map(|&i| records.get(i).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use molscout::data::filter::Bounds;

    fn session() -> ViewSession {
        ViewSession::new(AppConfig {
            training_epochs: 5,
            ..AppConfig::default()
        })
    }

    #[test]
    fn applying_criteria_narrows_generated_list_without_touching_it() {
        let mut s = session();
        s.generate();
        let total = s.generated.len();
        assert_eq!(s.visible_generated.len(), total);

        s.criteria_draft.mw_range = Bounds::new(500.0, 100.0);
        s.apply_criteria();
        assert!(s.visible_generated.is_empty());
        assert_eq!(s.generated.len(), total);

        s.reset_criteria();
        assert_eq!(s.visible_generated.len(), total);
    }

    #[test]
    fn draft_is_not_applied_until_asked() {
        let mut s = session();
        s.generate();
        s.criteria_draft.mw_range = Bounds::new(500.0, 100.0);
        assert_eq!(s.visible_generated.len(), s.generated.len());
    }

    #[test]
    fn empty_tab_export_reports_no_data() {
        let mut s = session();
        s.tab = ModuleTab::Analyzer;
        assert!(matches!(s.export_text(), Err(ExportError::EmptyExport)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(s.tab.export_context().file_name());
        assert!(s.export_to(&path).is_err());
        assert!(!path.exists());
        assert_eq!(s.status.as_ref().map(|st| st.text.as_str()), Some("No data to export"));
    }

    #[test]
    fn analyzer_export_contains_only_visible_rows() {
        let mut s = session();
        s.tab = ModuleTab::Analyzer;
        s.smiles_input = "CCO\nCCN\nc1ccccc1".into();
        s.analyze();
        s.visible_analyses = vec![2];
        let text = s.export_text().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("SMILES,Valid,MolecularWeight"));
        assert!(lines[1].starts_with("c1ccccc1,true,"));
    }

    #[test]
    fn training_runs_to_completion_and_stops() {
        let mut s = session();
        s.start_training();
        let mut ticks = 0;
        while s.tick_training() {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(s.history.len(), 5);
        assert!(!s.training);

        // Starting again after completion restarts from epoch 0.
        s.start_training();
        assert!(s.history.is_empty());
        assert!(s.training);
    }

    #[test]
    fn blank_analyzer_input_is_reported() {
        let mut s = session();
        s.smiles_input = "  \n".into();
        s.analyze();
        assert!(s.analyses.is_empty());
        assert!(s.status.as_ref().is_some_and(|st| st.is_error));
    }
}
