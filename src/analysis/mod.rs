//! Mock AI modules.
//!
//! The generator, trainer and analyzer stand in for a real modelling backend.
//! Each draws its numbers from an injected, seedable RNG so that runs (and
//! tests) are reproducible, and each sits behind a trait so a real
//! implementation can replace it without touching the filter or exporter.

pub mod analyzer;
pub mod generator;
pub mod trainer;

pub use analyzer::{MockAnalyzer, MoleculeAnalyzer};
pub use generator::{MockVaeGenerator, MoleculeGenerator};
pub use trainer::{MockGanTrainer, Trainer};

/// Round to two decimals, the precision the panels display and export.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
