use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::round2;
use crate::data::model::GeneratedMolecule;

/// Proposes new molecules.
pub trait MoleculeGenerator {
    fn generate(&mut self, count: usize) -> Vec<GeneratedMolecule>;
}

/// Small drug-like scaffolds the mock generator "decodes" into.
const SMILES_POOL: &[&str] = &[
    "CC(=O)Oc1ccccc1C(=O)O",
    "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
    "CC(C)Cc1ccc(cc1)C(C)C(=O)O",
    "CC(=O)Nc1ccc(O)cc1",
    "c1ccc2c(c1)cc[nH]2",
    "COc1ccc2[nH]cc(CCN)c2c1",
    "O=C(O)c1ccccc1O",
    "CCN(CC)CCOC(=O)c1ccc(N)cc1",
    "Clc1ccc(cc1)C(c1ccccc1)N1CCNCC1",
    "CC1=CC(=O)c2ccccc2C1=O",
    "NC(=O)c1cccnc1",
    "OC[C@H]1OC(O)[C@H](O)[C@@H](O)[C@@H]1O",
];

/// Placeholder for a variational-autoencoder sampler.
///
/// `temperature` scales the spread of the drawn properties around their
/// centre; `latent_dim` is reported in the UI only.
pub struct MockVaeGenerator {
    pub latent_dim: usize,
    pub temperature: f64,
    rng: StdRng,
}

impl MockVaeGenerator {
    pub fn new(seed: u64, latent_dim: usize, temperature: f64) -> Self {
        Self {
            latent_dim,
            temperature,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw of `centre ± half_width * temperature`.
    fn spread(&mut self, centre: f64, half_width: f64) -> f64 {
        let w = half_width * self.temperature.max(0.0);
        let (lo, hi) = (centre - w, centre + w);
        if w == 0.0 || !(hi - lo).is_finite() {
            return centre;
        }
        self.rng.gen_range(lo..hi)
    }

    fn sample(&mut self) -> GeneratedMolecule {
        let smiles = SMILES_POOL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("C")
            .to_string();
        GeneratedMolecule {
            smiles,
            molecular_weight: round2(self.spread(350.0, 150.0).max(16.0)),
            logp: round2(self.spread(2.0, 2.5)),
            hbd: self.rng.gen_range(0..=5),
            hba: self.rng.gen_range(1..=10),
            tpsa: round2(self.spread(80.0, 50.0).max(0.0)),
            qed: round2(self.rng.gen_range(0.3..0.95)),
            sa_score: round2(self.rng.gen_range(1.5..6.0)),
        }
    }
}

impl MoleculeGenerator for MockVaeGenerator {
    fn generate(&mut self, count: usize) -> Vec<GeneratedMolecule> {
        let molecules: Vec<GeneratedMolecule> = (0..count).map(|_| self.sample()).collect();
        log::info!(
            "VAE mock generated {} molecules (latent_dim={}, temperature={:.2})",
            molecules.len(),
            self.latent_dim,
            self.temperature
        );
        molecules
    }
}
