use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::round2;
use crate::data::model::SmilesAnalysis;

/// Scores SMILES strings.
pub trait MoleculeAnalyzer {
    fn analyze(&mut self, smiles: &str) -> SmilesAnalysis;

    /// Analyze one SMILES per line. Blank lines are skipped and order is kept.
    fn analyze_batch(&mut self, input: &str) -> Vec<SmilesAnalysis> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.analyze(line))
            .collect()
    }
}

/// Count Rule-of-Five violations: MW > 500, LogP > 5, HBD > 5, heteroatoms > 10.
pub fn lipinski_violations(mw: f64, logp: f64, hbd: u32, heteroatoms: u32) -> u8 {
    let mut violations = 0u8;
    if mw > 500.0 {
        violations += 1;
    }
    if logp > 5.0 {
        violations += 1;
    }
    if hbd > 5 {
        violations += 1;
    }
    if heteroatoms > 10 {
        violations += 1;
    }
    violations
}

/// Placeholder analyzer: random descriptors for any well-formed token.
///
/// No structure parsing happens; a SMILES is "valid" when it is a non-empty
/// token without whitespace.
pub struct MockAnalyzer {
    rng: StdRng,
}

impl MockAnalyzer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoleculeAnalyzer for MockAnalyzer {
    fn analyze(&mut self, smiles: &str) -> SmilesAnalysis {
        let smiles = smiles.trim();
        let valid = !smiles.is_empty() && !smiles.chars().any(char::is_whitespace);
        if !valid {
            log::debug!("rejecting malformed SMILES {smiles:?}");
            return SmilesAnalysis {
                smiles: smiles.to_string(),
                valid: false,
                molecular_weight: 0.0,
                logp: 0.0,
                tpsa: 0.0,
                hbd: 0,
                heteroatoms: 0,
                lipinski_violations: 0,
                drug_likeness: 0.0,
            };
        }

        let molecular_weight = round2(self.rng.gen_range(150.0..650.0));
        let logp = round2(self.rng.gen_range(-2.0..6.0));
        let tpsa = round2(self.rng.gen_range(20.0..160.0));
        let hbd = self.rng.gen_range(0..=6);
        let heteroatoms = self.rng.gen_range(1..=15);
        let drug_likeness = round2(self.rng.gen_range(0.0..1.0));

        SmilesAnalysis {
            smiles: smiles.to_string(),
            valid: true,
            molecular_weight,
            logp,
            tpsa,
            hbd,
            heteroatoms,
            lipinski_violations: lipinski_violations(molecular_weight, logp, hbd, heteroatoms),
            drug_likeness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_results() {
        let input = "CCO\nc1ccccc1\nCC(=O)O";
        let a = MockAnalyzer::new(7).analyze_batch(input);
        let b = MockAnalyzer::new(7).analyze_batch(input);
        assert_eq!(a, b);
    }

    #[test]
    fn batch_skips_blank_lines_and_keeps_order() {
        let out = MockAnalyzer::new(1).analyze_batch("  CCO \n\n\t\nCCN\n");
        let smiles: Vec<&str> = out.iter().map(|a| a.smiles.as_str()).collect();
        assert_eq!(smiles, ["CCO", "CCN"]);
    }

    #[test]
    fn whitespace_inside_token_is_invalid() {
        let a = MockAnalyzer::new(1).analyze("C C");
        assert!(!a.valid);
        assert_eq!(a.molecular_weight, 0.0);
        assert_eq!(a.lipinski_violations, 0);
    }

    #[test]
    fn valid_results_stay_in_range() {
        let mut analyzer = MockAnalyzer::new(99);
        for _ in 0..200 {
            let a = analyzer.analyze("CCO");
            assert!(a.valid);
            assert!((150.0..=650.0).contains(&a.molecular_weight));
            assert!((0.0..=1.0).contains(&a.drug_likeness));
            assert!(a.lipinski_violations <= 4);
            assert_eq!(
                a.lipinski_violations,
                lipinski_violations(a.molecular_weight, a.logp, a.hbd, a.heteroatoms)
            );
        }
    }

    #[test]
    fn lipinski_counts_each_rule() {
        assert_eq!(lipinski_violations(180.0, 1.2, 1, 4), 0);
        assert_eq!(lipinski_violations(501.0, 5.1, 6, 11), 4);
        assert_eq!(lipinski_violations(500.0, 5.0, 5, 10), 0);
    }
}
