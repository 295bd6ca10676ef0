use serde::{Deserialize, Serialize};

use super::model::{GeneratedMolecule, MoleculeRecord, SmilesAnalysis};

/// Highest Lipinski violation count a record can carry (four rules).
pub const MAX_LIPINSKI_VIOLATIONS: u8 = 4;

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Inclusive numeric range. Endpoints are kept exactly as given: an inverted
/// range (`min > max`) contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// User-supplied screening criteria, rebuilt on every "apply".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub mw_range: Bounds,
    pub logp_range: Bounds,
    pub hbd_max: i64,
    pub hba_max: i64,
    pub tpsa_range: Bounds,
    pub lipinski_compliant: bool,
    pub qed_min: f64,
    /// Carried for the UI; no predicate clause reads it.
    pub sas_max: f64,
}

impl Default for FilterCriteria {
    /// The reset state, which lets every in-bounds record through.
    fn default() -> Self {
        Self {
            mw_range: Bounds::new(0.0, 1000.0),
            logp_range: Bounds::new(-5.0, 5.0),
            hbd_max: 10,
            hba_max: 20,
            tpsa_range: Bounds::new(0.0, 200.0),
            lipinski_compliant: false,
            qed_min: 0.0,
            sas_max: 10.0,
        }
    }
}

impl FilterCriteria {
    /// Violations tolerated: none when compliance is required, otherwise all four.
    pub fn max_lipinski_violations(&self) -> u8 {
        if self.lipinski_compliant {
            0
        } else {
            MAX_LIPINSKI_VIOLATIONS
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles: how a result type maps onto the screening descriptors
// ---------------------------------------------------------------------------

/// Names which field mapping a result type uses when it is screened.
///
/// This is a tag only: it appears in log output and lets callers tell the
/// mappings apart. The mapping itself is each [`Screenable::descriptors`]
/// impl, so adding a result type means writing that impl and picking a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterProfile {
    /// Generator output and loaded records: acceptors read directly, and a
    /// Lipinski count only when the record carries one.
    Generator,
    /// Analyzer output: heteroatom count stands in for acceptors, and the
    /// Lipinski violation count is checked.
    Analyzer,
}

/// Numeric view of a record, as read by the predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptors {
    pub molecular_weight: f64,
    pub logp: Option<f64>,
    pub hbd: Option<u32>,
    pub hba: u32,
    pub tpsa: Option<f64>,
    pub drug_likeness: Option<f64>,
    pub lipinski_violations: Option<u8>,
}

/// A record type the property filter can screen.
pub trait Screenable {
    /// Tag for the mapping [`Screenable::descriptors`] implements.
    const PROFILE: FilterProfile;

    fn descriptors(&self) -> Descriptors;
}

impl Screenable for MoleculeRecord {
    const PROFILE: FilterProfile = FilterProfile::Generator;

    fn descriptors(&self) -> Descriptors {
        Descriptors {
            molecular_weight: self.molecular_weight,
            logp: self.logp,
            hbd: self.hydrogen_bond_donors,
            hba: self.hydrogen_bond_acceptors,
            tpsa: self.tpsa,
            drug_likeness: self.drug_likeness_score,
            lipinski_violations: self.lipinski_violation_count,
        }
    }
}

impl Screenable for GeneratedMolecule {
    const PROFILE: FilterProfile = FilterProfile::Generator;

    fn descriptors(&self) -> Descriptors {
        Descriptors {
            molecular_weight: self.molecular_weight,
            logp: Some(self.logp),
            hbd: Some(self.hbd),
            hba: self.hba,
            tpsa: Some(self.tpsa),
            drug_likeness: Some(self.qed),
            lipinski_violations: None,
        }
    }
}

impl Screenable for SmilesAnalysis {
    const PROFILE: FilterProfile = FilterProfile::Analyzer;

    fn descriptors(&self) -> Descriptors {
        Descriptors {
            molecular_weight: self.molecular_weight,
            logp: Some(self.logp),
            hbd: Some(self.hbd),
            hba: self.heteroatoms,
            tpsa: Some(self.tpsa),
            drug_likeness: Some(self.drug_likeness),
            lipinski_violations: Some(self.lipinski_violations),
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Whether a record's descriptors satisfy every criterion.
///
/// Absent optional descriptors are not checked. `molecular_weight` and
/// `hba` are always checked.
pub fn matches(d: &Descriptors, criteria: &FilterCriteria) -> bool {
    if !criteria.mw_range.contains(d.molecular_weight) {
        return false;
    }
    if let Some(logp) = d.logp {
        if !criteria.logp_range.contains(logp) {
            return false;
        }
    }
    if let Some(hbd) = d.hbd {
        if i64::from(hbd) > criteria.hbd_max {
            return false;
        }
    }
    if i64::from(d.hba) > criteria.hba_max {
        return false;
    }
    if let Some(tpsa) = d.tpsa {
        if !criteria.tpsa_range.contains(tpsa) {
            return false;
        }
    }
    if let Some(qed) = d.drug_likeness {
        // NaN fails here too
        if !(qed >= criteria.qed_min) {
            return false;
        }
    }
    if let Some(violations) = d.lipinski_violations {
        if violations > criteria.max_lipinski_violations() {
            return false;
        }
    }
    true
}

/// Return indices of records that pass the criteria, in input order.
pub fn filtered_indices<R: Screenable>(records: &[R], criteria: &FilterCriteria) -> Vec<usize> {
    let indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(&r.descriptors(), criteria))
        .map(|(i, _)| i)
        .collect();
    log::debug!(
        "{:?} filter kept {} of {} records",
        R::PROFILE,
        indices.len(),
        records.len()
    );
    indices
}

/// Return a new list of the matching records. `records` is left untouched.
pub fn apply<R: Screenable + Clone>(records: &[R], criteria: &FilterCriteria) -> Vec<R> {
    filtered_indices(records, criteria)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, mw: f64) -> MoleculeRecord {
        MoleculeRecord::new(id, mw)
    }

    fn analysis(smiles: &str, violations: u8) -> SmilesAnalysis {
        SmilesAnalysis {
            smiles: smiles.to_string(),
            valid: true,
            molecular_weight: 300.0,
            logp: 2.0,
            tpsa: 60.0,
            hbd: 1,
            heteroatoms: 4,
            lipinski_violations: violations,
            drug_likeness: 0.6,
        }
    }

    fn ids(records: &[MoleculeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.identifier.as_str()).collect()
    }

    #[test]
    fn default_criteria_keep_in_bounds_records_in_order() {
        let records = vec![
            MoleculeRecord {
                logp: Some(-0.31),
                hydrogen_bond_donors: Some(1),
                hydrogen_bond_acceptors: 1,
                tpsa: Some(20.23),
                drug_likeness_score: Some(0.41),
                lipinski_violation_count: Some(0),
                ..record("CCO", 46.07)
            },
            MoleculeRecord {
                logp: Some(1.19),
                drug_likeness_score: Some(0.55),
                lipinski_violation_count: Some(4),
                ..record("CC(=O)Oc1ccccc1C(=O)O", 180.16)
            },
            record("c1ccccc1", 78.11),
        ];
        let out = apply(&records, &FilterCriteria::default());
        assert_eq!(out, records);
    }

    #[test]
    fn mw_range_excludes_heavy_record() {
        let records = vec![record("a", 180.16), record("b", 600.0)];
        let criteria = FilterCriteria {
            mw_range: Bounds::new(0.0, 500.0),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply(&records, &criteria)), ["a"]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let records = vec![record("a", 100.0), record("b", 300.0), record("c", 500.0)];
        let criteria = FilterCriteria {
            mw_range: Bounds::new(500.0, 100.0),
            ..FilterCriteria::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn output_preserves_relative_order() {
        let records: Vec<MoleculeRecord> = [450.0, 120.0, 700.0, 330.0, 900.0, 10.0]
            .iter()
            .enumerate()
            .map(|(i, &mw)| record(&format!("m{i}"), mw))
            .collect();
        let criteria = FilterCriteria {
            mw_range: Bounds::new(0.0, 500.0),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply(&records, &criteria)), ["m0", "m1", "m3", "m5"]);
        assert_eq!(filtered_indices(&records, &criteria), [0, 1, 3, 5]);
    }

    #[test]
    fn absent_optional_fields_are_not_checked() {
        let criteria = FilterCriteria {
            logp_range: Bounds::new(10.0, 20.0),
            tpsa_range: Bounds::new(500.0, 600.0),
            hbd_max: -1,
            qed_min: 0.99,
            lipinski_compliant: true,
            ..FilterCriteria::default()
        };
        assert!(matches(&record("x", 200.0).descriptors(), &criteria));
    }

    #[test]
    fn hba_is_always_checked() {
        let criteria = FilterCriteria {
            hba_max: -1,
            ..FilterCriteria::default()
        };
        assert!(!matches(&record("x", 200.0).descriptors(), &criteria));
    }

    #[test]
    fn present_optional_fields_are_checked() {
        let base = FilterCriteria::default();
        let with_logp = MoleculeRecord {
            logp: Some(6.0),
            ..record("x", 200.0)
        };
        let with_hbd = MoleculeRecord {
            hydrogen_bond_donors: Some(11),
            ..record("x", 200.0)
        };
        let with_tpsa = MoleculeRecord {
            tpsa: Some(250.0),
            ..record("x", 200.0)
        };
        let with_qed = MoleculeRecord {
            drug_likeness_score: Some(0.2),
            ..record("x", 200.0)
        };
        assert!(!matches(&with_logp.descriptors(), &base));
        assert!(!matches(&with_hbd.descriptors(), &base));
        assert!(!matches(&with_tpsa.descriptors(), &base));
        let strict = FilterCriteria {
            qed_min: 0.5,
            ..base
        };
        assert!(!matches(&with_qed.descriptors(), &strict));
    }

    #[test]
    fn range_endpoints_are_inclusive() {
        let criteria = FilterCriteria {
            mw_range: Bounds::new(100.0, 200.0),
            ..FilterCriteria::default()
        };
        assert!(matches(&record("lo", 100.0).descriptors(), &criteria));
        assert!(matches(&record("hi", 200.0).descriptors(), &criteria));
        assert!(!matches(&record("nan", f64::NAN).descriptors(), &criteria));
    }

    #[test]
    fn lipinski_compliance_only_removes_violators() {
        let records: Vec<SmilesAnalysis> = (0..=4).map(|v| analysis(&format!("s{v}"), v)).collect();
        let loose = FilterCriteria::default();
        let strict = FilterCriteria {
            lipinski_compliant: true,
            ..loose
        };
        let loose_out = apply(&records, &loose);
        let strict_out = apply(&records, &strict);
        assert_eq!(loose_out.len(), 5);
        assert!(strict_out.len() <= loose_out.len());
        assert_eq!(strict_out.len(), 1);
        assert_eq!(strict_out[0].lipinski_violations, 0);
    }

    #[test]
    fn analyzer_profile_reads_heteroatoms_as_acceptors() {
        assert_eq!(SmilesAnalysis::PROFILE, FilterProfile::Analyzer);
        let mut a = analysis("CCN", 0);
        a.heteroatoms = 12;
        let criteria = FilterCriteria {
            hba_max: 10,
            ..FilterCriteria::default()
        };
        assert!(apply(&[a], &criteria).is_empty());
    }

    #[test]
    fn generator_profile_ignores_lipinski_flag() {
        assert_eq!(GeneratedMolecule::PROFILE, FilterProfile::Generator);
        let m = GeneratedMolecule {
            smiles: "CCO".into(),
            molecular_weight: 46.07,
            logp: -0.31,
            hbd: 1,
            hba: 1,
            tpsa: 20.23,
            qed: 0.41,
            sa_score: 1.98,
        };
        let criteria = FilterCriteria {
            lipinski_compliant: true,
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&[m.clone()], &criteria), vec![m]);
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let records = vec![record("a", 100.0), record("b", 2000.0)];
        let before = records.clone();
        let _ = apply(&records, &FilterCriteria::default());
        assert_eq!(records, before);
    }
}
