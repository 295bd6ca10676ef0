use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// FieldValue – a single cell of a flat record
// ---------------------------------------------------------------------------

/// A dynamically-typed scalar value, one cell of a [`FlatRecord`].
///
/// `Display` produces the export text: shortest decimal for numbers,
/// `true`/`false` for booleans, strings verbatim and an empty cell for null.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            FieldValue::Float(v) if v.is_infinite() => {
                write!(f, "{}", if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0.0 prints as "0"
            FieldValue::Float(v) if *v == 0.0 => write!(f, "0"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl FieldValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to interpret the value as a non-negative count.
    pub fn as_count(&self) -> Option<u32> {
        match self {
            FieldValue::Integer(i) => u32::try_from(*i).ok(),
            FieldValue::Float(v) if v.fract() == 0.0 && *v >= 0.0 && *v <= u32::MAX as f64 => {
                Some(*v as u32)
            }
            _ => None,
        }
    }

    /// Short label for table cells (floats rounded to two decimals).
    pub fn cell_label(&self) -> String {
        match self {
            FieldValue::Float(v) if v.is_finite() => format!("{v:.2}"),
            FieldValue::Null => "–".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Integer(i64::from(v))
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Integer(i64::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// FlatRecord – named scalar fields in a fixed order
// ---------------------------------------------------------------------------

/// A record that exposes its fields as ordered `(key, value)` pairs.
///
/// Only the fields actually present on this record are returned, so two
/// records of the same type may yield different key lists.
pub trait FlatRecord {
    fn fields(&self) -> Vec<(String, FieldValue)>;
}

/// A dynamic row keyed by column name, in insertion order.
pub type Row = IndexMap<String, FieldValue>;

impl FlatRecord for Row {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

fn field(key: &str, value: impl Into<FieldValue>) -> (String, FieldValue) {
    (key.to_string(), value.into())
}

// ---------------------------------------------------------------------------
// MoleculeRecord – the screening view shared by every result type
// ---------------------------------------------------------------------------

/// A molecule with the descriptors the property filter understands.
///
/// `identifier` is opaque (a SMILES string in practice). Optional fields are
/// skipped by both the filter and the exporter when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeRecord {
    pub identifier: String,
    pub molecular_weight: f64,
    #[serde(default, rename = "logP", skip_serializing_if = "Option::is_none")]
    pub logp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydrogen_bond_donors: Option<u32>,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub hydrogen_bond_acceptors: u32,
    #[serde(
        default,
        rename = "topologicalPolarSurfaceArea",
        skip_serializing_if = "Option::is_none"
    )]
    pub tpsa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_likeness_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipinski_violation_count: Option<u8>,
}

/// Empty CSV cells and JSON `null` read as zero acceptors.
fn count_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(d)?.unwrap_or(0))
}

impl MoleculeRecord {
    /// A record carrying only the always-present fields.
    pub fn new(identifier: impl Into<String>, molecular_weight: f64) -> Self {
        Self {
            identifier: identifier.into(),
            molecular_weight,
            logp: None,
            hydrogen_bond_donors: None,
            hydrogen_bond_acceptors: 0,
            tpsa: None,
            drug_likeness_score: None,
            lipinski_violation_count: None,
        }
    }
}

impl FlatRecord for MoleculeRecord {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        let mut out = vec![
            field("identifier", self.identifier.as_str()),
            field("molecularWeight", self.molecular_weight),
        ];
        if let Some(v) = self.logp {
            out.push(field("logP", v));
        }
        if let Some(v) = self.hydrogen_bond_donors {
            out.push(field("hydrogenBondDonors", v));
        }
        out.push(field("hydrogenBondAcceptors", self.hydrogen_bond_acceptors));
        if let Some(v) = self.tpsa {
            out.push(field("topologicalPolarSurfaceArea", v));
        }
        if let Some(v) = self.drug_likeness_score {
            out.push(field("drugLikenessScore", v));
        }
        if let Some(v) = self.lipinski_violation_count {
            out.push(field("lipinskiViolationCount", v));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Result types produced by the AI modules
// ---------------------------------------------------------------------------

/// One molecule proposed by the VAE generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMolecule {
    pub smiles: String,
    pub molecular_weight: f64,
    pub logp: f64,
    pub hbd: u32,
    pub hba: u32,
    pub tpsa: f64,
    pub qed: f64,
    pub sa_score: f64,
}

impl FlatRecord for GeneratedMolecule {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            field("SMILES", self.smiles.as_str()),
            field("MolecularWeight", self.molecular_weight),
            field("LogP", self.logp),
            field("HBD", self.hbd),
            field("HBA", self.hba),
            field("TPSA", self.tpsa),
            field("QED", self.qed),
            field("SAScore", self.sa_score),
        ]
    }
}

/// One row of the SMILES analyzer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmilesAnalysis {
    pub smiles: String,
    pub valid: bool,
    pub molecular_weight: f64,
    pub logp: f64,
    pub tpsa: f64,
    pub hbd: u32,
    /// Heteroatom count; the analyzer reports it in place of H-bond acceptors.
    pub heteroatoms: u32,
    pub lipinski_violations: u8,
    pub drug_likeness: f64,
}

impl FlatRecord for SmilesAnalysis {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            field("SMILES", self.smiles.as_str()),
            field("Valid", self.valid),
            field("MolecularWeight", self.molecular_weight),
            field("LogP", self.logp),
            field("TPSA", self.tpsa),
            field("HBD", self.hbd),
            field("Heteroatoms", self.heteroatoms),
            field("LipinskiViolations", self.lipinski_violations),
            field("DrugLikeness", self.drug_likeness),
        ]
    }
}

/// Metrics reported by the GAN trainer after one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub epoch: usize,
    pub generator_loss: f64,
    pub discriminator_loss: f64,
    pub fid: f64,
}

impl FlatRecord for TrainingMetrics {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            field("Epoch", FieldValue::Integer(self.epoch as i64)),
            field("GeneratorLoss", self.generator_loss),
            field("DiscriminatorLoss", self.discriminator_loss),
            field("FID", self.fid),
        ]
    }
}
