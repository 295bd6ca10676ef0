use std::path::Path;

use thiserror::Error;

use super::model::FlatRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to write; no file is produced.
    #[error("No data to export")]
    EmptyExport,

    #[error("Export failed: {0}")]
    SerializationFailure(String),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::SerializationFailure(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Export contexts (default file names)
// ---------------------------------------------------------------------------

/// Which result list is being exported; decides the suggested file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportContext {
    SmilesAnalysis,
    VaeGenerated,
    GanTraining,
    Batch,
}

impl ExportContext {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportContext::SmilesAnalysis => "smiles_analysis_results.csv",
            ExportContext::VaeGenerated => "vae_generated_molecules.csv",
            ExportContext::GanTraining => "gan_training_results.csv",
            ExportContext::Batch => "batch_screening_results.csv",
        }
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize records to comma-separated text.
///
/// The header is the key list of the first record. Every row is written from
/// that row's own fields, unquoted and unescaped, so a value containing a
/// comma or a record with a different key list produces a misaligned row.
/// Rows are joined with `\n` and there is no trailing newline.
pub fn serialize<R: FlatRecord>(records: &[R]) -> Result<String, ExportError> {
    let first = records.first().ok_or(ExportError::EmptyExport)?;
    let header: Vec<String> = first.fields().into_iter().map(|(k, _)| k).collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(","));

    let mut misaligned = 0usize;
    for record in records {
        let fields = record.fields();
        if !fields.iter().map(|(k, _)| k).eq(header.iter()) {
            misaligned += 1;
        }
        let values: Vec<String> = fields.iter().map(|(_, v)| v.to_string()).collect();
        lines.push(values.join(","));
    }
    if misaligned > 0 {
        log::warn!(
            "{misaligned} of {} rows have a different key list than the header; columns will not line up",
            records.len()
        );
    }

    Ok(lines.join("\n"))
}

/// Serialize `records` and write them to `path`.
pub fn export_file<R: FlatRecord>(path: &Path, records: &[R]) -> Result<(), ExportError> {
    let text = serialize(records)?;
    std::fs::write(path, text)?;
    log::info!("Exported {} rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FieldValue, MoleculeRecord, Row, SmilesAnalysis};

    fn row(pairs: &[(&str, FieldValue)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn header_follows_first_record_key_order() {
        let records = vec![row(&[
            ("SMILES", "CCO".into()),
            ("Valid", true.into()),
            ("MolecularWeight", 46.07.into()),
        ])];
        assert_eq!(
            serialize(&records).unwrap(),
            "SMILES,Valid,MolecularWeight\nCCO,true,46.07"
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        let records: Vec<Row> = Vec::new();
        assert!(matches!(serialize(&records), Err(ExportError::EmptyExport)));
    }

    #[test]
    fn empty_input_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ExportContext::Batch.file_name());
        let records: Vec<MoleculeRecord> = Vec::new();
        assert!(matches!(
            export_file(&path, &records),
            Err(ExportError::EmptyExport)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn values_are_not_quoted_or_escaped() {
        let records = vec![row(&[("SMILES", "C(C)C,O".into()), ("Note", "a \"b\"".into())])];
        assert_eq!(serialize(&records).unwrap(), "SMILES,Note\nC(C)C,O,a \"b\"");
    }

    #[test]
    fn single_empty_column_is_written_bare() {
        let records = vec![row(&[("Note", "".into())])];
        assert_eq!(serialize(&records).unwrap(), "Note\n");

        let records = vec![row(&[("Note", FieldValue::Null)]), row(&[("Note", "x".into())])];
        assert_eq!(serialize(&records).unwrap(), "Note\n\nx");
    }

    #[test]
    fn rows_use_their_own_keys() {
        let records = vec![
            row(&[("a", FieldValue::Integer(1)), ("b", FieldValue::Integer(2))]),
            row(&[("b", FieldValue::Integer(3)), ("a", FieldValue::Integer(4))]),
            row(&[("a", FieldValue::Integer(5))]),
        ];
        assert_eq!(serialize(&records).unwrap(), "a,b\n1,2\n3,4\n5");
    }

    #[test]
    fn analysis_rows_serialize_in_declared_order() {
        let records = vec![SmilesAnalysis {
            smiles: "CCO".into(),
            valid: true,
            molecular_weight: 46.07,
            logp: -0.31,
            tpsa: 20.23,
            hbd: 1,
            heteroatoms: 1,
            lipinski_violations: 0,
            drug_likeness: 0.41,
        }];
        assert_eq!(
            serialize(&records).unwrap(),
            "SMILES,Valid,MolecularWeight,LogP,TPSA,HBD,Heteroatoms,LipinskiViolations,DrugLikeness\n\
             CCO,true,46.07,-0.31,20.23,1,1,0,0.41"
        );
    }

    #[test]
    fn export_file_writes_serialized_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ExportContext::VaeGenerated.file_name());
        let records = vec![MoleculeRecord::new("CCO", 46.07), MoleculeRecord::new("C", 16.04)];
        export_file(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "identifier,molecularWeight,hydrogenBondAcceptors\nCCO,46.07,0\nC,16.04,0"
        );
    }

    #[test]
    fn export_file_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let records = vec![MoleculeRecord::new("CCO", 46.07)];
        assert!(matches!(
            export_file(&path, &records),
            Err(ExportError::SerializationFailure(_))
        ));
    }

    #[test]
    fn context_file_names() {
        assert_eq!(
            ExportContext::SmilesAnalysis.file_name(),
            "smiles_analysis_results.csv"
        );
        assert_eq!(
            ExportContext::VaeGenerated.file_name(),
            "vae_generated_molecules.csv"
        );
    }
}
