use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{FieldValue, MoleculeRecord, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a batch of molecule records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one scalar column per field (recommended for large batches)
/// * `.json`    – `[{ "identifier": "CCO", "molecularWeight": 46.07, ... }, ...]`
/// * `.csv`     – header row with the same camelCase field names
///
/// `identifier` and `molecularWeight` are required; every other field is
/// optional and unknown columns are ignored.
pub fn load_file(path: &Path) -> Result<Vec<MoleculeRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<MoleculeRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON molecule array")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<MoleculeRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per record field.
///
/// Integer and float columns are accepted interchangeably for numeric
/// fields, so files written by Pandas or Polars both work.
fn load_parquet(path: &Path) -> Result<Vec<MoleculeRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if schema.index_of("identifier").is_err() {
            bail!("Parquet file missing 'identifier' column");
        }
        if schema.index_of("molecularWeight").is_err() {
            bail!("Parquet file missing 'molecularWeight' column");
        }

        for row_idx in 0..batch.num_rows() {
            let row: Row = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(col_idx, f)| {
                    (f.name().clone(), extract_field_value(batch.column(col_idx), row_idx))
                })
                .collect();
            let record = record_from_row(&row)
                .with_context(|| format!("Row {}", records.len()))?;
            records.push(record);
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Extract a single scalar from an Arrow column at a given row.
fn extract_field_value(col: &Arc<dyn Array>, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| FieldValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| FieldValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| FieldValue::Integer(i64::from(a.value(row)))),
        DataType::UInt32 => col
            .as_primitive_opt::<UInt32Type>()
            .map(|a| FieldValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| FieldValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| FieldValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| FieldValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| FieldValue::Bool(a.value(row))),
        _ => None,
    };
    value.unwrap_or_else(|| FieldValue::String(format!("{:?}", col.data_type())))
}

/// Build a [`MoleculeRecord`] from a dynamic row keyed by camelCase names.
pub fn record_from_row(row: &Row) -> Result<MoleculeRecord> {
    let identifier = match row.get("identifier") {
        Some(FieldValue::String(s)) => s.clone(),
        Some(other) if *other != FieldValue::Null => other.to_string(),
        _ => bail!("missing 'identifier'"),
    };
    let molecular_weight = row
        .get("molecularWeight")
        .and_then(FieldValue::as_f64)
        .context("missing or non-numeric 'molecularWeight'")?;

    Ok(MoleculeRecord {
        identifier,
        molecular_weight,
        logp: real(row, "logP")?,
        hydrogen_bond_donors: count(row, "hydrogenBondDonors")?,
        hydrogen_bond_acceptors: count(row, "hydrogenBondAcceptors")?.unwrap_or(0),
        tpsa: real(row, "topologicalPolarSurfaceArea")?,
        drug_likeness_score: real(row, "drugLikenessScore")?,
        lipinski_violation_count: count(row, "lipinskiViolationCount")?
            .map(u8::try_from)
            .transpose()
            .context("'lipinskiViolationCount' out of range")?,
    })
}

/// Optional numeric field. Absent or null is `None`; anything else must be a number.
fn real(row: &Row, key: &str) -> Result<Option<f64>> {
    match row.get(key) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .with_context(|| format!("non-numeric '{key}': {v}")),
    }
}

/// Optional count field. Negative or fractional values are rejected.
fn count(row: &Row, key: &str) -> Result<Option<u32>> {
    match row.get(key) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(v) => v
            .as_count()
            .map(Some)
            .with_context(|| format!("'{key}' is not a valid count: {v}")),
    }
}
