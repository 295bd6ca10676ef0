use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use molscout::analysis::{MockVaeGenerator, MoleculeGenerator};
use molscout::data::model::GeneratedMolecule;

const SAMPLE_SIZE: usize = 200;
const OUTPUT_PATH: &str = "sample_molecules.parquet";

/// Column-wise view of the generated molecules, named like `MoleculeRecord`.
fn to_batch(molecules: &[GeneratedMolecule]) -> Result<(Arc<Schema>, RecordBatch)> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("identifier", DataType::Utf8, false),
        Field::new("molecularWeight", DataType::Float64, false),
        Field::new("logP", DataType::Float64, false),
        Field::new("hydrogenBondDonors", DataType::Int64, false),
        Field::new("hydrogenBondAcceptors", DataType::Int64, false),
        Field::new("topologicalPolarSurfaceArea", DataType::Float64, false),
        Field::new("drugLikenessScore", DataType::Float64, false),
    ]));

    let floats = |f: fn(&GeneratedMolecule) -> f64| {
        Float64Array::from(molecules.iter().map(f).collect::<Vec<_>>())
    };
    let ints = |f: fn(&GeneratedMolecule) -> u32| {
        Int64Array::from(molecules.iter().map(|m| i64::from(f(m))).collect::<Vec<_>>())
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                molecules.iter().map(|m| m.smiles.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(floats(|m| m.molecular_weight)),
            Arc::new(floats(|m| m.logp)),
            Arc::new(ints(|m| m.hbd)),
            Arc::new(ints(|m| m.hba)),
            Arc::new(floats(|m| m.tpsa)),
            Arc::new(floats(|m| m.qed)),
        ],
    )
    .context("building record batch")?;

    Ok((schema, batch))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut generator = MockVaeGenerator::new(42, 64, 1.0);
    let molecules = generator.generate(SAMPLE_SIZE);
    let (schema, batch) = to_batch(&molecules)?;

    let file = std::fs::File::create(OUTPUT_PATH).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {} molecules to {OUTPUT_PATH}", molecules.len());
    Ok(())
}
