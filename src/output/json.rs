//! JSON export and import of the aggregate
//!
//! Exported files use the `{"translationdata": [...]}` layout. Imports also
//! accept a bare array of page records.

use crate::crawler::CollectedData;
use crate::model::{Aggregate, PageRecord};
use crate::output::OutputResult;
use crate::state::AggregateSnapshot;
use crate::storage::Storage;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Accepted layouts of an imported file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportedData {
    Wrapped(CollectedData),
    Bare(Vec<PageRecord>),
}

/// Writes the aggregate to `output_path` as pretty-printed JSON
pub fn export_json(aggregate: &Aggregate, output_path: &Path) -> OutputResult<()> {
    let data = CollectedData {
        translation_data: aggregate.clone(),
    };

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, &data)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

/// Reads an aggregate from a JSON file
pub fn read_json(input_path: &Path) -> OutputResult<Aggregate> {
    let reader = BufReader::new(File::open(input_path)?);
    Ok(match serde_json::from_reader(reader)? {
        ImportedData::Wrapped(data) => data.translation_data,
        ImportedData::Bare(pages) => Aggregate::from(pages),
    })
}

/// Reads an aggregate from a JSON file and stores it as finished data
///
/// Any stored aggregate is replaced. Returns the imported aggregate.
pub fn import_json<S: Storage>(
    storage: &mut S,
    input_path: &Path,
    session: &str,
) -> OutputResult<Aggregate> {
    let aggregate = read_json(input_path)?;
    let snapshot = AggregateSnapshot::complete(session, aggregate);
    storage.save_snapshot(&snapshot)?;

    tracing::info!(
        "Imported {} pages from {}",
        snapshot.pages.len(),
        input_path.display()
    );
    Ok(snapshot.pages)
}
