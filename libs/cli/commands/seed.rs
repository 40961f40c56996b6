use bizdir_core::{
    entities::{business::businesses_collection, BusinessRecord},
    Core,
};
use bizdir_storage::{DocumentSnapshot, FieldMap};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::utils::{
    command_error,
    display::{LogBuilder, LogType},
};

#[derive(Args, Debug)]
pub struct Command {
    /// JSON array of business records, each with its `id`
    file: PathBuf,
}

/// Decode seed records, the `id` field becomes the document id
pub fn parse_records(content: &str) -> eyre::Result<Vec<BusinessRecord>> {
    let rows: Vec<FieldMap> = serde_json::from_str(content)?;

    rows.into_iter()
        .enumerate()
        .map(|(index, mut fields)| {
            let id = match fields.remove("id") {
                Some(serde_json::Value::String(id)) if !id.is_empty() => id,
                _ => eyre::bail!("record #{index} has no string `id`"),
            };
            let record: BusinessRecord = DocumentSnapshot::new(id, fields).to_document()?;
            record.validate()?;
            Ok(record)
        })
        .collect()
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let content = tokio::fs::read_to_string(&command.file)
        .await
        .map_err(|e| eyre::eyre!("Could not read '{}': {e}", command.file.display()))?;
    let records = parse_records(&content)?;

    let storage = core.get_inner_storage();
    let collection = businesses_collection();
    for record in records.iter() {
        debug!(id = %record.id, "Seeding business");
        storage.create_document(&collection, record).await?;
    }

    LogBuilder::new(
        LogType::Success,
        format!("Imported {} businesses", records.len()),
    )
    .with_branch("From", command.file.display().to_string())
    .print();

    Ok(())
}
