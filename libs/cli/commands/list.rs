use bizdir_core::{
    directory::filter::{Category, FilterAction},
    entities::{BusinessRecord, BusinessStatus},
    Core,
};
use clap::Args;
use colored::Colorize;

use crate::utils::{
    command_error,
    display::{print_json, LogBuilder, LogType},
};

#[derive(Args, Debug)]
pub struct Command {
    /// List businesses waiting for approval instead of approved ones
    #[clap(long)]
    pending: bool,

    /// Only keep businesses whose name contains this text
    #[clap(short, long)]
    search: Option<String>,

    /// Only keep businesses of this category
    #[clap(short, long)]
    category: Option<String>,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let scope = if command.pending {
        BusinessStatus::PendingApproval
    } else {
        BusinessStatus::Approved
    };

    let mut state = core.directory().load(scope).await;
    if let Some(search) = command.search {
        state = state.reduce(FilterAction::SetSearch(search));
    }
    if let Some(category) = command.category.as_deref() {
        state = state.reduce(FilterAction::SetCategory(Category::from(category)));
    }

    let businesses = state.visible_set();
    if command.json {
        let rows: Vec<_> = businesses.iter().map(json_row).collect();
        print_json(&rows)?;
        return Ok(());
    }

    if businesses.is_empty() {
        LogBuilder::new(LogType::Info, "No business found").print();
        return Ok(());
    }

    for business in businesses {
        LogBuilder::new(LogType::Business, &business.name)
            .with_branch("ID", business.id.clone())
            .with_branch("Category", business.category.clone())
            .with_optional_branch("Address", business.address.clone())
            .with_optional_branch("Rating", business.rating.map(|r| format!("{r:.1}/5")))
            .print();
    }
    println!(
        "\n{}",
        format!("{} of {} businesses", businesses.len(), state.full_set().len()).dimmed()
    );

    Ok(())
}

/// Business fields with the id, which is not part of the stored fields
pub fn json_row(business: &BusinessRecord) -> serde_json::Value {
    let mut value = serde_json::to_value(business).unwrap_or_default();
    if let Some(fields) = value.as_object_mut() {
        fields.insert("id".to_string(), business.id.clone().into());
    }
    value
}
