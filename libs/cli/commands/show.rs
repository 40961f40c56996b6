use bizdir_core::{contact::ContactAction, Core};
use clap::Args;

use crate::{
    commands::list::json_row,
    utils::{
        command_error,
        display::{print_json, LogBuilder, LogType},
    },
};

#[derive(Args, Debug)]
pub struct Command {
    /// Id of the business
    business_id: String,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let view = core.directory().open_business(&command.business_id).await?;

    if command.json {
        print_json(&serde_json::json!({
            "business": json_row(&view.business),
            "role": view.role,
            "actions": view.actions,
        }))?;
        return Ok(());
    }

    let business = &view.business;
    let employees = (!business.employees.is_empty()).then(|| business.employees.join(", "));
    LogBuilder::new(LogType::Business, &business.name)
        .with_branch("ID", business.id.clone())
        .with_branch("Category", business.category.clone())
        .with_branch("Status", business.status)
        .with_branch("Owner", business.owner_id.clone())
        .with_optional_branch("Employees", employees)
        .with_optional_branch("Address", business.address.clone())
        .with_optional_branch("Rating", business.rating.map(|r| format!("{r:.1}/5")))
        .with_optional_branch("About", business.description.clone())
        .with_branch("Your role", view.role)
        .print();

    if view.actions.is_empty() {
        return Ok(());
    }

    let mut actions = LogBuilder::new(LogType::Info, "Actions");
    for action in view.actions {
        actions = match action {
            ContactAction::Call { uri } => actions.with_branch("Call", uri),
            ContactAction::Email { uri } => actions.with_branch("Email", uri),
            ContactAction::Website { url } => actions.with_branch("Website", url),
            ContactAction::Book => actions.with_branch(
                "Book",
                format!("bizdir book {} --at <date>", business.id),
            ),
        };
    }
    actions.print();

    Ok(())
}
