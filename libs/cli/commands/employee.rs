use bizdir_core::Core;
use clap::{Args, Subcommand};

use crate::utils::{
    command_error,
    display::{LogBuilder, LogType},
};

#[derive(Args, Debug)]
pub struct Command {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Add an employee, nothing happens if they already are one
    Add(Target),
    /// Remove an employee
    Remove(Target),
}

#[derive(Args, Debug)]
struct Target {
    business_id: String,
    identity: String,
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let businesses = core.businesses();

    let (target, message) = match command.action {
        Action::Add(target) => {
            businesses
                .add_employee(&target.business_id, &target.identity)
                .await?;
            (target, "Employee added")
        }
        Action::Remove(target) => {
            businesses
                .remove_employee(&target.business_id, &target.identity)
                .await?;
            (target, "Employee removed")
        }
    };

    let employees = businesses.get(&target.business_id).await?.employees;
    LogBuilder::new(LogType::Success, message)
        .with_branch("Business", target.business_id)
        .with_branch("Employees", employees.join(", "))
        .print();

    Ok(())
}
