use bizdir_core::Core;
use clap::Subcommand;

use crate::utils::command_error;

pub mod approve;
pub mod book;
pub mod employee;
pub mod list;
pub mod register;
pub mod seed;
pub mod show;
pub mod task;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the businesses of the directory
    List(list::Command),
    /// Show a business with your role and the available contact actions
    Show(show::Command),
    /// Register a new business, it stays pending until approved
    Register(register::Command),
    /// Approve a pending business
    Approve(approve::Command),
    /// Manage the employees of a business you own
    Employee(employee::Command),
    /// Assign, list, complete and review tasks
    Task(task::Command),
    /// Request an appointment with a business
    Book(book::Command),
    /// Import business records from a JSON file
    Seed(seed::Command),
}

impl Command {
    pub async fn execute(self, core: &Core) -> command_error::Result<()> {
        match self {
            Self::List(o) => list::handle(o, core).await?,
            Self::Show(o) => show::handle(o, core).await?,
            Self::Register(o) => register::handle(o, core).await?,
            Self::Approve(o) => approve::handle(o, core).await?,
            Self::Employee(o) => employee::handle(o, core).await?,
            Self::Task(o) => task::handle(o, core).await?,
            Self::Book(o) => book::handle(o, core).await?,
            Self::Seed(o) => seed::handle(o, core).await?,
        };

        Ok(())
    }
}
