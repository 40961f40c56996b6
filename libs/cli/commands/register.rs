use bizdir_core::{entities::ContactInfo, services::RegisterBusinessInput, Core};
use clap::Args;
use colored::Colorize;

use crate::utils::{
    command_error,
    display::{LogBuilder, LogType},
};

#[derive(Args, Debug)]
pub struct Command {
    /// Name of the business
    name: String,

    /// Category shown in the directory, e.g. "Food & Drink"
    #[clap(short, long)]
    category: String,

    #[clap(short, long)]
    address: Option<String>,

    #[clap(short, long)]
    email: Option<String>,

    #[clap(short, long)]
    phone: Option<String>,

    #[clap(short, long)]
    website: Option<String>,

    #[clap(short, long)]
    description: Option<String>,
}

impl Command {
    fn contact(&self) -> Option<ContactInfo> {
        let contact = ContactInfo {
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
        };
        (contact != ContactInfo::default()).then_some(contact)
    }
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let contact = command.contact();
    let input = RegisterBusinessInput {
        name: command.name,
        category: command.category,
        address: command.address,
        contact,
        description: command.description,
    };

    let business = core.businesses().register(input).await?;

    LogBuilder::new(
        LogType::Success,
        format!("Registered '{}'", business.name.cyan()),
    )
    .with_branch("ID", business.id)
    .with_branch("Status", business.status)
    .print();

    Ok(())
}
