use bizdir_core::Core;
use clap::Args;

use crate::utils::{
    command_error,
    display::{LogBuilder, LogType},
};

#[derive(Args, Debug)]
pub struct Command {
    /// Id of the pending business
    business_id: String,
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    core.businesses().approve(&command.business_id).await?;

    LogBuilder::new(LogType::Success, "Business approved")
        .with_branch("ID", command.business_id)
        .print();

    Ok(())
}
