use bizdir_core::Core;
use clap::Args;

use crate::utils::{
    command_error,
    display::{LogBuilder, LogType},
    time::{format_ms, parse_rfc3339_ms},
};

#[derive(Args, Debug)]
pub struct Command {
    /// Id of the business
    business_id: String,

    /// Requested date, RFC 3339 (e.g. 2025-06-01T18:30:00+02:00)
    #[clap(long)]
    at: String,

    /// Message for the business
    #[clap(short, long)]
    note: Option<String>,
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let requested_for = parse_rfc3339_ms(&command.at)?;

    let booking = core
        .bookings()
        .request(&command.business_id, requested_for, command.note)
        .await?;

    LogBuilder::new(LogType::Success, "Booking requested")
        .with_branch("ID", booking.id)
        .with_branch("Business", command.business_id)
        .with_branch("For", format_ms(booking.requested_for))
        .with_optional_branch("Note", booking.note)
        .print();

    Ok(())
}
