use serde_derive::Serialize;
use strum_macros::{Display, EnumString};

use crate::entities::{BusinessRecord, Identity};

/// How the current user relates to a business
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Owner,
    Employee,
    Visitor,
}

/// First match wins: owner, then employee, otherwise visitor.
pub fn resolve_role(business: &BusinessRecord, identity: Option<&Identity>) -> Role {
    match identity {
        Some(identity) if *identity == business.owner_id => Role::Owner,
        Some(identity) if business.is_employee(identity.as_str()) => Role::Employee,
        _ => Role::Visitor,
    }
}
