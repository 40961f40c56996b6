use serde_derive::Serialize;

use crate::{
    directory::role::Role,
    entities::{BusinessRecord, Identity},
};

/// Something a user can do from a business detail screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContactAction {
    Call { uri: String },
    Email { uri: String },
    Website { url: String },
    Book,
}

fn phone_uri(phone: &str) -> Option<String> {
    let digits: String = phone
        .trim()
        .chars()
        .enumerate()
        .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
        .map(|(_, c)| c)
        .collect();

    digits
        .chars()
        .any(|c| c.is_ascii_digit())
        .then(|| format!("tel:{digits}"))
}

fn email_uri(email: &str) -> Option<String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Some(format!("mailto:{email}"))
        }
        _ => None,
    }
}

/// Actions offered for a business. Booking needs a signed-in user who does not
/// own the business.
pub fn contact_actions(
    business: &BusinessRecord,
    role: Role,
    identity: Option<&Identity>,
) -> Vec<ContactAction> {
    let mut actions = Vec::new();

    if let Some(contact) = &business.contact {
        if let Some(uri) = contact.phone.as_deref().and_then(phone_uri) {
            actions.push(ContactAction::Call { uri });
        }
        if let Some(uri) = contact.email.as_deref().and_then(email_uri) {
            actions.push(ContactAction::Email { uri });
        }
        if let Some(url) = contact.website.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            actions.push(ContactAction::Website {
                url: url.to_string(),
            });
        }
    }

    if identity.is_some() && role != Role::Owner {
        actions.push(ContactAction::Book);
    }

    actions
}
