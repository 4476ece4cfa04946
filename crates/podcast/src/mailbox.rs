// ABOUTME: Splits an RFC 5322 mailbox string into display name and address for itunes:owner.
// ABOUTME: Parsing is delegated to `email_address`; accepts `Name <addr>` and bare addresses.

use std::str::FromStr;

use email_address::EmailAddress;

use crate::error::RenderError;

/// The two halves of an owner mailbox. `display_name` is empty when the input had none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub display_name: String,
    pub address: String,
}

/// Parses `input` as a single mailbox.
///
/// The address part must be a valid email address; nothing is synthesized
/// for a missing display name.
pub fn parse_mailbox(input: &str) -> Result<Mailbox, RenderError> {
    let parsed = EmailAddress::from_str(input.trim())
        .map_err(|e| RenderError::mailbox(input, e.to_string()))?;

    Ok(Mailbox {
        display_name: parsed.display_part().to_string(),
        address: parsed.email(),
    })
}
