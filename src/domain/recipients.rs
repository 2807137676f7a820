use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;
use crate::domain::value::EmailAddress;

/// Separator used by the template-send endpoint for multi-address fields.
pub const RECIPIENT_DELIMITER: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered, non-empty list of recipient addresses.
///
/// Template sends take recipients as a single `|`-delimited string; this type
/// produces that form while keeping the input order.
pub struct RecipientList(Vec<EmailAddress>);

impl RecipientList {
    /// JSON field name used by Sendinblue (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a recipient list; an empty list is rejected.
    pub fn new(recipients: Vec<EmailAddress>) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(recipients))
    }

    /// Convenience for a single recipient.
    pub fn one(recipient: EmailAddress) -> Self {
        Self(vec![recipient])
    }

    /// Validate every address and build the list.
    pub fn parse<I, S>(recipients: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let recipients = recipients
            .into_iter()
            .map(EmailAddress::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(recipients)
    }

    pub fn as_slice(&self) -> &[EmailAddress] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join the addresses with `|`, e.g. `a@x.net|b@x.net`.
    pub fn to_pipe_delimited(&self) -> String {
        let mut joined = String::new();
        for (idx, address) in self.0.iter().enumerate() {
            if idx > 0 {
                joined.push(RECIPIENT_DELIMITER);
            }
            joined.push_str(address.as_str());
        }
        joined
    }
}

/// Address → display name mapping used by `send_email` (`to`, `cc`, `bcc`).
pub type RecipientMap = BTreeMap<EmailAddress, String>;
