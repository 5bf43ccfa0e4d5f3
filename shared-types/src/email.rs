use serde::{Deserialize, Serialize};

/// A raw email after MIME decoding, reduced to what the relay needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedEmail {
    pub message_id: Option<String>,
    pub subject: Option<String>,
    pub from: Option<EmailAddress>,
    pub date: Option<String>,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    pub name: Option<String>,
}

impl EmailAddress {
    /// `Name <email>` when a display name is known, the bare address otherwise.
    pub fn display(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} <{}>", name, self.email),
            _ => self.email.clone(),
        }
    }
}
