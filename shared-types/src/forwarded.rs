use serde::{Deserialize, Serialize};

/// Original sender, subject and date recovered from a forwarded-message block.
///
/// `None` means the label was not found at all. `Some("")` means the label was
/// there but carried no value; callers fall back to the outer email's headers
/// only on `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardedHeader {
    pub from: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
}

impl ForwardedHeader {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.subject.is_none() && self.date.is_none()
    }
}
