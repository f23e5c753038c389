use std::fmt;
use serde::{Serialize, Deserialize};

/// Lightweight descriptor of the signed-in user, persisted next to the
/// bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id      : Option<u64>,

    #[serde(rename = "nome")]
    name    : String,

    #[serde(rename = "email")]
    email   : String,
}

impl User {
    pub fn new(id: Option<u64>, name: &str, email: &str) -> Self {
        Self {
            id,
            name : name.to_string(),
            email: email.to_string(),
        }
    }

    /// The backend only returns the email after verification, so the
    /// display name is the local part of the address.
    pub fn from_email(email: &str) -> Self {
        Self::new(None, display_name(email), email)
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

pub(crate) fn display_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
