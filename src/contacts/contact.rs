use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use serde_with::skip_serializing_none;

/// A directory entry as returned by the backend.
///
/// The mobile number is fixed at creation; contacts are never removed,
/// only deactivated and reactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "id")]
    id          : u64,

    #[serde(rename = "nome")]
    name        : String,

    #[serde(rename = "email")]
    email       : String,

    #[serde(rename = "celular")]
    mobile      : String,

    #[serde(rename = "telefone")]
    #[serde(default)]
    landline    : Option<String>,

    #[serde(rename = "favorito")]
    #[serde(default)]
    favorite    : bool,

    #[serde(rename = "ativo")]
    #[serde(default = "default_active")]
    active      : bool,

    #[serde(rename = "criadoEm")]
    created_at  : DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Contact {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn landline(&self) -> Option<&str> {
        self.landline.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}> {}", self.id, self.name, self.email, self.mobile)?;
        if let Some(landline) = self.landline() {
            write!(f, " / {}", landline)?;
        }
        if self.favorite {
            write!(f, " [favorito]")?;
        }
        if !self.active {
            write!(f, " [inativo]")?;
        }
        Ok(())
    }
}

/// Body of a create request.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContact {
    #[serde(rename = "nome")]
    name        : String,
    #[serde(rename = "email")]
    email       : String,
    #[serde(rename = "celular")]
    mobile      : String,
    #[serde(rename = "telefone")]
    landline    : Option<String>,
}

impl NewContact {
    pub fn new(name: &str, email: &str, mobile: &str) -> Self {
        Self {
            name    : name.to_string(),
            email   : email.to_string(),
            mobile  : mobile.to_string(),
            landline: None,
        }
    }

    /// An empty landline is the same as no landline.
    pub fn with_landline(mut self, landline: &str) -> Self {
        self.landline = Some(landline.to_string()).filter(|v| !v.is_empty());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn landline(&self) -> Option<&str> {
        self.landline.as_deref()
    }
}

/// Body of an update request. The mobile number cannot be changed, so it
/// has no field here; unset fields are left out of the JSON body.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactUpdate {
    #[serde(rename = "nome")]
    name        : Option<String>,
    #[serde(rename = "email")]
    email       : Option<String>,
    #[serde(rename = "telefone")]
    landline    : Option<String>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_landline(mut self, landline: &str) -> Self {
        self.landline = Some(landline.to_string()).filter(|v| !v.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.landline.is_none()
    }
}
