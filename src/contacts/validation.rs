use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    Error,
    error::Result,
};

use super::{
    contact::{Contact, NewContact, ContactUpdate},
    format::{strip_formatting, sanitize_phone_input, MOBILE_DIGITS, LANDLINE_DIGITS},
};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{11}$").unwrap());
static LANDLINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Formatting characters are ignored; exactly 11 digits must remain.
pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_REGEX.is_match(&strip_formatting(mobile))
}

/// The landline is optional, so an empty value is valid.
pub fn is_valid_landline(landline: &str) -> bool {
    landline.is_empty() || LANDLINE_REGEX.is_match(&strip_formatting(landline))
}

/// The values of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name    : String,
    pub email   : String,
    pub mobile  : String,
    pub landline: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, mobile: &str, landline: &str) -> Self {
        Self {
            name    : name.to_string(),
            email   : email.to_string(),
            mobile  : sanitize_phone_input(mobile, MOBILE_DIGITS),
            landline: sanitize_phone_input(landline, LANDLINE_DIGITS),
        }
    }

    /// Pre-fills the form for editing an existing contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name    : contact.name().to_string(),
            email   : contact.email().to_string(),
            mobile  : contact.mobile().to_string(),
            landline: contact.landline().unwrap_or_default().to_string(),
        }
    }

    /// Checks every field and reports the first failure with the message
    /// shown next to that field.
    pub fn validate(&self) -> Result<()> {
        let name_len = self.name.chars().count();
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Nome é obrigatório".into()));
        }
        if name_len < NAME_MIN {
            return Err(Error::Validation("Nome deve ter no mínimo 3 caracteres".into()));
        }
        if name_len > NAME_MAX {
            return Err(Error::Validation("Nome deve ter no máximo 100 caracteres".into()));
        }

        if self.email.is_empty() {
            return Err(Error::Validation("Email é obrigatório".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(Error::Validation("Email inválido".into()));
        }
        if self.email.chars().count() > EMAIL_MAX {
            return Err(Error::Validation("Email muito longo".into()));
        }

        if self.mobile.is_empty() {
            return Err(Error::Validation("Celular é obrigatório".into()));
        }
        if !MOBILE_REGEX.is_match(&self.mobile) {
            return Err(Error::Validation("Celular deve ter 11 dígitos (DDD + número)".into()));
        }

        if !self.landline.is_empty() && !LANDLINE_REGEX.is_match(&self.landline) {
            return Err(Error::Validation("Telefone deve ter 10 dígitos (DDD + número)".into()));
        }
        Ok(())
    }

    pub fn to_new_contact(&self) -> NewContact {
        NewContact::new(&self.name, &self.email, &self.mobile)
            .with_landline(&self.landline)
    }

    /// The mobile number is left out: it cannot change after creation.
    pub fn to_update(&self) -> ContactUpdate {
        ContactUpdate::new()
            .with_name(&self.name)
            .with_email(&self.email)
            .with_landline(&self.landline)
    }
}
