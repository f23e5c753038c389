use std::sync::{Arc, Mutex};
use log::warn;

use crate::error::Result;
use super::{
    storage::Storage,
    user::User,
};

pub const TOKEN_KEY: &str = "@UnimedContatos:token";
pub const USER_KEY: &str  = "@UnimedContatos:usuario";

pub type SharedSession = Arc<Mutex<SessionStore>>;

/// The persisted session: a bearer token and the cached user descriptor.
///
/// Anyone holding the store may read it; only the auth manager and the
/// 401 handler of the HTTP client write to it.
pub struct SessionStore {
    storage: Box<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn shared(storage: Box<dyn Storage>) -> SharedSession {
        Arc::new(Mutex::new(Self::new(storage)))
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|v| !v.is_empty())
    }

    pub fn user(&self) -> Option<User> {
        let data = self.storage.get(USER_KEY)?;
        serde_json::from_str::<User>(&data).map_err(|e| {
            warn!("Cached user entry is unreadable: {e}");
        }).ok()
    }

    /// A session needs both the token and a readable user entry.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.user().is_some()
    }

    /// True when only one of the two entries is usable.
    pub fn is_incomplete(&self) -> bool {
        self.token().is_some() != self.user().is_some()
    }

    pub(crate) fn save(&mut self, token: &str, user: &User) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &serde_json::to_string(user)?)
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        self.storage.as_mut()
    }
}
