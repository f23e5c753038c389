use crate::session::Route;
use super::contact::Contact;

/// Server-side list predicates. Each one is optional and they combine
/// with AND on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFilter {
    only_active     : Option<bool>,
    only_inactive   : Option<bool>,
    only_favorites  : Option<bool>,
}

impl ContactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_active(mut self, value: bool) -> Self {
        self.only_active = Some(value);
        self
    }

    pub fn with_only_inactive(mut self, value: bool) -> Self {
        self.only_inactive = Some(value);
        self
    }

    pub fn with_only_favorites(mut self, value: bool) -> Self {
        self.only_favorites = Some(value);
        self
    }

    /// The listing each page of the application starts from.
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::InactiveContacts => Self::new().with_only_inactive(true),
            Route::Favorites => Self::new().with_only_favorites(true),
            _ => Self::new(),
        }
    }

    pub fn only_active(&self) -> Option<bool> {
        self.only_active
    }

    pub fn only_inactive(&self) -> Option<bool> {
        self.only_inactive
    }

    pub fn only_favorites(&self) -> Option<bool> {
        self.only_favorites
    }

    /// Overlays the predicates set in `other`, keeping the rest.
    pub fn merge(&mut self, other: &ContactFilter) {
        if other.only_active.is_some() {
            self.only_active = other.only_active;
        }
        if other.only_inactive.is_some() {
            self.only_inactive = other.only_inactive;
        }
        if other.only_favorites.is_some() {
            self.only_favorites = other.only_favorites;
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("apenasAtivos",    self.only_active),
            ("apenasInativos",  self.only_inactive),
            ("apenasFavoritos", self.only_favorites),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v.to_string())))
        .collect()
    }
}

/// Free-text match used by the search box: case-insensitive substring
/// over name, email, mobile and landline. An empty term matches all.
pub fn matches_term(contact: &Contact, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    contact.name().to_lowercase().contains(&term) ||
        contact.email().to_lowercase().contains(&term) ||
        contact.mobile().to_lowercase().contains(&term) ||
        contact.landline().map_or(false, |v| v.to_lowercase().contains(&term))
}
