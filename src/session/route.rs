use std::fmt;
use std::sync::Mutex;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Contacts,
    InactiveContacts,
    Favorites,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login            => "/login",
            Route::Contacts         => "/",
            Route::InactiveContacts => "/?inativos=true",
            Route::Favorites        => "/favoritos",
        }
    }

    pub fn is_private(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Unknown paths fall back to the contact list.
    pub fn from_path(path: &str) -> Self {
        let (base, query) = match path.split_once('?') {
            Some((b, q)) => (b, Some(q)),
            None => (path, None),
        };

        match base {
            "/login" => Route::Login,
            "/favoritos" => Route::Favorites,
            "/" if query.map_or(false, |q| {
                q.split('&').any(|kv| kv == "inativos=true")
            }) => Route::InactiveContacts,
            _ => Route::Contacts,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Holds the route currently shown to the user.
pub struct Navigator {
    current: Mutex<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            current: Mutex::new(initial)
        }
    }

    pub fn current(&self) -> Route {
        self.current.lock().map(|v| *v).unwrap_or(Route::Login)
    }

    pub fn navigate(&self, route: Route) {
        debug!("Navigating to {}", route);
        if let Ok(mut current) = self.current.lock() {
            *current = route;
        }
    }

    /// Resolves the route the user may actually see: private routes
    /// require a session.
    pub fn guard(route: Route, authenticated: bool) -> Route {
        if route.is_private() && !authenticated {
            Route::Login
        } else {
            route
        }
    }

    /// Navigates to `route` through the guard and returns where the user
    /// ended up.
    pub fn visit(&self, route: Route, authenticated: bool) -> Route {
        let target = Self::guard(route, authenticated);
        self.navigate(target);
        target
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}
