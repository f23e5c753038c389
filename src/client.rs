use std::sync::Arc;
use log::info;

use crate::{
    Error,
    error::Result,
    config::Config,
    http::{APIClient, NoticeListener, Notifier},
    session::{
        AuthManager,
        FileStorage,
        Navigator,
        Route,
        SessionListener,
        SessionStore,
        Storage,
    },
    contacts::{
        ContactFilter,
        ContactListController,
        DirectoryClient,
    },
};

/// Wires the session store, navigation, notices and the HTTP client
/// together into one [`Client`].
pub struct ClientBuilder<'a> {
    cfg         : Option<&'a dyn Config>,
    storage     : Option<Box<dyn Storage>>,
    notifier    : Arc<Notifier>,
    session_listeners: Vec<Box<dyn SessionListener>>,
}

impl<'a> ClientBuilder<'a> {
    pub fn new() -> Self {
        Self {
            cfg         : None,
            storage     : None,
            notifier    : Arc::new(Notifier::new()),
            session_listeners: Vec::new(),
        }
    }

    pub fn with_config(&mut self, cfg: &'a dyn Config) -> &mut Self {
        self.cfg = Some(cfg);
        self
    }

    /// Overrides the default file storage under the config's data dir.
    pub fn with_storage(&mut self, storage: impl Storage + 'static) -> &mut Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn with_notice_listener(&mut self, listener: impl NoticeListener + 'static) -> &mut Self {
        self.notifier.add_listener(listener);
        self
    }

    pub fn with_session_listener(&mut self, listener: impl SessionListener + 'static) -> &mut Self {
        self.session_listeners.push(Box::new(listener));
        self
    }

    pub fn build(&mut self) -> Result<Client> {
        let Some(cfg) = self.cfg else {
            return Err(Error::Argument("Missing configuration!!!".into()));
        };

        let storage = match self.storage.take() {
            Some(v) => v,
            None => Box::new(FileStorage::open(cfg.data_dir())?),
        };

        let session = SessionStore::shared(storage);
        let authenticated = session.lock()
            .map(|s| s.is_authenticated())
            .unwrap_or(false);

        let navigator = Arc::new(Navigator::new(match authenticated {
            true => Route::Contacts,
            false => Route::Login,
        }));

        let api = Arc::new(APIClient::from_config(
            cfg,
            session,
            navigator,
            self.notifier.clone()
        )?);

        let mut auth = AuthManager::new(api.clone());
        self.session_listeners.drain(..).for_each(|l| auth.add_boxed_listener(l));

        info!("Contacts client ready for {}", api.base_url());
        Ok(Client {
            directory: DirectoryClient::new(api.clone()),
            api,
            auth,
        })
    }
}

impl<'a> Default for ClientBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Client {
    api         : Arc<APIClient>,
    auth        : AuthManager,
    directory   : DirectoryClient,
}

impl Client {
    pub fn api(&self) -> &Arc<APIClient> {
        &self.api
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthManager {
        &mut self.auth
    }

    pub fn directory(&self) -> &DirectoryClient {
        &self.directory
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        self.api.navigator()
    }

    pub fn current_route(&self) -> Route {
        self.api.navigator().current()
    }

    /// Navigates through the route guard, first dropping an in-memory
    /// login that the server has since revoked.
    pub fn visit(&mut self, route: Route) -> Route {
        self.auth.sync();
        let authenticated = self.auth.is_authenticated();
        self.api.navigator().visit(route, authenticated)
    }

    /// A list controller preset with the filter of `route`.
    pub fn contact_list(&self, route: Route) -> ContactListController {
        ContactListController::new(self.directory.clone(), ContactFilter::for_route(route))
    }
}
