pub mod core;
pub mod http;
pub mod session;
pub mod contacts;
pub mod client;

pub use crate::core::{
    error::{self, Error},
    config,
    logger,
    default_configuration as configuration,
};

pub use crate::http::{
    APIClient,
    Notice,
    NoticeLevel,
    NoticeListener,
    Notifier,
};

pub use crate::session::{
    AuthManager,
    AuthState,
    Navigator,
    Route,
    SessionListener,
    SessionStore,
    User,
};

pub use crate::contacts::{
    Contact,
    ContactFilter,
    ContactForm,
    ContactListController,
    ContactUpdate,
    DirectoryClient,
    NewContact,
};

pub use crate::client::{
    Client,
    ClientBuilder,
};
