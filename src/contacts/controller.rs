use std::sync::Arc;
use log::{debug, info, warn};

use crate::{
    Error,
    error::Result,
    http::Notifier,
};

use super::{
    contact::Contact,
    directory::DirectoryClient,
    filter::{self, ContactFilter},
    validation::ContactForm,
};

const MSG_LOAD_FAILED: &str         = "Erro ao carregar contatos";
const MSG_DEACTIVATE_FAILED: &str   = "Erro ao inativar contato";
const MSG_REACTIVATE_FAILED: &str   = "Erro ao reativar contato";
const MSG_FAVORITE_FAILED: &str     = "Erro ao alterar favorito";
const MSG_SAVE_FAILED: &str         = "Erro ao salvar contato";
const MSG_NOT_FOUND: &str           = "Contato não encontrado";

/// In-memory mirror of one `list` call plus the search box state.
///
/// Every mutation reloads the whole list from the backend instead of
/// merging the change locally. The favorite toggle is the one exception:
/// it patches the affected entry in place.
pub struct ContactListController {
    directory   : DirectoryClient,
    notifier    : Arc<Notifier>,

    contacts    : Vec<Contact>,
    filter      : ContactFilter,
    search      : String,

    loading     : bool,
    error       : Option<String>,
}

impl ContactListController {
    pub fn new(directory: DirectoryClient, filter: ContactFilter) -> Self {
        let notifier = directory.api().notifier().clone();
        Self {
            directory,
            notifier,
            contacts: Vec::new(),
            filter,
            search  : String::new(),
            loading : false,
            error   : None,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The loaded contacts that match the current search term.
    pub fn visible(&self) -> Vec<&Contact> {
        self.contacts.iter()
            .filter(|c| filter::matches_term(c, &self.search))
            .collect()
    }

    pub fn contact(&self, id: u64) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn user_message(err: &Error, fallback: &str) -> String {
        err.server_message().unwrap_or(fallback).to_string()
    }

    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        self.error = None;

        let result = self.directory.list(&self.filter).await;
        self.loading = false;

        match result {
            Ok(contacts) => {
                debug!("Loaded {} contacts", contacts.len());
                self.contacts = contacts;
                Ok(())
            },
            Err(e) => {
                let message = Self::user_message(&e, MSG_LOAD_FAILED);
                warn!("Loading contacts failed: {e}");
                self.notifier.error(&message);
                self.error = Some(message);
                Err(e)
            }
        }
    }

    /// Merges `partial` into the current filter and reloads.
    pub async fn update_filters(&mut self, partial: &ContactFilter) -> Result<()> {
        self.filter.merge(partial);
        self.load().await
    }

    /// Load failures after a successful mutation are already recorded in
    /// `error()`, so they do not fail the mutation itself.
    async fn reload(&mut self) {
        _ = self.load().await;
    }

    pub async fn toggle_favorite(&mut self, id: u64) -> Result<Contact> {
        let Some(current) = self.contact(id) else {
            self.notifier.error(MSG_NOT_FOUND);
            return Err(Error::State(MSG_NOT_FOUND.into()));
        };

        let favorite = !current.is_favorite();
        let updated = self.directory.set_favorite(id, favorite).await.map_err(|e| {
            self.notifier.error(&Self::user_message(&e, MSG_FAVORITE_FAILED));
            e
        })?;

        if let Some(entry) = self.contacts.iter_mut().find(|c| c.id() == id) {
            *entry = updated.clone();
        }

        self.notifier.success(match updated.is_favorite() {
            true => "Contato adicionado aos favoritos!",
            false => "Contato removido dos favoritos!",
        });
        Ok(updated)
    }

    pub async fn deactivate(&mut self, id: u64) -> Result<()> {
        self.directory.deactivate(id).await.map_err(|e| {
            self.notifier.error(&Self::user_message(&e, MSG_DEACTIVATE_FAILED));
            e
        })?;

        info!("Contact {} deactivated", id);
        self.reload().await;
        self.notifier.success("Contato inativado com sucesso!");
        Ok(())
    }

    pub async fn reactivate(&mut self, id: u64) -> Result<Contact> {
        let contact = self.directory.reactivate(id).await.map_err(|e| {
            self.notifier.error(&Self::user_message(&e, MSG_REACTIVATE_FAILED));
            e
        })?;

        info!("Contact {} reactivated", id);
        self.reload().await;
        self.notifier.success("Contato reativado com sucesso!");
        Ok(contact)
    }

    /// Submits the create/edit form: `editing` is the id of the contact
    /// being edited, `None` creates a new one.
    pub async fn save(&mut self, editing: Option<u64>, form: &ContactForm) -> Result<Contact> {
        form.validate()?;

        let result = match editing {
            Some(id) => self.directory.update(id, &form.to_update()).await,
            None => self.directory.create(&form.to_new_contact()).await,
        };

        let contact = result.map_err(|e| {
            self.notifier.error(&Self::user_message(&e, MSG_SAVE_FAILED));
            e
        })?;

        match editing {
            Some(_) => {
                info!("Contact {} updated", contact.id());
                self.notifier.success("Contato atualizado com sucesso!");
            },
            None => {
                info!("Contact {} created", contact.id());
                self.notifier.success("Contato criado com sucesso!");
            }
        }

        self.reload().await;
        Ok(contact)
    }
}
