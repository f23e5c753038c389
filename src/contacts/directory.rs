use std::sync::Arc;
use log::debug;
use serde::{Serialize, Deserialize, de::DeserializeOwned};

use crate::{
    Error,
    error::Result,
    http::APIClient,
};

use super::{
    contact::{Contact, NewContact, ContactUpdate},
    filter::ContactFilter,
};

const BASE_PATH: &str = "/api/contatos";

#[derive(Deserialize)]
struct DataResponse<T> {
    data: Option<T>,
}

impl<T: DeserializeOwned> DataResponse<T> {
    fn into_data(self) -> Result<T> {
        self.data.ok_or_else(|| {
            Error::Protocol("Http error: missing data in the response body".into())
        })
    }
}

#[derive(Deserialize)]
struct Ack {
    #[allow(dead_code)]
    message: Option<String>,
}

#[derive(Serialize)]
struct FavoriteData {
    #[serde(rename = "favorito")]
    favorite: bool,
}

/// Request set over the contacts resource. It keeps no state of its own
/// and passes backend validation failures through untouched.
#[derive(Clone)]
pub struct DirectoryClient {
    api: Arc<APIClient>,
}

impl DirectoryClient {
    pub fn new(api: Arc<APIClient>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<APIClient> {
        &self.api
    }

    /// The backend answers with the complete matching set.
    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>> {
        let query = filter.to_query();
        debug!("Listing contacts with {:?}", query);
        self.api.get::<DataResponse<Vec<Contact>>>(BASE_PATH, &query)
            .await?
            .into_data()
    }

    pub async fn get(&self, id: u64) -> Result<Contact> {
        self.api.get::<DataResponse<Contact>>(&format!("{BASE_PATH}/{id}"), &[])
            .await?
            .into_data()
    }

    pub async fn list_favorites(&self) -> Result<Vec<Contact>> {
        self.list(&ContactFilter::new().with_only_favorites(true)).await
    }

    pub async fn create(&self, contact: &NewContact) -> Result<Contact> {
        self.api.post::<_, DataResponse<Contact>>(BASE_PATH, contact)
            .await?
            .into_data()
    }

    pub async fn update(&self, id: u64, update: &ContactUpdate) -> Result<Contact> {
        self.api.put::<_, DataResponse<Contact>>(&format!("{BASE_PATH}/{id}"), update)
            .await?
            .into_data()
    }

    pub async fn set_favorite(&self, id: u64, favorite: bool) -> Result<Contact> {
        self.api.patch::<_, DataResponse<Contact>>(
            &format!("{BASE_PATH}/{id}/favorito"),
            Some(&FavoriteData { favorite })
        ).await?.into_data()
    }

    /// Soft delete; the backend only acknowledges.
    pub async fn deactivate(&self, id: u64) -> Result<()> {
        self.api.patch::<(), Option<Ack>>(&format!("{BASE_PATH}/{id}/inativar"), None)
            .await
            .map(|_| ())
    }

    pub async fn reactivate(&self, id: u64) -> Result<Contact> {
        self.api.patch::<(), DataResponse<Contact>>(&format!("{BASE_PATH}/{id}/reativar"), None)
            .await?
            .into_data()
    }
}
