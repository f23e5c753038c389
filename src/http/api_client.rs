use std::sync::Arc;
use std::time::Duration;
use log::{debug, warn, error};
use reqwest::{Client, Method, header};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    Error,
    error::Result,
    config::Config,
    session::{
        route::{Navigator, Route},
        store::SharedSession,
    },
};

use super::notice::{self, Notifier};

/// Thin wrapper over `reqwest::Client` shared by every backend call.
///
/// It attaches the bearer token of the current session, applies one overall
/// request timeout, and turns failed responses into notices. A 401 also
/// destroys the local session and sends the user back to `/login`.
pub struct APIClient {
    base_url    : Url,
    client      : Client,

    session     : SharedSession,
    navigator   : Arc<Navigator>,
    notifier    : Arc<Notifier>,
}

impl APIClient {
    pub fn new(base_url: &str,
        timeout: Duration,
        session: SharedSession,
        navigator: Arc<Navigator>,
        notifier: Arc<Notifier>
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::Argument(format!("Invalid api url {base_url}: {e}"))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::Request(format!("Http error: creating http client error {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            session,
            navigator,
            notifier,
        })
    }

    pub fn from_config(cfg: &dyn Config,
        session: SharedSession,
        navigator: Arc<Navigator>,
        notifier: Arc<Notifier>
    ) -> Result<Self> {
        Self::new(cfg.api_url(), cfg.timeout(), session, navigator, notifier)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where T: DeserializeOwned {
        self.request::<(), T>(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        self.request(Method::PATCH, path, &[], body).await
    }

    // The base url may carry a path prefix, so paths are appended rather
    // than resolved with `Url::join`.
    fn url(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path)).map_err(|e| {
            self.fail(Error::Request(format!("Http error: invalid request url {path}: {e}")))
        })
    }

    fn token(&self) -> Option<String> {
        self.session.lock().ok().and_then(|s| s.token())
    }

    async fn request<B, T>(&self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>
    ) -> Result<T>
    where B: Serialize + ?Sized, T: DeserializeOwned {
        let url = self.url(path)?;
        let mut builder = self.client.request(method.clone(), url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }

        debug!("{} {}", method, path);
        let rsp = builder.send().await.map_err(|e| self.fail(Error::from(e)))?;

        let status = rsp.status();
        let text = rsp.text().await.map_err(|e| self.fail(Error::from(e)))?;

        if !status.is_success() {
            let message = server_message(&text);
            return Err(self.fail(Error::Http(status.as_u16(), message)));
        }

        debug!("{} {} -> {}", method, path, status.as_u16());

        // Acknowledgment-only endpoints may answer with an empty body.
        let text = match text.trim().is_empty() {
            true => "null",
            false => text.as_str(),
        };
        serde_json::from_str::<T>(text).map_err(|e| {
            Error::Protocol(format!("Http error: deserialize json error {e}"))
        })
    }

    fn fail(&self, err: Error) -> Error {
        if err.is_unauthorized() {
            warn!("Session rejected by the server, clearing local session");
            match self.session.lock() {
                Ok(mut session) => {
                    _ = session.clear().map_err(|e| {
                        error!("Clearing session error: {e}");
                    });
                },
                Err(_) => error!("Session store is poisoned"),
            }
            self.navigator.navigate(Route::Login);
        } else {
            warn!("Request failed: {err}");
        }

        self.notifier.error(&notice::error_notice(&err));
        err
    }
}

/// Picks the human readable message out of an error body, which the
/// backend names `message`, `mensagem` or `error`.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    ["message", "mensagem", "error"].iter()
        .filter_map(|key| value.get(*key))
        .filter_map(|v| v.as_str())
        .find(|v| !v.is_empty())
        .map(|v| v.to_string())
}
