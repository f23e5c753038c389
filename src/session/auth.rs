use std::fmt;
use std::sync::Arc;
use log::{debug, info, warn};
use serde::{Serialize, Deserialize};

use crate::{
    Error,
    error::Result,
    http::APIClient,
};

use super::{
    route::Route,
    session_listener::SessionListener,
    user::User,
};

pub const CODE_LENGTH: usize = 6;

const MSG_CODE_SENT: &str       = "Código enviado com sucesso!";
const MSG_DELIVERY_FAILED: &str = "Falha ao enviar código. Verifique o email informado.";
const MSG_INVALID_CODE: &str    = "Código inválido ou expirado";
const MSG_EMPTY_EMAIL: &str     = "Preencha o email";
const MSG_EMPTY_CODE: &str      = "Preencha o código";
const MSG_CODE_LENGTH: &str     = "O código deve ter exatamente 6 dígitos";
const MSG_LOGGED_OUT: &str      = "Você saiu do sistema.";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Unauthenticated,
    CodeSent(String),
    Authenticated(User),
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unauthenticated  => write!(f, "unauthenticated"),
            AuthState::CodeSent(email)  => write!(f, "code-sent({})", email),
            AuthState::Authenticated(u) => write!(f, "authenticated({})", u.email()),
        }
    }
}

#[derive(Serialize)]
struct SendCodeData<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct SendCodeResponse {
    message : Option<String>,
}

#[derive(Serialize)]
struct VerifyCodeData<'a> {
    email: &'a str,
    code : &'a str,
}

#[derive(Deserialize)]
struct VerifyCodeResponse {
    token   : Option<String>,
    email   : Option<String>,
}

/// Drives the email one-time-code login and owns every write to the
/// persisted session.
pub struct AuthManager {
    api     : Arc<APIClient>,
    state   : AuthState,
    loading : bool,

    listeners: Vec<Box<dyn SessionListener>>,
}

impl AuthManager {
    /// Creates the manager and restores a previously persisted session.
    pub fn new(api: Arc<APIClient>) -> Self {
        let mut manager = Self {
            api,
            state   : AuthState::Unauthenticated,
            loading : false,
            listeners: Vec::new(),
        };
        manager.restore();
        manager
    }

    pub fn add_listener(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn add_boxed_listener(&mut self, listener: Box<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reads the persisted session, which a 401 may have destroyed behind
    /// the manager's back.
    pub fn is_authenticated(&self) -> bool {
        self.api.session().lock()
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Starts authenticated only when both token and user are stored.
    /// A half-present session is cleared.
    pub fn restore(&mut self) {
        let restored = match self.api.session().lock() {
            Ok(mut s) => {
                if s.is_incomplete() {
                    warn!("Stored session is incomplete, clearing it");
                    _ = s.clear().map_err(|e| {
                        warn!("Clearing session error: {e}");
                    });
                }
                s.token().and(s.user())
            },
            Err(_) => None,
        };

        self.state = match restored {
            Some(user) => {
                info!("Restored session of {}", user.email());
                AuthState::Authenticated(user)
            },
            None => AuthState::Unauthenticated,
        };
    }

    /// Drops an authenticated state whose stored session has vanished.
    pub fn sync(&mut self) {
        if matches!(self.state, AuthState::Authenticated(_)) && !self.is_authenticated() {
            info!("Stored session is gone, back to unauthenticated");
            self.state = AuthState::Unauthenticated;
            self.listeners.iter().for_each(|l| l.on_logged_out());
        }
    }

    pub async fn request_code(&mut self, email: &str) -> Result<String> {
        if let AuthState::Authenticated(_) = self.state {
            return Err(Error::State("Already authenticated, log out first".into()));
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(Error::Validation(MSG_EMPTY_EMAIL.into()));
        }

        debug!("Requesting login code for {}", email);
        self.loading = true;
        let result = self.api.post::<_, SendCodeResponse>(
            "/api/auth/send-code",
            &SendCodeData { email }
        ).await;
        self.loading = false;

        let data = match result {
            Ok(v) => v,
            Err(e) => {
                warn!("Sending login code to {} failed: {e}", email);
                self.state = AuthState::Unauthenticated;
                self.api.notifier().error(MSG_DELIVERY_FAILED);
                return Err(Error::Delivery(e.server_message()
                    .unwrap_or(MSG_DELIVERY_FAILED)
                    .to_string()
                ));
            }
        };

        let message = data.message
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| MSG_CODE_SENT.into());

        self.api.notifier().success(&message);
        self.state = AuthState::CodeSent(email.to_string());
        self.listeners.iter().for_each(|l| l.on_code_sent(email));

        info!("Login code sent to {}", email);
        Ok(message)
    }

    pub async fn verify_code(&mut self, email: &str, code: &str) -> Result<User> {
        let email = email.trim();
        let code = code.trim();
        check_code(code)?;

        if let AuthState::Authenticated(_) = self.state {
            return Err(Error::State("Already authenticated, log out first".into()));
        }

        debug!("Verifying login code for {}", email);
        self.loading = true;
        let result = self.api.post::<_, VerifyCodeResponse>(
            "/api/auth/verify-code",
            &VerifyCodeData { email, code }
        ).await;
        self.loading = false;

        let data = match result {
            Ok(v) => v,
            Err(e) => {
                warn!("Login code for {} rejected: {e}", email);
                self.state = AuthState::CodeSent(email.to_string());
                return Err(Error::InvalidCode(e.server_message()
                    .unwrap_or(MSG_INVALID_CODE)
                    .to_string()
                ));
            }
        };

        let Some(token) = data.token.filter(|v| !v.is_empty()) else {
            self.state = AuthState::CodeSent(email.to_string());
            return Err(Error::Protocol("Http error: missing access token in the response body".into()));
        };

        let user = User::from_email(data.email.as_deref().unwrap_or(email));
        self.api.session().lock()
            .map_err(|_| Error::State("Session store is poisoned".into()))?
            .save(&token, &user)?;

        self.state = AuthState::Authenticated(user.clone());
        self.api.notifier().success(&format!("Bem-vindo, {}!", user.name()));
        self.api.navigator().navigate(Route::Contacts);
        self.listeners.iter().for_each(|l| l.on_authenticated(&user));

        info!("Signed in as {}", user.email());
        Ok(user)
    }

    /// Leaves the code step to type another address.
    pub fn back_to_email(&mut self) {
        if let AuthState::CodeSent(_) = self.state {
            self.state = AuthState::Unauthenticated;
        }
    }

    pub fn logout(&mut self) {
        if let Ok(mut session) = self.api.session().lock() {
            _ = session.clear().map_err(|e| {
                warn!("Clearing session error: {e}");
            });
        }

        let was_authenticated = matches!(self.state, AuthState::Authenticated(_));
        self.state = AuthState::Unauthenticated;
        self.api.notifier().info(MSG_LOGGED_OUT);
        self.api.navigator().navigate(Route::Login);

        if was_authenticated {
            info!("Signed out");
            self.listeners.iter().for_each(|l| l.on_logged_out());
        }
    }
}

/// Codes are exactly six ASCII digits; anything else is refused before
/// touching the network.
pub fn check_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::Validation(MSG_EMPTY_CODE.into()));
    }
    if code.chars().count() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(MSG_CODE_LENGTH.into()));
    }
    Ok(())
}
