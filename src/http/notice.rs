use std::fmt;
use std::sync::Mutex;

use crate::Error;

pub const MSG_SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";
pub const MSG_FORBIDDEN: &str       = "Acesso negado. Você não tem permissão para esta ação.";
pub const MSG_NOT_FOUND: &str       = "Recurso não encontrado.";
pub const MSG_SERVER_ERROR: &str    = "Erro interno do servidor. Tente novamente mais tarde.";
pub const MSG_GENERIC_ERROR: &str   = "Erro ao processar requisição.";
pub const MSG_NO_RESPONSE: &str     = "Sem resposta do servidor. Verifique sua conexão.";
pub const MSG_BAD_REQUEST: &str     = "Erro ao configurar requisição.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient, user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    level   : NoticeLevel,
    message : String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string()
        }
    }

    pub fn success(message: &str) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: &str) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn level(&self) -> NoticeLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "OK",
            NoticeLevel::Info    => "INFO",
            NoticeLevel::Error   => "ERROR",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

pub trait NoticeListener: Send + Sync {
    fn on_notice(&self, _notice: &Notice) {}
}

/// Fans notices out to every registered listener.
#[derive(Default)]
pub struct Notifier {
    listeners: Mutex<Vec<Box<dyn NoticeListener>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: impl NoticeListener + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    pub fn notify(&self, notice: Notice) {
        if let Ok(listeners) = self.listeners.lock() {
            listeners.iter().for_each(|l| l.on_notice(&notice));
        }
    }

    pub fn success(&self, message: &str) {
        self.notify(Notice::success(message))
    }

    pub fn info(&self, message: &str) {
        self.notify(Notice::info(message))
    }

    pub fn error(&self, message: &str) {
        self.notify(Notice::error(message))
    }
}

/// Text shown to the user for a failed request.
pub fn error_notice(err: &Error) -> String {
    match err {
        Error::Http(401, _) => MSG_SESSION_EXPIRED.into(),
        Error::Http(403, _) => MSG_FORBIDDEN.into(),
        Error::Http(404, _) => MSG_NOT_FOUND.into(),
        Error::Http(500, _) => MSG_SERVER_ERROR.into(),
        Error::Http(_, msg) => msg.clone().unwrap_or_else(|| MSG_GENERIC_ERROR.into()),
        Error::Network(_)   => MSG_NO_RESPONSE.into(),
        Error::Request(_)   => MSG_BAD_REQUEST.into(),
        _ => MSG_GENERIC_ERROR.into(),
    }
}
