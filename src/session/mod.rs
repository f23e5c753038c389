pub mod auth;
pub mod route;
pub mod session_listener;
pub mod storage;
pub mod store;
pub mod user;


pub use auth::{AuthManager, AuthState};
pub use route::{Navigator, Route};
pub use session_listener::SessionListener;
pub use storage::{Storage, FileStorage, MemoryStorage};
pub use store::{SessionStore, SharedSession};
pub use user::User;
