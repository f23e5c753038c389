use std::sync::Arc;
use std::time::Duration;

use crate::Error;
use crate::http::{
    api_client::{self, APIClient},
    notice::Notifier,
};
use crate::session::{
    MemoryStorage,
    Navigator,
    SessionStore,
};

fn client(base_url: &str) -> crate::error::Result<APIClient> {
    APIClient::new(
        base_url,
        Duration::from_secs(1),
        SessionStore::shared(Box::new(MemoryStorage::new())),
        Arc::new(Navigator::default()),
        Arc::new(Notifier::new())
    )
}

#[test]
fn test_server_message() {
    assert_eq!(api_client::server_message(r#"{"message":"Email inválido"}"#).as_deref(), Some("Email inválido"));
    assert_eq!(api_client::server_message(r#"{"mensagem":"Contato não encontrado"}"#).as_deref(), Some("Contato não encontrado"));
    assert_eq!(api_client::server_message(r#"{"error":"Bad Request"}"#).as_deref(), Some("Bad Request"));
    assert_eq!(api_client::server_message(r#"{"message":"","error":"fallback"}"#).as_deref(), Some("fallback"));
    assert_eq!(api_client::server_message(r#"{"success":false}"#), None);
    assert_eq!(api_client::server_message("<html>oops</html>"), None);
    assert_eq!(api_client::server_message(""), None);
}

#[test]
fn test_new_client() {
    let api = client("http://localhost:3333").unwrap();
    assert_eq!(api.base_url().as_str(), "http://localhost:3333/");
    assert!(!api.session().lock().unwrap().is_authenticated());

    assert!(matches!(client("localhost without scheme"), Err(Error::Argument(_))));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap()
        .local_addr().unwrap()
        .port();

    let api = client(&format!("http://127.0.0.1:{port}")).unwrap();
    let result = api.get::<serde_json::Value>("/api/contatos", &[]).await;
    assert!(matches!(result, Err(Error::Network(_))));
}
