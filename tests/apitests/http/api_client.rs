use std::time::Duration;
use contacts::{
    http::notice::{MSG_NOT_FOUND, MSG_NO_RESPONSE, MSG_SESSION_EXPIRED},
    session::store::{TOKEN_KEY, USER_KEY},
    AuthState,
    Error,
    NoticeLevel,
    Route,
};

use crate::{
    build_client_with_timeout,
    signed_in_client,
    signed_in_storage,
    stored,
    stub_backend::{self, VALID_TOKEN},
};

/*  APIs for testcase
 - bearer token attached from the session      [V]
 - 401 destroys the session, goes to /login    [V]
 - error notices by status                     [V]
 - server message passthrough                  [V]
 - overall request timeout                     [V]
 */

#[tokio::test]
async fn test_bearer_token() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (client, notices) = signed_in_client(&url, VALID_TOKEN);

    let contacts = client.directory().list(&Default::default()).await.unwrap();
    assert_eq!(contacts.len(), 4);
    assert!(notices.all().is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (mut client, notices) = signed_in_client(&url, "expired");

    assert!(matches!(client.auth().state(), AuthState::Authenticated(_)));
    assert_eq!(client.current_route(), Route::Contacts);

    let result = client.directory().list(&Default::default()).await;
    assert_eq!(result, Err(Error::Http(401, Some("Token inválido".into()))));

    assert_eq!(stored(&client, TOKEN_KEY), None);
    assert_eq!(stored(&client, USER_KEY), None);
    assert!(!client.auth().is_authenticated());
    assert_eq!(client.current_route(), Route::Login);
    assert_eq!(notices.messages(NoticeLevel::Error), vec![MSG_SESSION_EXPIRED.to_string()]);

    // the in-memory login follows once the user moves on
    assert_eq!(client.visit(Route::Contacts), Route::Login);
    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_not_found() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (client, notices) = signed_in_client(&url, VALID_TOKEN);

    let result = client.directory().get(99).await;
    assert_eq!(result, Err(Error::Http(404, Some("Contato não encontrado".into()))));
    assert_eq!(notices.messages(NoticeLevel::Error), vec![MSG_NOT_FOUND.to_string()]);

    // only a 401 touches the session
    assert_eq!(stored(&client, TOKEN_KEY).as_deref(), Some(VALID_TOKEN));
    assert_eq!(client.current_route(), Route::Contacts);
}

#[tokio::test]
async fn test_validation_message_passthrough() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (client, notices) = signed_in_client(&url, VALID_TOKEN);

    let duplicate = contacts::NewContact::new("Outro João", "outro@email.com", "11999887766");
    let result = client.directory().create(&duplicate).await;

    let message = "Já existe um contato com este celular.";
    assert_eq!(result, Err(Error::Http(409, Some(message.into()))));
    assert_eq!(result.unwrap_err().server_message(), Some(message));
    assert_eq!(notices.messages(NoticeLevel::Error), vec![message.to_string()]);
}

#[tokio::test]
async fn test_request_timeout() {
    let backend = stub_backend::seeded();
    backend.lock().unwrap().delay = Some(Duration::from_millis(2000));
    let url = stub_backend::spawn(backend).await;
    let (client, notices) = build_client_with_timeout(&url, signed_in_storage(VALID_TOKEN), 200);

    let result = client.directory().list(&Default::default()).await;
    assert!(matches!(result, Err(Error::Network(_))), "{:?}", result);
    assert_eq!(notices.messages(NoticeLevel::Error), vec![MSG_NO_RESPONSE.to_string()]);

    // a timeout is not a rejected session
    assert_eq!(stored(&client, TOKEN_KEY).as_deref(), Some(VALID_TOKEN));
    assert_eq!(client.current_route(), Route::Contacts);
}
