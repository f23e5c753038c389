use std::sync::{Arc, Mutex};
use contacts::{
    session::{
        MemoryStorage,
        Storage,
        store::{TOKEN_KEY, USER_KEY},
    },
    AuthState,
    Error,
    NoticeLevel,
    Route,
    SessionListener,
    User,
};

use crate::{
    anonymous_client,
    build_client,
    signed_in_client,
    stored,
    stub_backend::{self, REJECTED_EMAIL, VALID_CODE, VALID_TOKEN},
};

/*  APIs for testcase
 - AuthManager::request_code(..)    [V]
 - AuthManager::verify_code(..)     [V]
 - AuthManager::back_to_email()     [V]
 - AuthManager::logout()            [V]
 - AuthManager::restore()           [V]
 - AuthManager::sync()              [V]
 - Client::visit(..)                [V]
 */

const EMAIL: &str = "joao@email.com";

#[derive(Clone, Default)]
struct Events(Arc<Mutex<Vec<String>>>);

impl SessionListener for Events {
    fn on_code_sent(&self, email: &str) {
        self.0.lock().unwrap().push(format!("code-sent:{email}"));
    }
    fn on_authenticated(&self, user: &User) {
        self.0.lock().unwrap().push(format!("authenticated:{}", user.email()));
    }
    fn on_logged_out(&self) {
        self.0.lock().unwrap().push("logged-out".into());
    }
}

#[tokio::test]
async fn test_login_flow() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend.clone()).await;
    let (mut client, notices) = anonymous_client(&url);
    let events = Events::default();
    client.auth_mut().add_listener(events.clone());

    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
    assert_eq!(client.current_route(), Route::Login);

    let message = client.auth_mut().request_code(EMAIL).await.unwrap();
    assert_eq!(message, "Código enviado para joao@email.com");
    assert_eq!(client.auth().state(), &AuthState::CodeSent(EMAIL.into()));
    assert_eq!(notices.messages(NoticeLevel::Success), vec![message.clone()]);
    assert!(!client.auth().is_loading());

    let user = client.auth_mut().verify_code(EMAIL, VALID_CODE).await.unwrap();
    assert_eq!(user.name(), "joao");
    assert_eq!(user.email(), EMAIL);
    assert_eq!(client.auth().user(), Some(&user));
    assert!(client.auth().is_authenticated());
    assert_eq!(stored(&client, TOKEN_KEY).as_deref(), Some(VALID_TOKEN));
    assert!(stored(&client, USER_KEY).unwrap().contains("\"nome\":\"joao\""));
    assert_eq!(client.current_route(), Route::Contacts);
    assert_eq!(notices.last().unwrap().message(), "Bem-vindo, joao!");

    assert_eq!(*events.0.lock().unwrap(), vec![
        format!("code-sent:{EMAIL}"),
        format!("authenticated:{EMAIL}"),
    ]);
    assert_eq!(backend.lock().unwrap().hits, 2);
}

#[tokio::test]
async fn test_request_code_checks() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend.clone()).await;
    let (mut client, _) = anonymous_client(&url);

    let result = client.auth_mut().request_code("   ").await;
    assert_eq!(result, Err(Error::Validation("Preencha o email".into())));
    assert_eq!(backend.lock().unwrap().hits, 0);

    let (mut signed, _) = signed_in_client(&url, VALID_TOKEN);
    let result = signed.auth_mut().request_code(EMAIL).await;
    assert!(matches!(result, Err(Error::State(_))));
    assert_eq!(backend.lock().unwrap().hits, 0);
}

#[tokio::test]
async fn test_request_code_rejected() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (mut client, notices) = anonymous_client(&url);

    let result = client.auth_mut().request_code(REJECTED_EMAIL).await;
    assert_eq!(result, Err(Error::Delivery("Email não cadastrado".into())));
    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
    assert!(notices.messages(NoticeLevel::Error)
        .contains(&"Falha ao enviar código. Verifique o email informado.".to_string()));
}

#[tokio::test]
async fn test_failed_resend_returns_to_email() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (mut client, _) = anonymous_client(&url);

    client.auth_mut().request_code(EMAIL).await.unwrap();
    assert_eq!(client.auth().state(), &AuthState::CodeSent(EMAIL.into()));

    let result = client.auth_mut().request_code(REJECTED_EMAIL).await;
    assert!(matches!(result, Err(Error::Delivery(_))));
    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_malformed_code_stays_local() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend.clone()).await;
    let (mut client, _) = anonymous_client(&url);
    client.auth_mut().request_code(EMAIL).await.unwrap();
    let hits = backend.lock().unwrap().hits;

    for code in ["", "12345", "1234567", "12a456"] {
        let result = client.auth_mut().verify_code(EMAIL, code).await;
        assert!(matches!(result, Err(Error::Validation(_))), "code {:?}", code);
    }

    assert_eq!(backend.lock().unwrap().hits, hits);
    assert_eq!(client.auth().state(), &AuthState::CodeSent(EMAIL.into()));
}

#[tokio::test]
async fn test_wrong_code() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (mut client, notices) = anonymous_client(&url);
    client.auth_mut().request_code(EMAIL).await.unwrap();
    notices.reset();

    let result = client.auth_mut().verify_code(EMAIL, "000000").await;
    assert_eq!(result, Err(Error::InvalidCode("Código expirado".into())));
    assert_eq!(client.auth().state(), &AuthState::CodeSent(EMAIL.into()));
    assert!(!client.auth().is_authenticated());
    assert_eq!(stored(&client, TOKEN_KEY), None);
    assert_eq!(notices.messages(NoticeLevel::Error), vec!["Código expirado".to_string()]);

    // a second attempt with the right code still succeeds
    let user = client.auth_mut().verify_code(EMAIL, VALID_CODE).await.unwrap();
    assert_eq!(user.email(), EMAIL);
}

#[tokio::test]
async fn test_back_to_email() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;
    let (mut client, _) = anonymous_client(&url);

    client.auth_mut().request_code(EMAIL).await.unwrap();
    client.auth_mut().back_to_email();
    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);

    client.auth_mut().request_code("maria@email.com").await.unwrap();
    assert_eq!(client.auth().state(), &AuthState::CodeSent("maria@email.com".into()));
}

#[tokio::test]
async fn test_restore_and_logout() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend.clone()).await;
    let (mut client, notices) = signed_in_client(&url, VALID_TOKEN);
    let events = Events::default();
    client.auth_mut().add_listener(events.clone());

    assert!(client.auth().is_authenticated());
    assert_eq!(client.auth().user().map(|u| u.email()), Some(EMAIL));
    assert_eq!(client.current_route(), Route::Contacts);

    client.auth_mut().logout();
    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
    assert_eq!(stored(&client, TOKEN_KEY), None);
    assert_eq!(stored(&client, USER_KEY), None);
    assert_eq!(client.current_route(), Route::Login);

    client.auth_mut().logout();
    assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
    assert_eq!(notices.messages(NoticeLevel::Info).len(), 2);
    assert_eq!(*events.0.lock().unwrap(), vec!["logged-out".to_string()]);
    assert_eq!(backend.lock().unwrap().hits, 0);
}

#[tokio::test]
async fn test_route_guard() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;

    let (mut anonymous, _) = anonymous_client(&url);
    assert_eq!(anonymous.visit(Route::Favorites), Route::Login);
    assert_eq!(anonymous.visit(Route::InactiveContacts), Route::Login);
    assert_eq!(anonymous.visit(Route::Login), Route::Login);

    let (mut signed, _) = signed_in_client(&url, VALID_TOKEN);
    assert_eq!(signed.visit(Route::Favorites), Route::Favorites);
    assert_eq!(signed.current_route(), Route::Favorites);
    assert_eq!(signed.visit(Route::from_path("/nao-existe")), Route::Contacts);
    assert_eq!(signed.visit(Route::Login), Route::Login);
}

#[tokio::test]
async fn test_half_present_session_is_dropped() {
    let backend = stub_backend::seeded();
    let url = stub_backend::spawn(backend).await;

    let mut token_only = MemoryStorage::new();
    token_only.set(TOKEN_KEY, VALID_TOKEN).unwrap();

    let mut unreadable_user = MemoryStorage::new();
    unreadable_user.set(TOKEN_KEY, VALID_TOKEN).unwrap();
    unreadable_user.set(USER_KEY, "not json").unwrap();

    for storage in [token_only, unreadable_user] {
        let (mut client, _) = build_client(&url, storage);

        assert_eq!(client.auth().state(), &AuthState::Unauthenticated);
        assert_eq!(client.auth().user(), None);
        assert!(!client.auth().is_authenticated());
        assert_eq!(client.current_route(), Route::Login);
        assert_eq!(stored(&client, TOKEN_KEY), None);
        assert_eq!(stored(&client, USER_KEY), None);

        assert_eq!(client.visit(Route::Favorites), Route::Login);
        assert_eq!(client.visit(Route::Contacts), Route::Login);

        // a fresh login goes through normally
        client.auth_mut().request_code(EMAIL).await.unwrap();
        client.auth_mut().verify_code(EMAIL, VALID_CODE).await.unwrap();
        assert!(client.auth().is_authenticated());
        assert_eq!(client.visit(Route::Favorites), Route::Favorites);
    }
}
