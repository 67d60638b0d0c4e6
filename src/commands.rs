//! Command handlers behind the CLI subcommands.
//!
//! Each handler drives one gateway wrapper and returns the normalized
//! envelope. Login and logout also own the keychain side of the session,
//! which the gateway itself never touches.

use serde_json::{json, Value};

use freight_gateway::api::types::{
    CreateBidRequest, CreateShipmentRequest, LoginRequest, RegisterRequest,
    UpdateShipmentStatusRequest, UserRole,
};
use freight_gateway::api::{auth, bids, dev, shipments, ApiClient, ApiError, Envelope};
use freight_gateway::token::{TokenSink, TokenStoreError};

pub async fn register(
    api: &ApiClient,
    email: String,
    password: String,
    role: UserRole,
    name: String,
) -> Envelope<Value> {
    let req = RegisterRequest {
        email,
        password,
        role,
        name,
    };
    auth::register::<Value>(api, &req).await.into()
}

/// Log in and, when `save` is set, persist the returned token.
///
/// A keychain failure is logged but does not turn a successful login into an
/// error envelope.
pub async fn login(
    api: &ApiClient,
    tokens: &dyn TokenSink,
    email: String,
    password: String,
    save: bool,
) -> Envelope<Value> {
    log::info!("Logging in as {}", email);
    let result = auth::login::<Value>(api, &LoginRequest { email, password }).await;

    if save {
        if let Ok(ref data) = result {
            save_login_token(tokens, data);
        }
    }

    result.into()
}

/// Store `token` from a successful login payload. Returns whether anything was saved.
fn save_login_token(tokens: &dyn TokenSink, data: &Value) -> bool {
    match data.get("token").and_then(Value::as_str) {
        Some(token) => match tokens.store(token) {
            Ok(()) => {
                log::info!("Auth token saved to keychain");
                true
            }
            Err(e) => {
                log::warn!("Keychain store failed: {}", e);
                false
            }
        },
        None => {
            log::warn!("Login response has no token, nothing saved");
            false
        }
    }
}

/// Forget the persisted token. Purely local; the backend has no logout endpoint.
pub fn logout(tokens: &dyn TokenSink) -> Result<Envelope<Value>, TokenStoreError> {
    tokens.clear()?;
    log::info!("Logout complete");
    Ok(Envelope::from(Ok::<_, ApiError>(json!({ "loggedOut": true }))))
}

pub async fn list_shipments(api: &ApiClient) -> Envelope<Value> {
    shipments::get_shipments::<Value>(api).await.into()
}

pub async fn create_shipment(api: &ApiClient, req: CreateShipmentRequest) -> Envelope<Value> {
    shipments::create_shipment::<Value>(api, &req).await.into()
}

pub async fn update_shipment_status(api: &ApiClient, id: &str, status: String) -> Envelope<Value> {
    shipments::update_shipment_status::<Value>(api, id, &UpdateShipmentStatusRequest { status })
        .await
        .into()
}

pub async fn create_bid(
    api: &ApiClient,
    shipment_id: String,
    bid_amount: f64,
    message: Option<String>,
) -> Envelope<Value> {
    let req = CreateBidRequest {
        shipment_id,
        bid_amount,
        message,
    };
    bids::create_bid::<Value>(api, &req).await.into()
}

pub async fn accept_bid(api: &ApiClient, id: &str) -> Envelope<Value> {
    bids::accept_bid::<Value>(api, id).await.into()
}

pub async fn seed(api: &ApiClient) -> Envelope<Value> {
    dev::seed_database::<Value>(api).await.into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use freight_gateway::token::{MemoryTokenStore, TokenStore};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Sink whose writes always fail.
    struct BrokenSink;

    impl TokenSink for BrokenSink {
        fn store(&self, _token: &str) -> Result<(), TokenStoreError> {
            Err(TokenStoreError::Keychain("locked".into()))
        }

        fn clear(&self) -> Result<(), TokenStoreError> {
            Err(TokenStoreError::Keychain("locked".into()))
        }
    }

    async fn login_server(status: u16, body: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Arc::new(MemoryTokenStore::default()))
    }

    #[test]
    fn test_save_login_token() {
        let store = MemoryTokenStore::default();
        assert!(save_login_token(&store, &json!({ "token": "t1", "user": {} })));
        assert_eq!(store.get().as_deref(), Some("t1"));
    }

    #[test]
    fn test_save_login_token_ignores_missing_or_non_string() {
        let store = MemoryTokenStore::default();
        assert!(!save_login_token(&store, &json!({ "user": {} })));
        assert!(!save_login_token(&store, &json!({ "token": 42 })));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_save_login_token_store_failure() {
        assert!(!save_login_token(&BrokenSink, &json!({ "token": "t1" })));
    }

    #[tokio::test]
    async fn login_with_save_persists_token() {
        let server = login_server(200, json!({ "token": "t1" })).await;
        let store = MemoryTokenStore::default();

        let env = login(&client(&server), &store, "a@b.com".into(), "x".into(), true).await;

        assert!(env.is_success());
        assert_eq!(store.get().as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn login_without_save_leaves_store_empty() {
        let server = login_server(200, json!({ "token": "t1" })).await;
        let store = MemoryTokenStore::default();

        let env = login(&client(&server), &store, "a@b.com".into(), "x".into(), false).await;

        assert!(env.is_success());
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn failed_login_with_save_stores_nothing() {
        let server = login_server(401, json!({ "error": "Invalid credentials" })).await;
        let store = MemoryTokenStore::new(Some("previous".into()));

        let env = login(&client(&server), &store, "a@b.com".into(), "x".into(), true).await;

        assert_eq!(env.error(), Some("Invalid credentials"));
        assert_eq!(store.get().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn keychain_failure_keeps_login_successful() {
        let server = login_server(200, json!({ "token": "t1" })).await;

        let env = login(&client(&server), &BrokenSink, "a@b.com".into(), "x".into(), true).await;

        assert!(env.is_success());
        assert_eq!(env.data(), Some(&json!({ "token": "t1" })));
    }

    #[test]
    fn test_logout_clears_token() {
        let store = MemoryTokenStore::new(Some("t1".into()));
        let env = logout(&store).unwrap();
        assert_eq!(env.data(), Some(&json!({ "loggedOut": true })));
        assert_eq!(store.get(), None);

        assert!(logout(&BrokenSink).is_err());
    }
}
