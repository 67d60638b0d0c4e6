//! Account registration and login.

use serde::de::DeserializeOwned;

use super::client::{ApiClient, RequestOptions};
use super::envelope::ApiResult;
use super::types::{LoginRequest, RegisterRequest};

/// Create an account.
///
/// POST /api/auth/register
pub async fn register<T: DeserializeOwned>(
    client: &ApiClient,
    request: &RegisterRequest,
) -> ApiResult<T> {
    client
        .request("/api/auth/register", RequestOptions::post().json(request))
        .await
}

/// Exchange credentials for a session token.
///
/// POST /api/auth/login. The gateway never stores the returned token;
/// persisting it is up to the caller's login flow.
pub async fn login<T: DeserializeOwned>(
    client: &ApiClient,
    request: &LoginRequest,
) -> ApiResult<T> {
    client
        .request("/api/auth/login", RequestOptions::post().json(request))
        .await
}
