//! Development-only endpoints.

use serde::de::DeserializeOwned;

use super::client::{ApiClient, RequestOptions};
use super::envelope::ApiResult;

/// Fill the backend with demo users, shipments and bids.
///
/// POST /api/seed
pub async fn seed_database<T: DeserializeOwned>(client: &ApiClient) -> ApiResult<T> {
    client.request("/api/seed", RequestOptions::post()).await
}
