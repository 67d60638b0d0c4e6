//! Driver bids on posted shipments.

use serde::de::DeserializeOwned;

use super::client::{ApiClient, RequestOptions};
use super::envelope::ApiResult;
use super::types::CreateBidRequest;

/// Place a bid on a shipment.
///
/// POST /api/bids
pub async fn create_bid<T: DeserializeOwned>(
    client: &ApiClient,
    request: &CreateBidRequest,
) -> ApiResult<T> {
    client
        .request("/api/bids", RequestOptions::post().json(request))
        .await
}

/// Accept a bid (shipper side). No request body.
///
/// POST /api/bids/{id}/accept
pub async fn accept_bid<T: DeserializeOwned>(client: &ApiClient, bid_id: &str) -> ApiResult<T> {
    let path = format!("/api/bids/{}/accept", urlencoding::encode(bid_id));
    client.request(&path, RequestOptions::post()).await
}
