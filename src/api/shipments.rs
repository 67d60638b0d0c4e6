//! Shipment posting, listing and status updates.

use serde::de::DeserializeOwned;

use super::client::{ApiClient, RequestOptions};
use super::envelope::ApiResult;
use super::types::{CreateShipmentRequest, UpdateShipmentStatusRequest};

/// Post a new load.
///
/// POST /api/shipments
pub async fn create_shipment<T: DeserializeOwned>(
    client: &ApiClient,
    request: &CreateShipmentRequest,
) -> ApiResult<T> {
    client
        .request("/api/shipments", RequestOptions::post().json(request))
        .await
}

/// List shipments visible to the current user.
///
/// GET /api/shipments
pub async fn get_shipments<T: DeserializeOwned>(client: &ApiClient) -> ApiResult<T> {
    client.request("/api/shipments", RequestOptions::get()).await
}

/// Move a shipment to a new status.
///
/// PATCH /api/shipments/{id}/status
pub async fn update_shipment_status<T: DeserializeOwned>(
    client: &ApiClient,
    shipment_id: &str,
    request: &UpdateShipmentStatusRequest,
) -> ApiResult<T> {
    let path = format!("/api/shipments/{}/status", urlencoding::encode(shipment_id));
    client
        .request(&path, RequestOptions::patch().json(request))
        .await
}
