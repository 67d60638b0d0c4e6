//! Request types for the freight marketplace API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! Response bodies are opaque to the gateway and decoded into whatever type
//! the caller asks for (usually `serde_json::Value`).

use serde::{Deserialize, Serialize};

/// Account role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Shipper,
    Driver,
    Admin,
}

/// Registration body sent to POST /api/auth/register.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub name: String,
}

/// Login body sent to POST /api/auth/login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Shipment creation body sent to POST /api/shipments.
///
/// Optional fields are left out of the JSON entirely when unset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub origin_address: String,
    pub destination_address: String,
    pub pallet_count: u32,
    /// Total load weight.
    pub weight: f64,
    pub load_type: String,
    /// Offered rate for the whole load.
    pub rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601 date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    /// ISO 8601 date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
}

impl CreateShipmentRequest {
    /// Build a request with only the required fields set.
    pub fn new(
        origin_address: impl Into<String>,
        destination_address: impl Into<String>,
        pallet_count: u32,
        weight: f64,
        load_type: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            origin_address: origin_address.into(),
            destination_address: destination_address.into(),
            pallet_count,
            weight,
            load_type: load_type.into(),
            rate,
            description: None,
            pickup_date: None,
            delivery_date: None,
            is_urgent: None,
            payment_terms: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_pickup_date(mut self, date: impl Into<String>) -> Self {
        self.pickup_date = Some(date.into());
        self
    }

    pub fn with_delivery_date(mut self, date: impl Into<String>) -> Self {
        self.delivery_date = Some(date.into());
        self
    }

    pub fn with_urgent(mut self, urgent: bool) -> Self {
        self.is_urgent = Some(urgent);
        self
    }

    pub fn with_payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }
}

/// Status update body sent to PATCH /api/shipments/{id}/status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentStatusRequest {
    pub status: String,
}

/// Bid body sent to POST /api/bids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub shipment_id: String,
    pub bid_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Shipper).unwrap(), json!("shipper"));
        assert_eq!(serde_json::to_value(UserRole::Driver).unwrap(), json!("driver"));
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), json!("admin"));
    }

    #[test]
    fn test_shipment_required_fields_only() {
        let req = CreateShipmentRequest::new("Berlin", "Hamburg", 12, 8400.0, "dry", 950.0);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "originAddress": "Berlin",
                "destinationAddress": "Hamburg",
                "palletCount": 12,
                "weight": 8400.0,
                "loadType": "dry",
                "rate": 950.0,
            })
        );
    }

    #[test]
    fn test_shipment_optional_fields_camel_case() {
        let req = CreateShipmentRequest::new("A", "B", 1, 10.0, "reefer", 100.0)
            .with_description("chilled produce")
            .with_pickup_date("2026-11-02")
            .with_delivery_date("2026-11-03")
            .with_urgent(true)
            .with_payment_terms("net30");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["description"], "chilled produce");
        assert_eq!(value["pickupDate"], "2026-11-02");
        assert_eq!(value["deliveryDate"], "2026-11-03");
        assert_eq!(value["isUrgent"], true);
        assert_eq!(value["paymentTerms"], "net30");
    }

    #[test]
    fn test_bid_message_omitted_when_absent() {
        let req = CreateBidRequest {
            shipment_id: "s-1".into(),
            bid_amount: 420.5,
            message: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "shipmentId": "s-1", "bidAmount": 420.5 })
        );
    }
}
