//! Gateway API types.

use serde::{Deserialize, Serialize};

/// Currency every order is priced in.
pub const CURRENCY: &str = "RUB";

/// Body of `POST /orders/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub shop_id: String,
    pub amount: u32,
    pub currency: String,
    pub order_id: String,
    pub email: String,
    pub ip: String,
    /// Payment channel code.
    pub i: u32,
    pub success_url: String,
    pub fail_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(rename = "Location", alias = "location")]
    pub location: Option<String>,
}
