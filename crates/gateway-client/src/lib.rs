//! Payment gateway client: order creation and webhook signatures.

mod client;
mod error;
pub mod signature;
mod types;

pub use client::{GatewayClient, PaymentGateway};
pub use error::GatewayError;
pub use types::*;
