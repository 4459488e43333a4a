//! Webhook signature scheme.
//!
//! The gateway signs a confirmation as
//! `md5("<order_id>:<amount>:<secret>")`, lowercase hex. `amount` is used
//! verbatim, so `70` and `70.0` produce different signatures.

use md5::{Digest, Md5};

/// Compute the signature the gateway would send.
pub fn sign(order_id: &str, amount: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(format!("{}:{}:{}", order_id, amount, secret).as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a supplied signature by exact comparison.
pub fn verify(order_id: &str, amount: &str, signature: &str, secret: &str) -> bool {
    sign(order_id, amount, secret) == signature
}
