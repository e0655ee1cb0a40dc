//! Glue between the gateway-agnostic engine and the Razorpay tools crate.

use donation_payment_engine::traits::ConfirmationVerifier;
use dpg_common::{Paise, Secret};
use razorpay_tools::{verify_payment_signature, NewOrderRequest, OrderNotes};

use crate::data_objects::CreateOrderRequest;

/// The production [`ConfirmationVerifier`]: recomputes the Razorpay HMAC with the account's key
/// secret. Constructed once at startup and injected into the flow API; no ambient globals.
#[derive(Clone, Default)]
pub struct RazorpayVerifier {
    key_secret: Secret<String>,
}

impl RazorpayVerifier {
    pub fn new(key_secret: Secret<String>) -> Self {
        Self { key_secret }
    }
}

impl ConfirmationVerifier for RazorpayVerifier {
    fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(order_id, payment_id, signature, self.key_secret.reveal())
    }
}

/// Convert an inbound order request into the gateway order payload. The donor metadata rides
/// along as order notes so it shows up against the order in the gateway dashboard.
pub fn new_order_request(req: &CreateOrderRequest, amount: Paise) -> NewOrderRequest {
    let receipt = new_receipt_id();
    let notes = OrderNotes {
        name: req.name.clone(),
        email: req.email.clone(),
        phone: req.phone.clone(),
        anonymous: req.anonymous,
        address: req.address.clone(),
    };
    NewOrderRequest::new(amount, receipt, notes)
}

fn new_receipt_id() -> String {
    let ts = donation_payment_engine::helpers::ist_now().timestamp_millis();
    format!("receipt_{ts}_{:04x}", rand::random::<u16>())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verifier_round_trip() {
        // hex(HMAC-SHA256("S", "o1|p1"))
        let sig = "eadda25d3c8aabf8df84f5d2aeb1f9a18165e0a3f0ed908d2a823f86ebb06ee5";
        let verifier = RazorpayVerifier::new(Secret::new("S".to_string()));
        assert!(verifier.verify("o1", "p1", sig));
        assert!(!verifier.verify("o1", "p1", "deadbeef"));
    }
}
