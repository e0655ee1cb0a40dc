/// The signature check that gates every payment confirmation.
///
/// The engine is gateway-agnostic; the concrete implementation (HMAC over the order/payment id
/// pair with the gateway's key secret) is injected into [`crate::DonationFlowApi`] at
/// construction. Implementations must be pure: no I/O, no side effects, and a plain `false`
/// (never a panic or an error) on any mismatch.
pub trait ConfirmationVerifier {
    fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
