//! Payment-signature verification.
//!
//! After a successful checkout, Razorpay hands the client a signature over the order id and
//! payment id pair: `hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))`. The backend must
//! recompute it before trusting any payment confirmation.

use hmac::{Hmac, Mac};
use log::trace;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a provider-issued payment signature.
///
/// Recomputes the HMAC over `"{order_id}|{payment_id}"` with the given secret and compares it
/// against the supplied hex-encoded signature. The comparison runs in constant time via
/// [`Mac::verify_slice`]. Returns `false` (never an error) on any mismatch, including malformed
/// hex. Pure function, no side effects.
pub fn verify_payment_signature(order_id: &str, payment_id: &str, signature: &str, secret: &str) -> bool {
    let supplied = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            trace!("🔐️ Supplied signature is not valid hex");
            return false;
        },
    };
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        // new_from_slice accepts keys of any length for HMAC
        Err(_) => return false,
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&supplied).is_ok()
}

#[cfg(test)]
mod test {
    use super::*;

    // hex(HMAC-SHA256("S", "o1|p1"))
    const EXPECTED_SIG: &str = "eadda25d3c8aabf8df84f5d2aeb1f9a18165e0a3f0ed908d2a823f86ebb06ee5";

    #[test]
    fn known_vector_verifies() {
        assert!(verify_payment_signature("o1", "p1", EXPECTED_SIG, "S"));
    }

    #[test]
    fn any_other_string_is_rejected() {
        let mut tampered = EXPECTED_SIG.to_string();
        tampered.replace_range(0..2, "00");
        assert!(!verify_payment_signature("o1", "p1", &tampered, "S"));
        assert!(!verify_payment_signature("o1", "p1", EXPECTED_SIG, "not-the-secret"));
        assert!(!verify_payment_signature("o2", "p1", EXPECTED_SIG, "S"));
        assert!(!verify_payment_signature("o1", "p2", EXPECTED_SIG, "S"));
    }

    #[test]
    fn malformed_hex_is_rejected_without_panicking() {
        assert!(!verify_payment_signature("o1", "p1", "zz-definitely-not-hex", "S"));
        assert!(!verify_payment_signature("o1", "p1", "", "S"));
    }

    #[test]
    fn longer_identifiers() {
        // hex(HMAC-SHA256("test_secret_key", "order_ABC123|pay_XYZ789"))
        let sig = "b0b12113290ee2725c910a905e505ee6bb5ee8f268c106200dcc08f5fe79ad64";
        assert!(verify_payment_signature("order_ABC123", "pay_XYZ789", sig, "test_secret_key"));
        assert!(!verify_payment_signature("order_ABC123", "pay_XYZ780", sig, "test_secret_key"));
    }
}
