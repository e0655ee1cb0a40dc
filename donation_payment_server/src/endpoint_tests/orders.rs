use actix_web::{http::StatusCode, web, web::ServiceConfig};
use dpg_common::Secret;
use razorpay_tools::{RazorpayApi, RazorpayConfig};
use serde_json::json;

use super::helpers::post_request;
use crate::{integrations::razorpay::RazorpayVerifier, routes::{create_order, verify_payment}};

// hex(HMAC-SHA256("S", "o1|p1"))
const VALID_SIG: &str = "eadda25d3c8aabf8df84f5d2aeb1f9a18165e0a3f0ed908d2a823f86ebb06ee5";

fn configure(cfg: &mut ServiceConfig) {
    let api = RazorpayApi::new(RazorpayConfig::default()).expect("client should build");
    let verifier = RazorpayVerifier::new(Secret::new("S".to_string()));
    cfg.app_data(web::Data::new(api)).app_data(web::Data::new(verifier)).service(create_order).service(verify_payment);
}

#[actix_web::test]
async fn create_order_requires_an_amount() {
    let body = json!({ "name": "Asha Donor", "email": "asha@example.com" });
    let (status, body) = post_request("/create-order", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Amount is required"), "{body}");
}

#[actix_web::test]
async fn create_order_rejects_non_positive_amounts() {
    let body = json!({ "name": "Asha Donor", "email": "asha@example.com", "amount": -50 });
    let (status, body) = post_request("/create-order", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid amount"), "{body}");
}

#[actix_web::test]
async fn verify_payment_accepts_a_valid_triple() {
    let body = json!({
        "razorpay_order_id": "o1",
        "razorpay_payment_id": "p1",
        "razorpay_signature": VALID_SIG
    });
    let (status, body) = post_request("/verify-payment", &body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Payment verified successfully"), "{body}");
}

#[actix_web::test]
async fn verify_payment_rejects_a_tampered_signature() {
    let mut tampered = VALID_SIG.to_string();
    tampered.replace_range(0..4, "0000");
    let body = json!({
        "razorpay_order_id": "o1",
        "razorpay_payment_id": "p1",
        "razorpay_signature": tampered
    });
    let (status, body) = post_request("/verify-payment", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid signature"), "{body}");
}

#[actix_web::test]
async fn verify_payment_rejects_missing_parameters() {
    let body = json!({ "razorpay_order_id": "o1" });
    let (status, body) = post_request("/verify-payment", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Missing payment verification parameters"), "{body}");
}
