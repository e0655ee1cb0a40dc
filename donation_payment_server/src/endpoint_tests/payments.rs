use actix_web::{http::StatusCode, web, web::ServiceConfig};
use donation_payment_engine::{
    db_types::{Donation, NewDonation},
    events::EventProducers,
    helpers::ist_now,
    traits::{InsertDonationResult, LedgerError},
    DonationFlowApi,
};
use dpg_common::Secret;
use serde_json::json;

use super::{
    helpers::post_request,
    mocks::MockLedger,
};
use crate::{
    integrations::razorpay::RazorpayVerifier,
    routes::{ProcessPaymentRoute, SavePaymentRoute},
};

// hex(HMAC-SHA256("S", "o1|p1")), where "S" is the test account secret
const VALID_SIG: &str = "eadda25d3c8aabf8df84f5d2aeb1f9a18165e0a3f0ed908d2a823f86ebb06ee5";

fn payment_body(signature: &str) -> serde_json::Value {
    json!({
        "name": "Asha Donor",
        "email": "asha@example.com",
        "phone": "9876543210",
        "amount": 500,
        "orderId": "o1",
        "paymentId": "p1",
        "razorpay_signature": signature,
        "username": "priya"
    })
}

fn persisted(donation: &NewDonation) -> Donation {
    Donation {
        id: 1,
        order_id: donation.order_id.clone(),
        payment_id: donation.payment_id.clone(),
        donor_name: donation.donor_name.clone(),
        email: donation.email.clone(),
        phone: donation.phone.clone(),
        amount: donation.amount,
        referrer: donation.referrer.clone(),
        anonymous: donation.anonymous,
        address: donation.address.clone(),
        upi_id: donation.upi_id.clone(),
        created_at: ist_now(),
    }
}

fn configure(mock: MockLedger) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let verifier = RazorpayVerifier::new(Secret::new("S".to_string()));
        let api = DonationFlowApi::new(mock, verifier, EventProducers::default());
        cfg.app_data(web::Data::new(api))
            .service(ProcessPaymentRoute::<MockLedger, RazorpayVerifier>::new())
            .service(SavePaymentRoute::<MockLedger, RazorpayVerifier>::new());
    }
}

#[actix_web::test]
async fn valid_confirmation_is_persisted() {
    let mut mock = MockLedger::new();
    mock.expect_process_donation()
        .times(1)
        .returning(|donation| Ok(InsertDonationResult::Inserted(persisted(&donation))));
    let (status, body) = post_request("/process-payment", &payment_body(VALID_SIG), configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "{body}");
    assert!(body.contains("processed successfully"), "{body}");
}

#[actix_web::test]
async fn redelivered_confirmation_is_acknowledged() {
    let mut mock = MockLedger::new();
    mock.expect_process_donation()
        .times(1)
        .returning(|donation| Ok(InsertDonationResult::AlreadyExists(persisted(&donation))));
    let (status, body) = post_request("/process-payment", &payment_body(VALID_SIG), configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "{body}");
    assert!(body.contains("already processed"), "{body}");
}

#[actix_web::test]
async fn tampered_signature_is_rejected_before_the_store() {
    // No expectations on the mock: a single store call would fail the test
    let mock = MockLedger::new();
    let mut tampered = VALID_SIG.to_string();
    tampered.replace_range(0..4, "0000");
    let (status, body) = post_request("/process-payment", &payment_body(&tampered), configure(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid signature"), "{body}");
}

#[actix_web::test]
async fn missing_fields_are_rejected_before_the_store() {
    let mock = MockLedger::new();
    let mut body = payment_body(VALID_SIG);
    body.as_object_mut().unwrap().remove("email");
    let (status, body) = post_request("/process-payment", &body, configure(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Missing required field: email"), "{body}");
}

#[actix_web::test]
async fn storage_failure_surfaces_as_500() {
    let mut mock = MockLedger::new();
    mock.expect_process_donation()
        .times(1)
        .returning(|_| Err(LedgerError::DatabaseError("the database is on fire".to_string())));
    let (status, body) = post_request("/process-payment", &payment_body(VALID_SIG), configure(mock)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains(r#""success":false"#), "{body}");
}

#[actix_web::test]
async fn legacy_save_payment_still_works_without_a_signature() {
    let mut mock = MockLedger::new();
    mock.expect_process_donation()
        .times(1)
        .returning(|donation| Ok(InsertDonationResult::Inserted(persisted(&donation))));
    let body = json!({
        "refName": "priya",
        "name": "Asha Donor",
        "email": "asha@example.com",
        "amount": 500,
        "razorpay_order_id": "o1",
        "razorpay_payment_id": "p1"
    });
    let (status, body) = post_request("/save-payment", &body, configure(mock)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("Payment saved successfully"), "{body}");
}
