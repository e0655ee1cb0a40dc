use actix_web::{http::StatusCode, web, web::ServiceConfig};
use donation_payment_engine::{db_types::Donation, helpers::ist_now, VolunteerApi};
use dpg_common::Paise;

use super::{helpers::get_request, mocks::MockVolunteers};
use crate::routes::DonationsRoute;

fn donation(payment_id: &str, rupees: i64, referrer: Option<&str>) -> Donation {
    Donation {
        id: 1,
        order_id: format!("order_{payment_id}"),
        payment_id: payment_id.to_string(),
        donor_name: "Asha Donor".to_string(),
        email: "asha@example.com".to_string(),
        phone: None,
        amount: Paise::from_rupees(rupees),
        referrer: referrer.map(String::from),
        anonymous: false,
        address: None,
        upi_id: None,
        created_at: ist_now(),
    }
}

fn configure(mock: MockVolunteers) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let api = VolunteerApi::new(mock);
        cfg.app_data(web::Data::new(api)).service(DonationsRoute::<MockVolunteers>::new());
    }
}

#[actix_web::test]
async fn donations_filtered_by_username() {
    let mut mock = MockVolunteers::new();
    mock.expect_fetch_donations_for_referrer()
        .withf(|username| username == "priya")
        .times(1)
        .returning(|_| Ok(vec![donation("pay_1", 500, Some("priya"))]));
    let (status, body) = get_request("/donations?username=priya", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""refName":"priya""#), "{body}");
    assert!(body.contains(r#""amount":500"#), "{body}");
    assert!(body.contains("formattedDate"), "{body}");
}

#[actix_web::test]
async fn donations_unfiltered_lists_everything() {
    let mut mock = MockVolunteers::new();
    mock.expect_fetch_donations()
        .times(1)
        .returning(|| Ok(vec![donation("pay_1", 500, Some("priya")), donation("pay_2", 250, None)]));
    let (status, body) = get_request("/donations", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("pay_1"), "{body}");
    assert!(body.contains("pay_2"), "{body}");
}
