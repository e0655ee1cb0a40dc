use std::time::Duration;

use donation_payment_engine::{
    events::EventProducers,
    DonationFlowApi,
    SqliteDatabase,
    VolunteerManagement,
};
use dpg_common::Paise;
use log::*;
use support::{confirmation, prepare_test_env, seed_volunteer, StaticVerifier};
use tokio::runtime::Runtime;

mod support;

const NUM_DONATIONS: u64 = 20;
const RATE: u64 = 100; // donations per second

#[test]
fn burst_donations() {
    info!("🚀️ Starting donation burst test");

    let sys = Runtime::new().unwrap();

    let delay = Duration::from_millis(1000 / RATE);

    sys.block_on(async move {
        let url = "sqlite://../data/test_burst_donations.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 25).await.expect("Error creating database");
        seed_volunteer(&db, "burst", "Burst Tester").await;
        let api = DonationFlowApi::new(db.clone(), StaticVerifier(true), EventProducers::default());

        let mut timer = tokio::time::interval(delay);
        let mut expected_total = 0i64;
        for i in 0..NUM_DONATIONS {
            timer.tick().await;
            let rupees = (i + 1) as i64 * 10;
            expected_total += rupees;
            let mut c = confirmation(&format!("order-burst-{i}"), &format!("pay-burst-{i}"), rupees);
            c.donation.referrer = Some("burst".to_string());
            let _ = api.ingest(c).await.expect("Error processing donation");
        }

        let volunteer = db.fetch_volunteer("burst").await.unwrap().expect("volunteer should exist");
        assert_eq!(volunteer.amount, Paise::from_rupees(expected_total));
    });
}
