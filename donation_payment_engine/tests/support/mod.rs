#![allow(dead_code)]
//! Shared scaffolding for the engine integration tests: scratch databases, schema migration and
//! a few fixture builders.

use donation_payment_engine::{
    db_types::{NewDonation, NewVolunteer, PaymentConfirmation},
    sqlite,
    traits::ConfirmationVerifier,
    SqliteDatabase,
    VolunteerManagement,
};
use dpg_common::Paise;
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    run_migrations(url).await;
}

pub fn random_db_path() -> String {
    format!("sqlite://../data/test_store_{}.db", rand::random::<u64>())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    sqlite::run_migrations(db.pool()).await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
}

pub async fn create_database(url: &str) {
    let _ = std::fs::create_dir_all("../data");
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}

/// A verifier that always answers the same way. The real HMAC implementation is covered in
/// `razorpay_tools`; flow tests only need to steer the authenticity branch.
#[derive(Clone, Copy, Debug)]
pub struct StaticVerifier(pub bool);

impl ConfirmationVerifier for StaticVerifier {
    fn verify(&self, _order_id: &str, _payment_id: &str, _signature: &str) -> bool {
        self.0
    }
}

pub async fn seed_volunteer(db: &SqliteDatabase, username: &str, display_name: &str) {
    db.upsert_volunteer(NewVolunteer::new(username, display_name)).await.expect("Error seeding volunteer");
}

pub fn confirmation(order_id: &str, payment_id: &str, amount_rupees: i64) -> PaymentConfirmation {
    let donation = NewDonation::new(
        order_id,
        payment_id,
        "Asha Donor".to_string(),
        "asha@example.com".to_string(),
        Paise::from_rupees(amount_rupees),
    )
    .with_phone("9876543210");
    PaymentConfirmation::new(donation, "0ddba11".to_string())
}
