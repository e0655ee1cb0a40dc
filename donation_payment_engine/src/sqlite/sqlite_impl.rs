//! `SqliteDatabase` is the concrete SQLite implementation of the engine's storage traits.
//!
//! The interesting part is [`LedgerDatabase::process_donation`]: the dedup check, the donation
//! insert and the volunteer increment run inside one `pool.begin()`/`tx.commit()` transaction, so
//! a failure anywhere leaves no partial writes. The unique index on `payment_id` backs the
//! transactional dedup check under concurrency; a writer that loses the race reinterprets the
//! constraint violation as "already processed" instead of surfacing an error.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{db::{donations, volunteers}, new_pool};
use crate::{
    db_types::{Donation, NewDonation, NewVolunteer, Volunteer},
    helpers::ist_now,
    traits::{InsertDonationResult, LedgerDatabase, LedgerError, VolunteerManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, LedgerError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl LedgerDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn process_donation(&self, donation: NewDonation) -> Result<InsertDonationResult, LedgerError> {
        let payment_id = donation.payment_id.clone();
        let mut tx = self.pool.begin().await?;
        // The server-assigned creation timestamp is fixed at transaction start
        let created_at = ist_now();
        if let Some(existing) = donations::fetch_donation_by_payment_id(&payment_id, &mut tx).await? {
            // Idempotent no-op: the gateway redelivered, or the client retried.
            tx.commit().await?;
            debug!("🗃️ Donation [{payment_id}] has already been processed, nothing to do");
            return Ok(InsertDonationResult::AlreadyExists(existing));
        }
        let donation = match donations::insert_donation(donation, created_at, &mut tx).await {
            Ok(donation) => donation,
            Err(e) => {
                // A concurrent writer for the same payment id may have committed between our
                // dedup check and our insert; our snapshot would not show their row. Roll back,
                // re-read outside the transaction, and report the winner's row as a duplicate.
                tx.rollback().await?;
                let mut conn = self.pool.acquire().await?;
                return match donations::fetch_donation_by_payment_id(&payment_id, &mut conn).await? {
                    Some(existing) => {
                        debug!("🗃️ Donation [{payment_id}] lost an ingestion race; treating as already processed");
                        Ok(InsertDonationResult::AlreadyExists(existing))
                    },
                    None => Err(e),
                };
            },
        };
        debug!("🗃️ Donation [{payment_id}] saved in the DB with id {}", donation.id);
        if let Some(referrer) = donation.referrer.as_deref() {
            match volunteers::increment_amount(referrer, donation.amount, &mut tx).await? {
                Some(total) => {
                    debug!("🗃️ Volunteer '{referrer}' credited with {}. Running total is {total}", donation.amount)
                },
                None => warn!(
                    "🗃️ Donation [{payment_id}] names referrer '{referrer}', but no such volunteer exists. Saving \
                     the donation unattributed."
                ),
            }
        }
        tx.commit().await?;
        Ok(InsertDonationResult::Inserted(donation))
    }

    async fn fetch_donation_by_payment_id(&self, payment_id: &str) -> Result<Option<Donation>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        donations::fetch_donation_by_payment_id(payment_id, &mut conn).await
    }

    async fn close(&mut self) -> Result<(), LedgerError> {
        self.pool.close().await;
        Ok(())
    }
}

impl VolunteerManagement for SqliteDatabase {
    async fn fetch_volunteer(&self, username: &str) -> Result<Option<Volunteer>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        volunteers::fetch_volunteer(username, &mut conn).await
    }

    async fn fetch_donations(&self) -> Result<Vec<Donation>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        donations::fetch_donations(&mut conn).await
    }

    async fn fetch_donations_for_referrer(&self, username: &str) -> Result<Vec<Donation>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        donations::fetch_donations_for_referrer(username, &mut conn).await
    }

    async fn upsert_volunteer(&self, volunteer: NewVolunteer) -> Result<Volunteer, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        volunteers::upsert_volunteer(volunteer, &mut conn).await
    }
}
