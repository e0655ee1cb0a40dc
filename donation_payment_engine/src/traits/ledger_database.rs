use thiserror::Error;

use crate::{
    db_types::{Donation, NewDonation},
    traits::data_objects::InsertDonationResult,
};

/// This trait defines the transactional write path that backends must provide for the donation
/// payment engine.
///
/// The contract for [`LedgerDatabase::process_donation`] is the heart of the ingestion protocol:
/// * The dedup check, the insert and the volunteer increment happen inside ONE atomic
///   transaction. All three commit, or none do.
/// * The provider payment id carries a unique constraint. A repeated payment id is not an error;
///   it resolves to [`InsertDonationResult::AlreadyExists`] carrying the previously committed
///   record, which makes redeliveries and client retries idempotent.
/// * If two confirmations for the same payment id race, exactly one donation row is ever
///   created. The loser either blocks until the winner commits (and then observes the duplicate
///   at its dedup check) or hits the unique constraint, which the backend must catch and
///   reinterpret as `AlreadyExists` rather than propagate.
/// * A referrer that resolves to no volunteer downgrades to a logged warning; the donation is
///   still valid and still commits.
#[allow(async_fn_in_trait)]
pub trait LedgerDatabase {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Takes a new donation and, in a single atomic transaction:
    /// * checks whether a donation with this payment id already exists (and if so, commits the
    ///   no-op transaction and returns the existing record),
    /// * inserts the donation with a creation timestamp fixed at transaction start,
    /// * atomically increments the referring volunteer's cumulative total, if the referrer
    ///   resolves to a volunteer.
    async fn process_donation(&self, donation: NewDonation) -> Result<InsertDonationResult, LedgerError>;

    /// Fetches the donation for the given provider payment id.
    async fn fetch_donation_by_payment_id(&self, payment_id: &str) -> Result<Option<Donation>, LedgerError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("We have an internal database engine error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("Cannot insert donation, since it already exists with payment id {0}")]
    DonationAlreadyExists(String),
    #[error("No volunteer exists with username {0}")]
    VolunteerNotFound(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}
