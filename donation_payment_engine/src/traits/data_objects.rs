use serde::{Deserialize, Serialize};

use crate::db_types::Donation;

/// The outcome of the atomic dedup/insert/increment transaction.
///
/// A duplicate payment id is NOT an error; it is the idempotent success case, carrying the record
/// that was committed the first time round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InsertDonationResult {
    /// The donation was inserted and the referrer's total (if any) incremented.
    Inserted(Donation),
    /// A donation with this payment id was already committed; nothing was written.
    AlreadyExists(Donation),
}

impl InsertDonationResult {
    pub fn donation(&self) -> &Donation {
        match self {
            InsertDonationResult::Inserted(d) => d,
            InsertDonationResult::AlreadyExists(d) => d,
        }
    }
}
