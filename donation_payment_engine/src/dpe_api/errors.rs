use thiserror::Error;

use crate::traits::LedgerError;

/// The ways an ingestion attempt can abort. A duplicate payment id is NOT one of them; duplicates
/// are the idempotent success case ([`super::IngestOutcome::Duplicate`]).
#[derive(Debug, Error)]
pub enum IngestError {
    /// The confirmation is malformed (missing fields, non-positive amount). The store was never
    /// touched. Clients get a 400 and should not retry unchanged input.
    #[error("Invalid payment confirmation: {0}")]
    Validation(String),
    /// The gateway signature did not verify. The confirmation never reaches the store. Logged as
    /// a security-relevant event by the flow.
    #[error("Payment signature verification failed")]
    Authenticity,
    /// The backing store failed mid-protocol; the transaction was aborted with no partial writes.
    /// Safe for clients to retry the whole request, since the dedup check makes retries
    /// idempotent.
    #[error("Storage error during ingestion: {0}")]
    Storage(#[from] LedgerError),
}
