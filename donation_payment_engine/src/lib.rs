//! Donation Payment Engine
//!
//! The donation payment engine is the core of the fundraising backend. It owns the one piece of
//! this system with real correctness requirements: the payment-ingestion and ledger-update path
//! (verify → persist → aggregate → notify). The library is provider-agnostic; signature
//! verification is injected as a [`traits::ConfirmationVerifier`] so that the gateway-specific
//! HMAC logic lives outside the engine.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You
//!    should never need to access the database directly; use the public API instead. The
//!    exception is the data types used in the database, defined in the `db_types` module.
//! 2. The engine public API ([`mod@dpe_api`]). [`DonationFlowApi`] runs the ingestion state
//!    machine; [`VolunteerApi`] serves the dashboard queries. Backends implement the traits in
//!    [`mod@traits`] to plug in underneath.
//! 3. Post-commit events ([`mod@events`]). When a donation settles, a `DonationReceivedEvent` is
//!    published to subscribed hooks (donor notifications and the like). Hook failures never roll
//!    back a committed donation.

pub mod db_types;
pub mod events;
pub mod helpers;
mod dpe_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use dpe_api::{
    donation_flow_api::DonationFlowApi,
    errors::IngestError,
    volunteer_api::VolunteerApi,
    IngestOutcome,
};
pub use traits::{ConfirmationVerifier, InsertDonationResult, LedgerDatabase, LedgerError, VolunteerManagement};
