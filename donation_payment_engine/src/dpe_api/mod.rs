//! The engine public API.
//!
//! [`donation_flow_api::DonationFlowApi`] runs the ingestion protocol for inbound payment
//! confirmations. [`volunteer_api::VolunteerApi`] serves dashboard-style queries. Both are thin,
//! explicitly-constructed wrappers over an injected storage backend; there is no ambient global
//! state anywhere in the engine.

pub mod donation_flow_api;
pub mod errors;
pub mod volunteer_api;

pub use donation_flow_api::IngestOutcome;
