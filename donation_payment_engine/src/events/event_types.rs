use chrono::{DateTime, FixedOffset};
use dpg_common::Paise;
use serde::{Deserialize, Serialize};

use crate::db_types::Donation;

/// Published after an ingestion transaction commits a fresh donation. Everything downstream of
/// this event (dashboard pushes, donor thank-you messages) is best-effort; a handler failure can
/// never undo the committed donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceivedEvent {
    pub payment_id: String,
    pub referrer: Option<String>,
    pub amount: Paise,
    pub timestamp: DateTime<FixedOffset>,
    pub donor_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub anonymous: bool,
}

impl DonationReceivedEvent {
    pub fn new(donation: &Donation) -> Self {
        Self {
            payment_id: donation.payment_id.clone(),
            referrer: donation.referrer.clone(),
            amount: donation.amount,
            timestamp: donation.created_at,
            donor_name: donation.donor_name.clone(),
            email: donation.email.clone(),
            phone: donation.phone.clone(),
            anonymous: donation.anonymous,
        }
    }
}
