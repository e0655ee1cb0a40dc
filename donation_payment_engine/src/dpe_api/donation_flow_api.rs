use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Donation, NewDonation, PaymentConfirmation},
    dpe_api::errors::IngestError,
    events::{DonationReceivedEvent, EventProducers},
    traits::{ConfirmationVerifier, InsertDonationResult, LedgerDatabase},
};

/// The terminal outcome of a successful ingestion. Both variants mean the donation is durably
/// committed; `Duplicate` means it was committed by an earlier delivery of the same confirmation.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    Persisted(Donation),
    Duplicate(Donation),
}

impl IngestOutcome {
    pub fn donation(&self) -> &Donation {
        match self {
            IngestOutcome::Persisted(d) => d,
            IngestOutcome::Duplicate(d) => d,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, IngestOutcome::Duplicate(_))
    }
}

/// `DonationFlowApi` is the primary API for handling inbound payment confirmations.
///
/// A confirmation moves through the protocol in order: validate → verify signature → one atomic
/// transaction (dedup, persist, aggregate) → post-commit event. The first two steps run before
/// any store access; the last step runs after commit and can never affect the committed result.
pub struct DonationFlowApi<B, V> {
    db: B,
    verifier: V,
    producers: EventProducers,
}

impl<B, V> Debug for DonationFlowApi<B, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DonationFlowApi")
    }
}

impl<B, V> DonationFlowApi<B, V> {
    pub fn new(db: B, verifier: V, producers: EventProducers) -> Self {
        Self { db, verifier, producers }
    }
}

impl<B, V> DonationFlowApi<B, V>
where
    B: LedgerDatabase,
    V: ConfirmationVerifier,
{
    /// Ingest a payment confirmation.
    ///
    /// Returns `Ok(Persisted)` when this call committed the donation, `Ok(Duplicate)` when an
    /// earlier delivery did (safe to retry indefinitely), and `Err` when the confirmation was
    /// aborted before or during the transaction. The `DonationReceivedEvent` hook fires only for
    /// freshly persisted donations, strictly after commit.
    pub async fn ingest(&self, confirmation: PaymentConfirmation) -> Result<IngestOutcome, IngestError> {
        let payment_id = confirmation.donation.payment_id.clone();
        trace!("🔄️💰️ Confirmation received for payment [{payment_id}]");
        confirmation.validate().map_err(|reason| {
            debug!("🔄️💰️ Confirmation for [{payment_id}] failed validation. {reason}");
            IngestError::Validation(reason)
        })?;
        let order_id = confirmation.donation.order_id.as_str();
        if !self.verifier.verify(order_id, &confirmation.donation.payment_id, &confirmation.signature) {
            warn!(
                "🔄️🔐️ Signature verification FAILED for order [{order_id}] / payment [{payment_id}]. The \
                 confirmation was rejected before reaching the store."
            );
            return Err(IngestError::Authenticity);
        }
        trace!("🔄️💰️ Signature verified for payment [{payment_id}]");
        self.persist(confirmation.into_new_donation()).await
    }

    /// Legacy ingestion without a gateway signature. Deprecated: old clients of the
    /// `/save-payment` endpoint never sent one. New callers must use [`Self::ingest`]. The
    /// storage path is identical, so even legacy traffic gets the transactional dedup guarantees.
    pub async fn ingest_legacy(&self, donation: NewDonation) -> Result<IngestOutcome, IngestError> {
        let payment_id = donation.payment_id.clone();
        trace!("🔄️💰️ Legacy (unsigned) confirmation received for payment [{payment_id}]");
        donation.validate().map_err(|reason| {
            debug!("🔄️💰️ Legacy confirmation for [{payment_id}] failed validation. {reason}");
            IngestError::Validation(reason)
        })?;
        self.persist(donation).await
    }

    async fn persist(&self, donation: NewDonation) -> Result<IngestOutcome, IngestError> {
        let payment_id = donation.payment_id.clone();
        match self.db.process_donation(donation).await? {
            InsertDonationResult::Inserted(donation) => {
                debug!(
                    "🔄️💰️ Payment [{payment_id}] of {} processing complete. Referrer: {}",
                    donation.amount,
                    donation.referrer.as_deref().unwrap_or("none")
                );
                self.call_donation_received_hook(&donation).await;
                Ok(IngestOutcome::Persisted(donation))
            },
            InsertDonationResult::AlreadyExists(existing) => {
                debug!("🔄️💰️ Payment [{payment_id}] was already processed. Returning the existing record.");
                Ok(IngestOutcome::Duplicate(existing))
            },
        }
    }

    async fn call_donation_received_hook(&self, donation: &Donation) {
        for emitter in &self.producers.donation_received_producer {
            debug!("🔄️📬️ Notifying donation received hook subscribers");
            let event = DonationReceivedEvent::new(donation);
            emitter.publish_event(event).await;
        }
    }
}
