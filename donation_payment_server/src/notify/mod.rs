//! Donor notifications.
//!
//! Everything in this module is best-effort and strictly post-commit: the notifiers consume
//! `DonationReceivedEvent`s published by the engine after the ingestion transaction has
//! committed. A failure here is logged and swallowed; it can never undo a committed donation and
//! is never retried synchronously.

mod email;
mod whatsapp;

use donation_payment_engine::events::EventHooks;
use log::*;

pub use email::MailNotifier;
pub use whatsapp::WhatsAppNotifier;

use crate::{config::ServerConfig, errors::ServerError};

/// Build the engine event hooks from the configured notifiers. Notifiers without credentials are
/// left out; with none configured, no hook is registered at all and ingestion runs silent.
pub fn notification_hooks(config: &ServerConfig) -> Result<EventHooks, ServerError> {
    let whatsapp = WhatsAppNotifier::from_config(&config.whatsapp)?;
    let mail = MailNotifier::from_config(&config.mail)?;
    let mut hooks = EventHooks::default();
    if whatsapp.is_none() && mail.is_none() {
        info!("📣️ No notifiers are configured. Donors will not be messaged.");
        return Ok(hooks);
    }
    hooks.on_donation_received(move |event| {
        let whatsapp = whatsapp.clone();
        let mail = mail.clone();
        Box::pin(async move {
            if let Some(whatsapp) = whatsapp {
                whatsapp.send_donation_thanks(&event).await;
            }
            if let Some(mail) = mail {
                mail.send_donation_receipt(&event).await;
            }
        }) as std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
    });
    Ok(hooks)
}
