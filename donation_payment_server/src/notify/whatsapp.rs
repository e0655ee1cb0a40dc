use std::sync::Arc;

use donation_payment_engine::events::DonationReceivedEvent;
use dpg_common::Secret;
use log::*;
use reqwest::Client;
use serde_json::json;

use crate::{config::WhatsAppConfig, errors::ServerError};

/// Sends the donor a thank-you message over the WhatsApp send API.
#[derive(Clone)]
pub struct WhatsAppNotifier {
    api_url: String,
    api_key: Secret<String>,
    client: Arc<Client>,
}

impl WhatsAppNotifier {
    pub fn from_config(config: &WhatsAppConfig) -> Result<Option<Self>, ServerError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let client = Client::builder().build().map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Some(Self { api_url: config.api_url.clone(), api_key, client: Arc::new(client) }))
    }

    /// Fire-and-forget. Every failure path logs and returns; there is nothing upstream to roll
    /// back.
    pub async fn send_donation_thanks(&self, event: &DonationReceivedEvent) {
        let Some(phone) = event.phone.as_deref() else {
            trace!("📣️ Donation [{}] has no phone number; skipping WhatsApp message", event.payment_id);
            return;
        };
        let number = normalise_number(phone);
        let message = format!(
            "🎉 Hello {}, we received your contribution of {}. Thank you for supporting the foundation!",
            event.donor_name, event.amount
        );
        let body = json!({
            "apiKey": self.api_key.reveal(),
            "number": number,
            "message": message,
        });
        match self.client.post(&self.api_url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("📣️ WhatsApp message sent to {number} for donation [{}]", event.payment_id);
            },
            Ok(response) => {
                error!("📣️ WhatsApp send for donation [{}] failed with status {}", event.payment_id, response.status());
            },
            Err(e) => {
                error!("📣️ WhatsApp send for donation [{}] failed: {e}", event.payment_id);
            },
        }
    }
}

/// Numbers are stored as the donor typed them; the send API wants the 91 country prefix.
fn normalise_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with("91") && digits.len() > 10 {
        digits
    } else {
        format!("91{digits}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numbers_get_the_country_prefix() {
        assert_eq!(normalise_number("9876543210"), "919876543210");
        assert_eq!(normalise_number("919876543210"), "919876543210");
        assert_eq!(normalise_number("98765 43210"), "919876543210");
        // A local number that merely starts with 91 still gets the prefix
        assert_eq!(normalise_number("9123456789"), "919123456789");
    }
}
