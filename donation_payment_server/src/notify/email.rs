use std::sync::Arc;

use donation_payment_engine::{events::DonationReceivedEvent, helpers::format_ist_date};
use dpg_common::Secret;
use log::*;
use reqwest::Client;
use serde_json::json;

use crate::{config::MailConfig, errors::ServerError};

/// Sends the donor a receipt email via the mail provider's transactional HTTP API.
#[derive(Clone)]
pub struct MailNotifier {
    api_url: String,
    api_key: Secret<String>,
    from: String,
    from_name: String,
    client: Arc<Client>,
}

impl MailNotifier {
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>, ServerError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let client = Client::builder().build().map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Some(Self {
            api_url: config.api_url.clone(),
            api_key,
            from: config.from.clone(),
            from_name: config.from_name.clone(),
            client: Arc::new(client),
        }))
    }

    /// Fire-and-forget, like the WhatsApp path: log and move on, never bubble up.
    pub async fn send_donation_receipt(&self, event: &DonationReceivedEvent) {
        let subject = format!("Thank you for your donation of {}", event.amount);
        let html = format!(
            "<p>Dear {name},</p>\
             <p>We have received your contribution of <b>{amount}</b> on {date}. Your payment reference is \
             <code>{payment_id}</code>.</p>\
             <p>Thank you for your generosity!</p>",
            name = event.donor_name,
            amount = event.amount,
            date = format_ist_date(&event.timestamp),
            payment_id = event.payment_id,
        );
        let body = json!({
            "from": { "address": self.from, "name": self.from_name },
            "to": [{ "email_address": { "address": event.email, "name": event.donor_name } }],
            "subject": subject,
            "htmlbody": html,
        });
        let request = self
            .client
            .post(&self.api_url)
            .header("Authorization", self.api_key.reveal())
            .json(&body);
        match request.send().await {
            Ok(response) if response.status().is_success() => {
                debug!("📣️ Receipt email sent to {} for donation [{}]", event.email, event.payment_id);
            },
            Ok(response) => {
                error!("📣️ Receipt email for donation [{}] failed with status {}", event.payment_id, response.status());
            },
            Err(e) => {
                error!("📣️ Receipt email for donation [{}] failed: {e}", event.payment_id);
            },
        }
    }
}
