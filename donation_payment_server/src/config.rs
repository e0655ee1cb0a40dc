use std::env;

use donation_payment_engine::sqlite::db_url;
use dpg_common::Secret;
use log::*;
use razorpay_tools::RazorpayConfig;

const DEFAULT_DPG_HOST: &str = "127.0.0.1";
const DEFAULT_DPG_PORT: u16 = 5000;
const DEFAULT_WHATSAPP_API_URL: &str = "https://wasenderapi.com/api/send";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub razorpay: RazorpayConfig,
    pub whatsapp: WhatsAppConfig,
    pub mail: MailConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DPG_HOST.to_string(),
            port: DEFAULT_DPG_PORT,
            database_url: String::default(),
            razorpay: RazorpayConfig::default(),
            whatsapp: WhatsAppConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("DPG_HOST").ok().unwrap_or_else(|| DEFAULT_DPG_HOST.into());
        let port = env::var("DPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for DPG_PORT. {e} Using the default, {DEFAULT_DPG_PORT}, instead."
                    );
                    DEFAULT_DPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_DPG_PORT);
        let database_url = db_url();
        let razorpay = RazorpayConfig::new_from_env_or_default();
        let whatsapp = WhatsAppConfig::from_env_or_default();
        let mail = MailConfig::from_env_or_default();
        Self { host, port, database_url, razorpay, whatsapp, mail }
    }
}

/// WhatsApp donor notifications. Disabled entirely when no API key is configured.
#[derive(Clone, Debug, Default)]
pub struct WhatsAppConfig {
    pub api_url: String,
    pub api_key: Option<Secret<String>>,
}

impl WhatsAppConfig {
    pub fn from_env_or_default() -> Self {
        let api_url = env::var("DPG_WHATSAPP_API_URL").unwrap_or_else(|_| DEFAULT_WHATSAPP_API_URL.to_string());
        let api_key = match env::var("DPG_WHATSAPP_API_KEY") {
            Ok(key) => Some(Secret::new(key)),
            Err(_) => {
                info!("🪛️ DPG_WHATSAPP_API_KEY is not set. Donor WhatsApp messages are disabled.");
                None
            },
        };
        Self { api_url, api_key }
    }
}

/// Donor receipt emails, sent via the mail provider's transactional HTTP API. Disabled entirely
/// when no API key is configured.
#[derive(Clone, Debug, Default)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: Option<Secret<String>>,
    pub from: String,
    pub from_name: String,
}

impl MailConfig {
    pub fn from_env_or_default() -> Self {
        let api_url = env::var("DPG_MAIL_API_URL").unwrap_or_default();
        let api_key = match env::var("DPG_MAIL_API_KEY") {
            Ok(key) => Some(Secret::new(key)),
            Err(_) => {
                info!("🪛️ DPG_MAIL_API_KEY is not set. Donor receipt emails are disabled.");
                None
            },
        };
        let from = env::var("DPG_MAIL_FROM").unwrap_or_else(|_| "donations@example.org".to_string());
        let from_name = env::var("DPG_MAIL_FROM_NAME").unwrap_or_else(|_| "Donations".to_string());
        Self { api_url, api_key, from, from_name }
    }
}
