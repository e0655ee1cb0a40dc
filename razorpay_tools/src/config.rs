use dpg_common::Secret;
use log::*;

const DEFAULT_API_URL: &str = "https://api.razorpay.com";

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    /// The public key id, e.g. "rzp_live_xxxxxxxx". Sent back to clients so they can open the
    /// checkout widget.
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub api_url: String,
}

impl RazorpayConfig {
    pub fn new_from_env_or_default() -> Self {
        let key_id = std::env::var("DPG_RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            warn!("DPG_RAZORPAY_KEY_ID not set, using a (probably useless) default");
            "rzp_test_0000000000".to_string()
        });
        let key_secret = Secret::new(std::env::var("DPG_RAZORPAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("DPG_RAZORPAY_KEY_SECRET not set, using a (probably useless) default");
            "00000000000000".to_string()
        }));
        let api_url = std::env::var("DPG_RAZORPAY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self { key_id, key_secret, api_url }
    }
}
