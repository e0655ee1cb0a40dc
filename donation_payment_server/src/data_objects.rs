use std::fmt::Display;

use donation_payment_engine::{
    db_types::{Donation, NewDonation, PaymentConfirmation},
    helpers::format_ist_date,
};
use dpg_common::{helpers::non_blank, Paise};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

//----------------------------------------   Create order  -----------------------------------------------------------
/// Field names follow the donation-form frontend, which sends whole rupees.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub amount: Option<i64>,
    pub anonymous: Option<bool>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Paise, as the gateway reports it.
    pub amount: i64,
    pub currency: String,
    /// The gateway key id the client needs to open the checkout widget.
    pub key: String,
    /// Display name for the checkout widget; "Anonymous Donor" when the donor asked for anonymity.
    pub name: String,
}

//----------------------------------------   Verify payment  ---------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

//----------------------------------------   Process payment  --------------------------------------------------------
/// The canonical payment-confirmation payload. `referenceName` and `username` are both accepted
/// as the referrer (in that order of preference) because older frontends sent one or the other.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessPaymentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub anonymous: Option<bool>,
    /// Whole rupees.
    pub amount: Option<i64>,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    #[serde(rename = "paymentId")]
    pub payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    #[serde(rename = "upiId")]
    pub upi_id: Option<String>,
    #[serde(rename = "referenceName")]
    pub reference_name: Option<String>,
    pub username: Option<String>,
}

impl ProcessPaymentRequest {
    /// Build the engine confirmation. Missing fields become blanks/zeroes here; the engine's
    /// validation step is the single source of truth for rejecting them.
    pub fn into_confirmation(self) -> PaymentConfirmation {
        let referrer = non_blank(self.reference_name).or_else(|| non_blank(self.username));
        let donation = NewDonation {
            order_id: self.order_id.unwrap_or_default(),
            payment_id: self.payment_id.unwrap_or_default(),
            donor_name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: non_blank(self.phone),
            amount: Paise::from_rupees(self.amount.unwrap_or_default()),
            referrer,
            anonymous: self.anonymous.unwrap_or_default(),
            address: non_blank(self.address),
            upi_id: non_blank(self.upi_id),
        };
        PaymentConfirmation::new(donation, self.razorpay_signature.unwrap_or_default())
    }
}

//----------------------------------------    Save payment   ---------------------------------------------------------
/// Legacy payload for the deprecated `/save-payment` endpoint. No signature; the referrer rides
/// in `refName`.
#[derive(Debug, Clone, Deserialize)]
pub struct SavePaymentRequest {
    #[serde(rename = "refName")]
    pub ref_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Whole rupees.
    pub amount: Option<i64>,
    pub anonymous: Option<bool>,
    pub address: Option<String>,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
}

impl SavePaymentRequest {
    pub fn into_new_donation(self) -> NewDonation {
        NewDonation {
            order_id: self.razorpay_order_id.unwrap_or_default(),
            payment_id: self.razorpay_payment_id.unwrap_or_default(),
            donor_name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: non_blank(self.phone),
            amount: Paise::from_rupees(self.amount.unwrap_or_default()),
            referrer: non_blank(self.ref_name),
            anonymous: self.anonymous.unwrap_or_default(),
            address: non_blank(self.address),
            upi_id: None,
        }
    }
}

//----------------------------------------   Donation list   ---------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct DonationQuery {
    pub username: Option<String>,
}

/// A donation as the dashboard displays it: amounts in whole rupees and the settlement date
/// rendered as `dd-mm-yyyy` IST.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    pub payment_id: String,
    pub order_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub amount: i64,
    pub ref_name: Option<String>,
    pub anonymous: bool,
    pub address: Option<String>,
    pub upi_id: Option<String>,
    pub created_at: String,
    pub formatted_date: String,
}

impl From<Donation> for DonationView {
    fn from(d: Donation) -> Self {
        Self {
            payment_id: d.payment_id,
            order_id: d.order_id,
            name: d.donor_name,
            email: d.email,
            phone: d.phone,
            amount: d.amount.rupees(),
            ref_name: d.referrer,
            anonymous: d.anonymous,
            address: d.address,
            upi_id: d.upi_id,
            created_at: d.created_at.to_rfc3339(),
            formatted_date: format_ist_date(&d.created_at),
        }
    }
}
