use dpg_common::{Paise, INR_CURRENCY_CODE};
use serde::{Deserialize, Serialize};

/// The request body for Razorpay's `POST /v1/orders` endpoint. Amounts are integer paise on the
/// wire.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

impl NewOrderRequest {
    pub fn new(amount: Paise, receipt: String, notes: OrderNotes) -> Self {
        Self { amount: amount.value(), currency: INR_CURRENCY_CODE.to_string(), receipt, notes }
    }
}

/// Free-form metadata attached to an order. Razorpay echoes these back in dashboard views and
/// webhook payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderNotes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// An order as returned by Razorpay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

impl RazorpayOrder {
    pub fn amount(&self) -> Paise {
        Paise::from(self.amount)
    }
}
