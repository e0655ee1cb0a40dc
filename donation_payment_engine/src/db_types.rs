use chrono::{DateTime, FixedOffset};
use dpg_common::Paise;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//-----------------------------------   PaymentConfirmation   ---------------------------------------------------------
/// An inbound payment confirmation, exactly as the client (or a gateway webhook) delivered it.
/// Nothing in here is trusted until [`PaymentConfirmation::validate`] and the signature check have
/// passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// The signature over `"{order_id}|{payment_id}"` issued by the gateway.
    pub signature: String,
    #[serde(flatten)]
    pub donation: NewDonation,
}

impl PaymentConfirmation {
    pub fn new(donation: NewDonation, signature: String) -> Self {
        Self { signature, donation }
    }

    /// Check that all required fields are present and the amount is strictly positive.
    /// This runs before any store access; a confirmation that fails here never touches the ledger.
    pub fn validate(&self) -> Result<(), String> {
        if self.signature.trim().is_empty() {
            return Err("Missing required field: signature".to_string());
        }
        self.donation.validate()
    }

    /// Convert the (validated, verified) confirmation into the donation record to persist.
    /// The signature is deliberately dropped; it has served its purpose.
    pub fn into_new_donation(self) -> NewDonation {
        self.donation
    }
}

//--------------------------------------    NewDonation      ----------------------------------------------------------
/// A donation ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    /// The gateway order id issued at order creation.
    pub order_id: String,
    /// The gateway payment id for the completed charge. This is the idempotency key.
    pub payment_id: String,
    pub donor_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// The donation amount in paise.
    pub amount: Paise,
    /// The username of the referring volunteer, if the donation came through a referral link.
    pub referrer: Option<String>,
    pub anonymous: bool,
    pub address: Option<String>,
    pub upi_id: Option<String>,
}

impl NewDonation {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        order_id: S1,
        payment_id: S2,
        donor_name: String,
        email: String,
        amount: Paise,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
            donor_name,
            email,
            phone: None,
            amount,
            referrer: None,
            anonymous: false,
            address: None,
            upi_id: None,
        }
    }

    /// Check that the required donor and gateway fields are present and the amount is strictly
    /// positive.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.donor_name),
            ("email", &self.email),
            ("orderId", &self.order_id),
            ("paymentId", &self.payment_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("Missing required field: {field}"));
            }
        }
        if !self.amount.is_positive() {
            return Err(format!("Invalid amount: {}", self.amount.value()));
        }
        Ok(())
    }

    pub fn with_referrer<S: Into<String>>(mut self, referrer: S) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn with_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

//--------------------------------------      Donation       ----------------------------------------------------------
/// A settled donation. Created exactly once per provider payment id, never mutated, never deleted
/// by the core.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Donation {
    pub id: i64,
    pub order_id: String,
    pub payment_id: String,
    pub donor_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub amount: Paise,
    pub referrer: Option<String>,
    pub anonymous: bool,
    pub address: Option<String>,
    pub upi_id: Option<String>,
    /// Recorded in IST (UTC+05:30), the organisation's reporting time zone.
    pub created_at: DateTime<FixedOffset>,
}

//--------------------------------------    NewVolunteer     ----------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVolunteer {
    pub username: String,
    pub display_name: String,
    pub phone: Option<String>,
}

impl NewVolunteer {
    pub fn new<S1: Into<String>, S2: Into<String>>(username: S1, display_name: S2) -> Self {
        Self { username: username.into(), display_name: display_name.into(), phone: None }
    }
}

//--------------------------------------      Volunteer      ----------------------------------------------------------
/// A fundraiser. `amount` is the cumulative raised total and must equal the sum of all donations
/// naming this volunteer as referrer. It is only ever mutated by the atomic increment inside the
/// ingestion transaction.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub amount: Paise,
    pub campaign_started_at: DateTime<FixedOffset>,
}

#[cfg(test)]
mod test {
    use super::*;

    fn confirmation() -> PaymentConfirmation {
        let donation =
            NewDonation::new("order_1", "pay_1", "Asha".to_string(), "asha@example.com".to_string(), Paise::from_rupees(500));
        PaymentConfirmation::new(donation, "aa".to_string())
    }

    #[test]
    fn valid_confirmation_passes() {
        confirmation().validate().expect("confirmation should be valid");
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        for field in ["name", "email", "orderId", "paymentId", "signature"] {
            let mut c = confirmation();
            match field {
                "name" => c.donation.donor_name = "  ".into(),
                "email" => c.donation.email = String::new(),
                "orderId" => c.donation.order_id = String::new(),
                "paymentId" => c.donation.payment_id = "\t".into(),
                "signature" => c.signature = String::new(),
                _ => unreachable!(),
            }
            let err = c.validate().expect_err("blank field should fail validation");
            assert!(err.contains(field), "{err} should mention {field}");
        }
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut c = confirmation();
        c.donation.amount = Paise::from(0);
        c.validate().expect_err("zero amount should fail");
        c.donation.amount = Paise::from(-100);
        c.validate().expect_err("negative amount should fail");
    }
}
