use donation_payment_engine::{
    db_types::{Donation, NewDonation, NewVolunteer, Volunteer},
    traits::{InsertDonationResult, LedgerDatabase, LedgerError, VolunteerManagement},
};

use mockall::mock;

mock! {
    pub Ledger {}
    impl LedgerDatabase for Ledger {
        fn url(&self) -> &str;
        async fn process_donation(&self, donation: NewDonation) -> Result<InsertDonationResult, LedgerError>;
        async fn fetch_donation_by_payment_id(&self, payment_id: &str) -> Result<Option<Donation>, LedgerError>;
    }
}

mock! {
    pub Volunteers {}
    impl VolunteerManagement for Volunteers {
        async fn fetch_volunteer(&self, username: &str) -> Result<Option<Volunteer>, LedgerError>;
        async fn fetch_donations(&self) -> Result<Vec<Donation>, LedgerError>;
        async fn fetch_donations_for_referrer(&self, username: &str) -> Result<Vec<Donation>, LedgerError>;
        async fn upsert_volunteer(&self, volunteer: NewVolunteer) -> Result<Volunteer, LedgerError>;
    }
}
