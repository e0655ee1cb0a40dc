use crate::{
    db_types::{Donation, NewVolunteer, Volunteer},
    traits::LedgerError,
};

/// The `VolunteerManagement` trait provides queries over volunteers and their attributed
/// donations. The write side of the ledger lives in [`super::LedgerDatabase`]; nothing in this
/// trait ever touches a volunteer's cumulative total.
#[allow(async_fn_in_trait)]
pub trait VolunteerManagement {
    /// Fetches the volunteer with the given username. Returns `None` if no such volunteer exists.
    async fn fetch_volunteer(&self, username: &str) -> Result<Option<Volunteer>, LedgerError>;

    /// Fetches all donations, newest first.
    async fn fetch_donations(&self) -> Result<Vec<Donation>, LedgerError>;

    /// Fetches the donations attributed to the given volunteer username, newest first.
    async fn fetch_donations_for_referrer(&self, username: &str) -> Result<Vec<Donation>, LedgerError>;

    /// Creates the volunteer, or updates the display name and phone if the username already
    /// exists. The cumulative total is never touched here. This is an administrative operation
    /// (campaign onboarding, test fixtures); the ingestion path never creates volunteers.
    async fn upsert_volunteer(&self, volunteer: NewVolunteer) -> Result<Volunteer, LedgerError>;
}
