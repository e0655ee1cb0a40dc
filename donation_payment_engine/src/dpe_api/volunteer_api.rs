use crate::{
    db_types::{Donation, NewVolunteer, Volunteer},
    traits::{LedgerError, VolunteerManagement},
};

/// `VolunteerApi` serves read-side queries: volunteer lookups and donation listings for the
/// dashboard. It never mutates a volunteer's cumulative total; that happens exclusively inside
/// the ingestion transaction.
#[derive(Debug, Clone)]
pub struct VolunteerApi<B> {
    db: B,
}

impl<B> VolunteerApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> VolunteerApi<B>
where B: VolunteerManagement
{
    pub async fn volunteer(&self, username: &str) -> Result<Option<Volunteer>, LedgerError> {
        self.db.fetch_volunteer(username).await
    }

    /// All donations, newest first. When `referrer` is given, only donations attributed to that
    /// volunteer.
    pub async fn donations(&self, referrer: Option<&str>) -> Result<Vec<Donation>, LedgerError> {
        match referrer {
            Some(username) => self.db.fetch_donations_for_referrer(username).await,
            None => self.db.fetch_donations().await,
        }
    }

    pub async fn upsert_volunteer(&self, volunteer: NewVolunteer) -> Result<Volunteer, LedgerError> {
        self.db.upsert_volunteer(volunteer).await
    }
}
