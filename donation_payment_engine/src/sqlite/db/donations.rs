use chrono::{DateTime, FixedOffset};
use sqlx::SqliteConnection;

use crate::{
    db_types::{Donation, NewDonation},
    traits::LedgerError,
};

pub async fn fetch_donation_by_payment_id(
    payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Donation>, LedgerError> {
    let donation = sqlx::query_as("SELECT * FROM donations WHERE payment_id = $1")
        .bind(payment_id)
        .fetch_optional(conn)
        .await?;
    Ok(donation)
}

/// Inserts a new donation row. This is not atomic on its own; embed the call inside a transaction
/// and pass `&mut *tx` as the connection argument to get atomicity with the volunteer increment.
///
/// The `created_at` timestamp is supplied by the caller so that it can be fixed at transaction
/// start rather than at statement execution.
pub async fn insert_donation(
    donation: NewDonation,
    created_at: DateTime<FixedOffset>,
    conn: &mut SqliteConnection,
) -> Result<Donation, LedgerError> {
    let payment_id = donation.payment_id.clone();
    let donation = sqlx::query_as(
        r#"
            INSERT INTO donations (
                order_id,
                payment_id,
                donor_name,
                email,
                phone,
                amount,
                referrer,
                anonymous,
                address,
                upi_id,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *;
        "#,
    )
    .bind(donation.order_id)
    .bind(donation.payment_id)
    .bind(donation.donor_name)
    .bind(donation.email)
    .bind(donation.phone)
    .bind(donation.amount)
    .bind(donation.referrer)
    .bind(donation.anonymous)
    .bind(donation.address)
    .bind(donation.upi_id)
    .bind(created_at)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => LedgerError::DonationAlreadyExists(payment_id),
        _ => LedgerError::from(e),
    })?;
    Ok(donation)
}

pub async fn fetch_donations(conn: &mut SqliteConnection) -> Result<Vec<Donation>, LedgerError> {
    let donations = sqlx::query_as("SELECT * FROM donations ORDER BY created_at DESC, id DESC")
        .fetch_all(conn)
        .await?;
    Ok(donations)
}

pub async fn fetch_donations_for_referrer(
    username: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Donation>, LedgerError> {
    let donations = sqlx::query_as("SELECT * FROM donations WHERE referrer = $1 ORDER BY created_at DESC, id DESC")
        .bind(username)
        .fetch_all(conn)
        .await?;
    Ok(donations)
}
