use dpg_common::Paise;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewVolunteer, Volunteer},
    helpers::ist_now,
    traits::LedgerError,
};

pub async fn fetch_volunteer(username: &str, conn: &mut SqliteConnection) -> Result<Option<Volunteer>, LedgerError> {
    let volunteer = sqlx::query_as("SELECT * FROM volunteers WHERE username = $1")
        .bind(username)
        .fetch_optional(conn)
        .await?;
    Ok(volunteer)
}

/// Atomically add `delta` to the volunteer's cumulative total, returning the new total.
///
/// Returns `Ok(None)` if no volunteer with that username exists. This function never creates a
/// volunteer as a side effect; an unknown referrer is the caller's decision to make.
pub async fn increment_amount(
    username: &str,
    delta: Paise,
    conn: &mut SqliteConnection,
) -> Result<Option<Paise>, LedgerError> {
    let amount = delta.value();
    let new_total: Option<i64> =
        sqlx::query_scalar("UPDATE volunteers SET amount = amount + $1 WHERE username = $2 RETURNING amount")
            .bind(amount)
            .bind(username)
            .fetch_optional(conn)
            .await?;
    Ok(new_total.map(Paise::from))
}

/// Creates the volunteer, or refreshes display name and phone if the username is already taken.
/// The cumulative total is deliberately left alone on conflict.
pub async fn upsert_volunteer(volunteer: NewVolunteer, conn: &mut SqliteConnection) -> Result<Volunteer, LedgerError> {
    let campaign_started_at = ist_now();
    let volunteer = sqlx::query_as(
        r#"
            INSERT INTO volunteers (username, display_name, phone, campaign_started_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO UPDATE
                SET display_name = excluded.display_name,
                    phone = excluded.phone
            RETURNING *;
        "#,
    )
    .bind(volunteer.username)
    .bind(volunteer.display_name)
    .bind(volunteer.phone)
    .bind(campaign_started_at)
    .fetch_one(conn)
    .await?;
    Ok(volunteer)
}
