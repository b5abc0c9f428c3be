use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Affiliate, NewAffiliate},
    traits::CommerceError,
};

/// Inserts the affiliate row for an existing account. Not atomic on its own; the account + affiliate pair is created
/// inside a transaction by the caller.
pub async fn insert_affiliate(
    account_id: i64,
    affiliate: &NewAffiliate,
    conn: &mut SqliteConnection,
) -> Result<Affiliate, CommerceError> {
    let affiliate: Affiliate = sqlx::query_as(
        r#"
            INSERT INTO affiliates (account_id, merchant_id, commission_rate, discount_code)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(account_id)
    .bind(affiliate.merchant_id)
    .bind(affiliate.commission_rate)
    .bind(affiliate.discount_code.as_deref())
    .fetch_one(conn)
    .await?;
    debug!(
        "🤝️ Affiliate created with id {} for merchant #{} at {}",
        affiliate.id, affiliate.merchant_id, affiliate.commission_rate
    );
    Ok(affiliate)
}

/// Two-step attribution lookup: the affiliate-role account for the email, then the affiliate linked to it. The email
/// match is global, not scoped to a merchant.
pub async fn fetch_affiliate_for_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Affiliate>, sqlx::Error> {
    let affiliate = sqlx::query_as(
        r#"
        SELECT
            affiliates.id AS id,
            account_id,
            merchant_id,
            commission_rate,
            discount_code,
            affiliates.created_at AS created_at
        FROM affiliates JOIN accounts ON affiliates.account_id = accounts.id
        WHERE accounts.email = $1 AND accounts.role = 'Affiliate'"#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(affiliate)
}

pub async fn fetch_affiliate_by_id(
    affiliate_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Affiliate>, sqlx::Error> {
    let affiliate =
        sqlx::query_as("SELECT * FROM affiliates WHERE id = $1").bind(affiliate_id).fetch_optional(conn).await?;
    Ok(affiliate)
}
