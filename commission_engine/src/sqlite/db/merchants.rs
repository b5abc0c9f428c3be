use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::Merchant,
    sqlite::db::is_unique_violation,
    traits::CommerceError,
};

/// Inserts the merchant row for an existing account. The UNIQUE constraint on `domain` backs the duplicate check, so
/// a concurrent registration for the same domain fails cleanly rather than inserting twice.
pub async fn insert_merchant(
    account_id: i64,
    domain: &str,
    display_name: &str,
    conn: &mut SqliteConnection,
) -> Result<Merchant, CommerceError> {
    let result: Result<Merchant, sqlx::Error> = sqlx::query_as(
        r#"
            INSERT INTO merchants (account_id, domain, display_name)
            VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(account_id)
    .bind(domain)
    .bind(display_name)
    .fetch_one(conn)
    .await;
    match result {
        Ok(merchant) => {
            debug!("🏪️ Merchant [{domain}] registered with id {}", merchant.id);
            Ok(merchant)
        },
        Err(e) if is_unique_violation(&e) => Err(CommerceError::MerchantAlreadyExists(domain.to_string())),
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_merchant_by_domain(
    domain: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Merchant>, sqlx::Error> {
    let merchant =
        sqlx::query_as("SELECT * FROM merchants WHERE domain = $1").bind(domain).fetch_optional(conn).await?;
    Ok(merchant)
}

/// Resolves the merchant whose account secret matches the presented API key.
pub async fn fetch_merchant_by_api_key(
    api_key: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Merchant>, sqlx::Error> {
    let merchant = sqlx::query_as(
        r#"
        SELECT
            merchants.id AS id,
            account_id,
            domain,
            display_name,
            merchants.created_at AS created_at
        FROM merchants JOIN accounts ON merchants.account_id = accounts.id
        WHERE accounts.secret = $1 AND accounts.role = 'Merchant'"#,
    )
    .bind(api_key)
    .fetch_optional(conn)
    .await?;
    Ok(merchant)
}

pub async fn fetch_merchant_for_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Merchant>, sqlx::Error> {
    let merchant = sqlx::query_as(
        r#"
        SELECT
            merchants.id AS id,
            account_id,
            domain,
            display_name,
            merchants.created_at AS created_at
        FROM merchants JOIN accounts ON merchants.account_id = accounts.id
        WHERE accounts.email = $1"#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(merchant)
}
