use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Account, AccountRole},
    traits::CommerceError,
};

pub async fn fetch_account_by_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Account>, sqlx::Error> {
    let account = sqlx::query_as(
        "SELECT id, email, name, role, created_at, updated_at FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(account)
}

/// Inserts a new account row using the given connection. This is not atomic on its own. Callers that create an
/// account together with a merchant or affiliate record should embed this call inside a transaction and pass
/// `&mut *tx` as the connection argument.
pub async fn insert_account(
    email: &str,
    name: &str,
    role: AccountRole,
    secret: &str,
    conn: &mut SqliteConnection,
) -> Result<Account, CommerceError> {
    let account: Account = sqlx::query_as(
        r#"
            INSERT INTO accounts (email, name, role, secret)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, created_at, updated_at;
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(secret)
    .fetch_one(conn)
    .await?;
    debug!("🧑️ {role} account created for {email} with id {}", account.id);
    Ok(account)
}
