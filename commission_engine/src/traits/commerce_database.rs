use thiserror::Error;

use crate::{
    db_types::{AccountRole, OrderId},
    traits::{AffiliateManagement, MerchantManagement, OrderManagement},
};

/// The top-level behaviour contract for backends supporting the commission gateway.
///
/// A backend must be able to:
/// * register merchants and resolve them by domain, API key or account email,
/// * create affiliates atomically and resolve them by customer email,
/// * insert orders idempotently and answer unpaid-order and statistics queries.
#[allow(async_fn_in_trait)]
pub trait CommerceDatabase: Clone + MerchantManagement + AffiliateManagement + OrderManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), CommerceError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CommerceError {
    #[error("There is an internal database engine error: {0}")]
    DatabaseError(String),
    #[error("No merchant is registered for domain {0}")]
    MerchantNotFound(String),
    #[error("A merchant is already registered for domain {0}")]
    MerchantAlreadyExists(String),
    #[error("An account with email {email} already exists as {role}")]
    AccountAlreadyExists { email: String, role: AccountRole },
    #[error("The requested affiliate #{0} does not exist")]
    AffiliateNotFound(i64),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(OrderId),
}

impl From<sqlx::Error> for CommerceError {
    fn from(e: sqlx::Error) -> Self {
        CommerceError::DatabaseError(e.to_string())
    }
}
