use chrono::{DateTime, Utc};
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStats, PayoutStatus},
    traits::{CommerceError, InsertOrderResult},
};

/// Inserts the order if no order with its external id exists yet.
///
/// The dedup check and the insert are one statement: the UNIQUE constraint on `external_order_id` arbitrates, and a
/// conflicting insert simply returns no row. Two concurrent webhooks for the same order therefore cannot both
/// insert, and the loser reports a benign [`InsertOrderResult::AlreadyExists`].
pub async fn idempotent_insert(
    order: NewOrder,
    conn: &mut SqliteConnection,
) -> Result<InsertOrderResult, CommerceError> {
    let inserted: Option<Order> = sqlx::query_as(
        r#"
            INSERT INTO orders (
                external_order_id,
                merchant_id,
                affiliate_id,
                subtotal,
                commission_owed,
                payout_status,
                discount_code,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (external_order_id) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(order.external_order_id.clone())
    .bind(order.merchant_id)
    .bind(order.affiliate_id)
    .bind(order.subtotal)
    .bind(order.commission_owed)
    .bind(PayoutStatus::Unpaid)
    .bind(order.discount_code)
    .bind(order.created_at)
    .fetch_optional(conn)
    .await?;
    match inserted {
        Some(order) => {
            debug!("📝️ Order [{}] inserted with id {}", order.external_order_id, order.id);
            Ok(InsertOrderResult::Inserted(order))
        },
        None => Ok(InsertOrderResult::AlreadyExists(order.external_order_id)),
    }
}

/// Returns the entry in the orders table for the corresponding `external_order_id`
pub async fn fetch_order_by_external_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE external_order_id = $1")
        .bind(order_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Fetches all unpaid orders for the given affiliate, ordered by `created_at` ascending.
pub async fn fetch_unpaid_orders_for_affiliate(
    affiliate_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as(
        "SELECT * FROM orders WHERE affiliate_id = $1 AND payout_status = 'Unpaid' ORDER BY created_at ASC",
    )
    .bind(affiliate_id)
    .fetch_all(conn)
    .await?;
    Ok(orders)
}

pub(crate) async fn update_payout_status(
    order_id: &OrderId,
    status: PayoutStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, CommerceError> {
    let result: Option<Order> = sqlx::query_as(
        "UPDATE orders SET payout_status = $1, updated_at = CURRENT_TIMESTAMP WHERE external_order_id = $2 \
         RETURNING *",
    )
    .bind(status)
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    result.ok_or_else(|| CommerceError::OrderNotFound(order_id.clone()))
}

/// Aggregates the merchant's orders created in `[from, to]`. Orders with no attributed affiliate are excluded from
/// the commission total but still count towards order count and revenue.
pub async fn order_stats(
    merchant_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<OrderStats, sqlx::Error> {
    let stats = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) AS count,
            COALESCE(SUM(CASE WHEN affiliate_id IS NOT NULL THEN commission_owed ELSE 0 END), 0) AS commissions_owed,
            COALESCE(SUM(subtotal), 0) AS revenue
        FROM orders
        WHERE merchant_id = $1 AND created_at >= $2 AND created_at <= $3"#,
    )
    .bind(merchant_id)
    .bind(from)
    .bind(to)
    .fetch_one(conn)
    .await?;
    Ok(stats)
}
