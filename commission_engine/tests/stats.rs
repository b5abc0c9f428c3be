mod support;

use acg_common::Money;
use chrono::{Duration, Utc};
use commission_engine::{
    db_types::{NewOrder, OrderId},
    traits::OrderManagement,
    MerchantApi,
};
use support::{incoming, new_test_db, order_flow, seed_merchant};

#[tokio::test]
async fn stats_exclude_commissions_without_an_affiliate() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let api = order_flow(&db);

    // O1: 100.00, 10% commission, attributed to an affiliate
    api.process_order(incoming("oid-100", 10_000, "mia@example.com")).await.unwrap().unwrap();
    // O2: 50.00 with a commission snapshot but no affiliate, as legacy data may have
    let legacy = NewOrder::new(OrderId("oid-101".to_string()), merchant.id, None, Money::from_cents(5_000), Money::from_cents(500));
    db.insert_order(legacy).await.unwrap();

    let stats = MerchantApi::new(db.clone()).order_stats(&merchant, None, None).await.unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.revenue, Money::from_cents(15_000));
    assert_eq!(stats.commissions_owed, Money::from_cents(1_000));
}

#[tokio::test]
async fn default_window_is_the_trailing_day() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let api = order_flow(&db);

    api.process_order(incoming("oid-200", 2_000, "nina@example.com")).await.unwrap().unwrap();
    let affiliate_order = db.fetch_order_by_external_id(&OrderId("oid-200".to_string())).await.unwrap().unwrap();

    // an order from 25 hours ago falls outside the default window
    let mut stale = NewOrder::new(
        OrderId("oid-201".to_string()),
        merchant.id,
        affiliate_order.affiliate_id,
        Money::from_cents(8_000),
        Money::from_cents(800),
    );
    stale.created_at = Utc::now() - Duration::hours(25);
    db.insert_order(stale).await.unwrap();

    let stats = MerchantApi::new(db.clone()).order_stats(&merchant, None, None).await.unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.revenue, Money::from_cents(2_000));
}

#[tokio::test]
async fn explicit_range_bounds_are_honoured() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;

    let mut old = NewOrder::new(OrderId("oid-300".to_string()), merchant.id, None, Money::from_cents(4_000), Money::from_cents(400));
    old.created_at = Utc::now() - Duration::days(10);
    db.insert_order(old).await.unwrap();
    let recent = NewOrder::new(OrderId("oid-301".to_string()), merchant.id, None, Money::from_cents(6_000), Money::from_cents(600));
    db.insert_order(recent).await.unwrap();

    let api = MerchantApi::new(db.clone());
    let from = Utc::now() - Duration::days(11);
    let to = Utc::now() - Duration::days(9);
    let stats = api.order_stats(&merchant, Some(from), Some(to)).await.unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.revenue, Money::from_cents(4_000));
    // no affiliate on the old order, so nothing is owed
    assert_eq!(stats.commissions_owed, Money::from_cents(0));
}

#[tokio::test]
async fn stats_are_scoped_to_the_merchant() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let api = order_flow(&db);
    api.process_order(incoming("oid-400", 3_000, "olga@example.com")).await.unwrap().unwrap();

    // a merchant with no orders sees zeroes
    let other = commission_engine::db_types::NewMerchant::new(
        "gizmos.example.com",
        "Gizmos Ltd",
        "owner@gizmos.example.com",
        "gzm-api-key",
    );
    let other = MerchantApi::new(db.clone()).register(other).await.unwrap();
    let stats = MerchantApi::new(db.clone()).order_stats(&other, None, None).await.unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.revenue, Money::from_cents(0));

    let stats = MerchantApi::new(db.clone()).order_stats(&merchant, None, None).await.unwrap();
    assert_eq!(stats.count, 1);
}
