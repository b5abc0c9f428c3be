mod support;

use acg_common::Money;
use commission_engine::{db_types::PayoutStatus, traits::{AffiliateManagement, OrderManagement}};
use support::{incoming, new_test_db, order_flow, seed_merchant};

#[tokio::test]
async fn replayed_webhook_is_a_no_op() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    let first = api.process_order(incoming("oid-1001", 10_000, "alice@example.com")).await.unwrap();
    let first = first.expect("first webhook should persist an order");

    // Same order id, different payload. The replay must not write anything.
    let replay = api.process_order(incoming("oid-1001", 99_999, "mallory@example.com")).await.unwrap();
    assert!(replay.is_none());

    let stored = db.fetch_order_by_external_id(&first.external_order_id).await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.subtotal, Money::from_cents(10_000));
    // The varied payload must not have created a second affiliate either
    assert!(db.fetch_affiliate_for_email("mallory@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_customer_becomes_an_affiliate_at_the_default_rate() {
    let db = new_test_db().await;
    let merchant = seed_merchant(&db).await;
    let api = order_flow(&db);

    let order = api.process_order(incoming("oid-2001", 20_000, "bob@example.com")).await.unwrap().unwrap();

    let affiliate = db.fetch_affiliate_for_email("bob@example.com").await.unwrap().expect("affiliate should exist");
    assert_eq!(affiliate.merchant_id, merchant.id);
    assert_eq!(affiliate.commission_rate.as_fraction(), 0.1);
    assert_eq!(order.affiliate_id, Some(affiliate.id));
    assert_eq!(order.merchant_id, merchant.id);
    assert_eq!(order.payout_status, PayoutStatus::Unpaid);
}

#[tokio::test]
async fn known_customer_is_credited_without_a_new_affiliate() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    let first = api.process_order(incoming("oid-3001", 5_000, "carol@example.com")).await.unwrap().unwrap();
    let affiliate = db.fetch_affiliate_for_email("carol@example.com").await.unwrap().unwrap();

    let second = api.process_order(incoming("oid-3002", 7_500, "carol@example.com")).await.unwrap().unwrap();
    assert_eq!(second.affiliate_id, Some(affiliate.id));
    assert_eq!(first.affiliate_id, second.affiliate_id);
}

#[tokio::test]
async fn commission_is_subtotal_times_rate() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    // 200.00 at the default 10% rate owes exactly 20.00
    let order = api.process_order(incoming("oid-4001", 20_000, "dave@example.com")).await.unwrap().unwrap();
    assert_eq!(order.commission_owed, Money::from_cents(2_000));
}

#[tokio::test]
async fn discount_code_is_stored_as_received() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    let mut order = incoming("oid-5001", 1_000, "erin@example.com");
    order.discount_code = "SUMMER-SALE".to_string();
    let order = api.process_order(order).await.unwrap().unwrap();
    assert_eq!(order.discount_code.as_deref(), Some("SUMMER-SALE"));
}

#[tokio::test]
async fn unknown_merchant_domain_is_fatal() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    let mut order = incoming("oid-6001", 1_000, "frank@example.com");
    order.merchant_domain = "nobody.example.com".to_string();
    let err = api.process_order(order).await.expect_err("expected a processing failure");
    let msg = err.to_string();
    assert!(msg.starts_with("Failed to process order"), "unexpected message: {msg}");
    assert!(msg.contains("nobody.example.com"), "cause should name the domain: {msg}");
    // nothing was written
    assert!(db.fetch_affiliate_for_email("frank@example.com").await.unwrap().is_none());
}
