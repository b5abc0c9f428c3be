mod support;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use commission_engine::{
    events::{EventHandlers, EventHooks},
    traits::{AffiliateManagement, OrderManagement},
    PayoutApi,
};
use support::{incoming, new_test_db, order_flow, seed_merchant};

#[tokio::test]
async fn one_task_is_queued_per_unpaid_order() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    // five orders for the same affiliate, two of which the downstream worker has already settled
    for i in 1..=5 {
        api.process_order(incoming(&format!("oid-90{i}"), 10_000, "kim@example.com")).await.unwrap().unwrap();
    }
    let affiliate = db.fetch_affiliate_for_email("kim@example.com").await.unwrap().unwrap();
    db.mark_order_paid(&"oid-901".parse().unwrap()).await.unwrap();
    db.mark_order_paid(&"oid-902".parse().unwrap()).await.unwrap();

    let queued = Arc::new(AtomicUsize::new(0));
    let counter = queued.clone();
    let mut hooks = EventHooks::default();
    hooks.on_payout_queued(move |ev| {
        let counter = counter.clone();
        Box::pin(async move {
            assert!(ev.order.external_order_id.as_str().starts_with("oid-9"));
            counter.fetch_add(1, Ordering::SeqCst);
        })
    });
    let handlers = EventHandlers::new(8, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let payouts = PayoutApi::new(db.clone(), producers);
    let orders = payouts.payout(&affiliate).await.unwrap();
    assert_eq!(orders.len(), 3);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(queued.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn affiliate_with_no_unpaid_orders_queues_nothing() {
    let db = new_test_db().await;
    seed_merchant(&db).await;
    let api = order_flow(&db);

    api.process_order(incoming("oid-950", 10_000, "lee@example.com")).await.unwrap().unwrap();
    let affiliate = db.fetch_affiliate_for_email("lee@example.com").await.unwrap().unwrap();
    db.mark_order_paid(&"oid-950".parse().unwrap()).await.unwrap();

    let payouts = PayoutApi::new(db.clone(), Default::default());
    let orders = payouts.payout(&affiliate).await.unwrap();
    assert!(orders.is_empty());
}
