use acg_common::Money;
use actix_web::{http::StatusCode, test, web, App};
use commission_engine::{db_types::OrderStats, MerchantApi};

use crate::{
    data_objects::OrderStatsResponse,
    endpoint_tests::mocks::{test_merchant, MockCommerceDb},
    routes::{order_stats, API_KEY_HEADER},
};

async fn get_stats(db: MockCommerceDb, api_key: Option<&str>) -> (StatusCode, Option<OrderStatsResponse>) {
    let _ = env_logger::try_init();
    let api = MerchantApi::new(db);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .route("/api/stats", web::get().to(order_stats::<MockCommerceDb>)),
    )
    .await;
    let mut req = test::TestRequest::get().uri("/api/stats");
    if let Some(key) = api_key {
        req = req.insert_header((API_KEY_HEADER, key));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = if status.is_success() { Some(test::read_body_json(resp).await) } else { None };
    (status, body)
}

#[actix_web::test]
async fn stats_without_an_api_key_are_unauthorized() {
    let db = MockCommerceDb::new();
    let (status, _) = get_stats(db, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn stats_with_an_unknown_key_are_not_found() {
    let mut db = MockCommerceDb::new();
    db.expect_fetch_merchant_by_api_key().returning(|_| Ok(None));
    let (status, _) = get_stats(db, Some("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn stats_report_the_three_aggregates_in_major_units() {
    let mut db = MockCommerceDb::new();
    db.expect_fetch_merchant_by_api_key().returning(|_| Ok(Some(test_merchant())));
    db.expect_order_stats().returning(|_, _, _| {
        Ok(OrderStats { count: 2, commissions_owed: Money::from_cents(1_000), revenue: Money::from_cents(15_000) })
    });

    let (status, body) = get_stats(db, Some("wdg-api-key")).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.count, 2);
    assert_eq!(body.commissions_owed, 10.0);
    assert_eq!(body.revenue, 150.0);
}
