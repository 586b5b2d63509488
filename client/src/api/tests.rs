use super::*;
use crate::error::ApiErrorKind;
use crate::guard::{GuardDecision, RouteGuard};
use crate::http::MockHttpClient;
use crate::store::{MemoryStorage, Session};
use serde_json::json;
use wms_shared::protocol::{ProductFilters, TransactionFilters};
use wms_shared::{
    ChartPeriod, CreateProduct, CreateTransaction, ProductSortField, Role, TransactionType,
};

const BASE: &str = "http://api.test/api";

// =========================================================
// Helpers
// =========================================================

fn setup() -> (MemoryStorage, ApiClient<MockHttpClient, MemoryStorage>) {
    let storage = MemoryStorage::new();
    let client = ApiClient::new(
        ClientConfig::new(format!("{}/", BASE)),
        MockHttpClient::new(),
        TokenStore::new(storage.clone()),
    );
    (storage, client)
}

fn url(endpoint: &str) -> String {
    format!("{}{}", BASE, endpoint)
}

fn product_json(id: u64, stock: i64, minimum_stock: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Item {}", id),
        "sku": format!("SKU-{}", id),
        "stock": stock,
        "minimum_stock": minimum_stock,
        "shelf_location": "A-1"
    })
}

// =========================================================
// Headers
// =========================================================

#[tokio::test]
async fn no_authorization_header_when_auth_not_required() {
    let (_, client) = setup();
    client.tokens().set("secret-token");
    client
        .http()
        .mock_response(&url("/ping"), 200, json!({ "ok": true }));

    let _: serde_json::Value = client
        .request("/ping", RequestOptions::default().without_auth())
        .await
        .unwrap();

    let req = client.http().last_request();
    assert_eq!(req.header("Authorization"), None);
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn bearer_header_when_auth_required_and_token_present() {
    let (_, client) = setup();
    client.tokens().set("secret-token");
    client
        .http()
        .mock_response(&url("/ping"), 200, json!(null));

    let _: Option<serde_json::Value> = client
        .request("/ping", RequestOptions::default())
        .await
        .unwrap();

    let req = client.http().last_request();
    assert_eq!(req.header("Authorization"), Some("Bearer secret-token"));
}

#[tokio::test]
async fn missing_token_is_not_an_error() {
    let (_, client) = setup();
    client
        .http()
        .mock_response(&url("/ping"), 200, json!([]));

    let value: Vec<u8> = client.request("/ping", RequestOptions::default()).await.unwrap();
    assert!(value.is_empty());
    assert_eq!(client.http().last_request().header("Authorization"), None);
}

#[tokio::test]
async fn caller_headers_merge_over_content_type() {
    let (_, client) = setup();
    client.http().mock_raw(&url("/upload"), 200, "{}");

    let options = RequestOptions::method(HttpMethod::Post)
        .with_header("content-type", "text/plain")
        .with_header("X-Trace", "1");
    let _: serde_json::Value = client.request("/upload", options).await.unwrap();

    let req = client.http().last_request();
    assert_eq!(req.header("Content-Type"), Some("text/plain"));
    assert_eq!(req.header("X-Trace"), Some("1"));
    assert_eq!(req.method, HttpMethod::Post);
}

// =========================================================
// Error normalization
// =========================================================

#[tokio::test]
async fn nested_error_message_wins() {
    let (_, client) = setup();
    client.http().mock_response(
        &url("/products"),
        422,
        json!({ "messages": { "error": "SKU already exists" }, "message": "Validation failed" }),
    );

    let err = client
        .products()
        .create(&CreateProduct::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status);
    assert_eq!(err.status_code(), Some(422));
    assert_eq!(err.to_string(), "SKU already exists");
}

#[tokio::test]
async fn top_level_message_is_second_choice() {
    let (_, client) = setup();
    client
        .http()
        .mock_response(&url("/auth/login"), 401, json!({ "message": "Invalid credentials" }));

    let err = client.auth().login("a@b.c", "nope").await.unwrap_err();
    assert_eq!(err.message(), "Invalid credentials");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn falls_back_to_http_status() {
    let (_, client) = setup();
    client.http().mock_raw(&url("/dashboard"), 500, "<html>oops</html>");
    let err = client.dashboard().get_summary().await.unwrap_err();
    assert_eq!(err.message(), "HTTP 500");

    client
        .http()
        .mock_response(&url("/dashboard"), 503, json!({ "error": "down" }));
    let err = client.dashboard().get_summary().await.unwrap_err();
    assert_eq!(err.message(), "HTTP 503");
}

#[test]
fn error_message_skips_empty_and_non_string_fields() {
    assert_eq!(
        error_message(400, r#"{"messages":{"error":""},"message":"bad"}"#),
        "bad"
    );
    assert_eq!(error_message(400, r#"{"message":{"code":1}}"#), "HTTP 400");
    assert_eq!(error_message(404, ""), "HTTP 404");
}

#[tokio::test]
async fn network_failure_surfaces_as_network_error() {
    let (_, client) = setup();
    client
        .http()
        .mock_network_failure(&url("/dashboard"), "Failed to fetch");

    let err = client.dashboard().get_summary().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.to_string(), "Failed to fetch");
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let (_, client) = setup();
    client
        .http()
        .mock_response(&url("/dashboard"), 200, json!({ "success": true }));

    let err = client.dashboard().get_summary().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

// =========================================================
// Resource clients
// =========================================================

#[tokio::test]
async fn product_list_sends_filters_and_reads_meta() {
    let (_, client) = setup();
    let endpoint = "/products?keyword=bolt&sort=name&page=2&perPage=10";
    client.http().mock_response(
        &url(endpoint),
        200,
        json!({
            "success": true,
            "data": [product_json(1, 2, 5), product_json(2, 9, 5)],
            "meta": { "page": 2, "perPage": 10, "total": 12, "totalPages": 2 }
        }),
    );

    let filters = ProductFilters {
        keyword: Some("bolt".into()),
        sort: Some(ProductSortField::Name),
        page: Some(2),
        per_page: Some(10),
    };
    let resp = client.products().list(&filters).await.unwrap();

    assert_eq!(resp.meta.total_pages, 2);
    let low: Vec<bool> = resp.data.iter().map(|p| p.is_low_stock()).collect();
    assert_eq!(low, [true, false]);
    assert_eq!(client.http().last_request().method, HttpMethod::Get);
}

#[tokio::test]
async fn product_update_uses_patch_with_json_body() {
    let (_, client) = setup();
    client.tokens().set("t");
    client.http().mock_response(
        &url("/products/7"),
        200,
        json!({ "success": true, "data": product_json(7, 3, 1) }),
    );

    let data = CreateProduct {
        name: "Item 7".into(),
        sku: "SKU-7".into(),
        stock: 3,
        shelf_location: Some("A-1".into()),
        minimum_stock: 1,
    };
    let resp = client.products().update(7, data).await.unwrap();
    assert_eq!(resp.data.id, 7);

    let req = client.http().last_request();
    assert_eq!(req.method, HttpMethod::Patch);
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["minimum_stock"], 1);
    assert_eq!(body["shelf_location"], "A-1");
}

#[tokio::test]
async fn product_delete_accepts_empty_body() {
    let (_, client) = setup();
    client.http().mock_raw(&url("/products/3"), 204, "");

    let ack = client.products().delete(3).await.unwrap();
    assert_eq!(ack, None);
    assert_eq!(client.http().last_request().method, HttpMethod::Delete);
}

#[tokio::test]
async fn transaction_create_posts_type_and_quantity() {
    let (_, client) = setup();
    client.http().mock_response(
        &url("/transactions"),
        201,
        json!({
            "success": true,
            "data": {
                "id": 1, "product_id": 4, "type": "OUT", "quantity": 2,
                "created_at": "2024-05-01 08:30:00"
            }
        }),
    );

    let resp = client
        .transactions()
        .create(&CreateTransaction {
            product_id: 4,
            kind: TransactionType::Out,
            quantity: 2,
        })
        .await
        .unwrap();
    assert_eq!(resp.data.kind, TransactionType::Out);

    let body = client.http().last_request().body.unwrap();
    assert_eq!(body, r#"{"product_id":4,"type":"OUT","quantity":2}"#);
}

#[tokio::test]
async fn transaction_list_filters_by_product() {
    let (_, client) = setup();
    client.http().mock_response(
        &url("/transactions?product_id=4&page=1&perPage=20"),
        200,
        json!({ "success": true, "data": [], "meta": { "page": 1, "perPage": 20, "total": 0, "totalPages": 0 } }),
    );

    let resp = client
        .transactions()
        .list(&TransactionFilters {
            product_id: Some(4),
            page: Some(1),
            per_page: Some(20),
        })
        .await
        .unwrap();
    assert!(resp.data.is_empty());
}

#[tokio::test]
async fn chart_request_uses_type_query() {
    let (_, client) = setup();
    client.http().mock_response(
        &url("/dashboard/transactions?type=monthly"),
        200,
        json!({
            "success": true,
            "data": { "labels": ["Jan", "Feb"], "inboundStock": [4, 1], "outboundStock": [2, 8] }
        }),
    );

    let chart = client.dashboard().get_chart(ChartPeriod::Monthly).await.unwrap().data;
    assert_eq!(chart.labels, ["Jan", "Feb"]);
    assert_eq!(chart.peak(), 8);
}

// =========================================================
// End-to-end session flow
// =========================================================

#[tokio::test]
async fn login_then_dashboard_then_logout() {
    let (storage, client) = setup();
    let guard = RouteGuard::default();

    client.http().mock_response(
        &url("/auth/login"),
        200,
        json!({
            "success": true,
            "data": {
                "token": "jwt-123",
                "user": { "id": 1, "name": "Ana", "email": "ana@wms.test", "role": "admin" }
            }
        }),
    );
    client.http().mock_response(
        &url("/dashboard"),
        200,
        json!({
            "success": true,
            "data": { "totalProducts": 12, "lowStockItems": [3, 7], "totalTransactions": 40 }
        }),
    );

    // 登录：保存 Token、角色与 Cookie
    let session = client.auth().sign_in("ana@wms.test", "pw").await.unwrap();
    assert_eq!(session, Session::new("jwt-123", Role::Admin));
    assert_eq!(client.http().last_request().header("Authorization"), None);
    assert_eq!(client.tokens().get().as_deref(), Some("jwt-123"));
    assert_eq!(guard.check("/login", &storage.cookie_header()), GuardDecision::Redirect("/dashboard"));

    // 面板：携带 Token
    let summary = client.dashboard().get_summary().await.unwrap().data;
    assert_eq!(
        (summary.total_products, summary.low_stock_total(), summary.total_transactions),
        (12, 2, 40)
    );
    assert_eq!(
        client.http().last_request().header("Authorization"),
        Some("Bearer jwt-123")
    );

    // 注销：守卫重新拦截
    client.auth().sign_out();
    assert_eq!(client.tokens().session(), None);
    assert_eq!(guard.check("/products", &storage.cookie_header()), GuardDecision::Redirect("/login"));
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() {
    let (storage, client) = setup();
    client
        .http()
        .mock_response(&url("/auth/login"), 401, json!({ "message": "Invalid credentials" }));

    let err = client.auth().sign_in("x@y.z", "bad").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(storage.is_empty());
}
