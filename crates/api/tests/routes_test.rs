//! End-to-end route tests against an in-memory store.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bahi_api::middleware::{PORTAL_CODE_HEADER, PORTAL_USER_HEADER};
use bahi_api::{AppState, create_router};
use bahi_core::chart::AccountGroup;
use bahi_core::engine::{Books, BusinessProfile};
use bahi_core::ledger::{Ledger, PortalCredentials};
use bahi_core::voucher::{Voucher, VoucherLine, VoucherType};
use bahi_shared::types::{BalanceSide, LedgerId};
use bahi_store::MemoryStore;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

struct Fixture {
    app: Router,
    acme: LedgerId,
    cash: LedgerId,
    partner: LedgerId,
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

/// Acme Traders: opening 1,000 Dr, sale of 5,000 on 1 April, receipt of
/// 3,000 in cash on 11 April.
fn fixture() -> Fixture {
    let acme = Ledger::new("DR001", "Acme Traders", AccountGroup::SundryDebtors)
        .with_opening(dec!(1000), BalanceSide::Dr);
    let mut partner = Ledger::new("DR002", "Initech", AccountGroup::SundryDebtors);
    partner.portal_credentials = Some(PortalCredentials {
        username: "initech".into(),
        access_code: "4821".into(),
    });
    let sales = Ledger::new("IN001", "Sales", AccountGroup::SalesAccounts);
    let cash = Ledger::new("CA001", "Cash", AccountGroup::CashInHand);

    let vouchers = vec![
        Voucher::new(
            VoucherType::Sales,
            date(4, 1),
            acme.id,
            vec![VoucherLine::ledger(sales.id, dec!(5000))],
        )
        .with_reference("INV-001"),
        Voucher::new(
            VoucherType::Receipt,
            date(4, 11),
            acme.id,
            vec![VoucherLine::ledger(cash.id, dec!(3000))],
        )
        .with_reference("RCT-001"),
    ];

    let fixture_ids = (acme.id, cash.id, partner.id);
    let books = Books {
        profile: BusinessProfile {
            company_name: "Bahi Demo Traders".into(),
            ..BusinessProfile::default()
        },
        ledgers: vec![acme, partner, sales, cash],
        vouchers,
        items: Vec::new(),
    };

    Fixture {
        app: create_router(AppState::new(MemoryStore::with_books(books))),
        acme: fixture_ids.0,
        cash: fixture_ids.1,
        partner: fixture_ids.2,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_headers(app, method, uri, &[], body).await
}

async fn send_with_headers(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = headers
        .iter()
        .fold(Request::builder().method(method).uri(uri), |b, (name, value)| {
            b.header(*name, *value)
        });
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

#[tokio::test]
async fn test_health() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ledgers"], 4);
    assert_eq!(body["items"], 0);
}

#[tokio::test]
async fn test_acme_statement() {
    let f = fixture();
    let uri = format!("/api/v1/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", f.acme);
    let (status, body) = get(&f.app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business"]["companyName"], "Bahi Demo Traders");
    let report = &body["report"];
    assert_eq!(report["opening_balance"], "1000");
    assert_eq!(report["lines"].as_array().unwrap().len(), 2);
    assert_eq!(report["lines"][0]["balance"], "6000");
    assert_eq!(report["lines"][1]["credit"], "3000");
    assert_eq!(report["closing_balance"], "3000");
    assert_eq!(report["closing"]["side"], "Dr");
}

#[tokio::test]
async fn test_unknown_ledger_is_404() {
    let f = fixture();
    let uri = format!("/api/v1/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", LedgerId::new());
    let (status, body) = get(&f.app, &uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().starts_with("Not found: Ledger"));
}

#[tokio::test]
async fn test_inverted_range_is_400() {
    let f = fixture();
    let uri = format!("/api/v1/ledgers/{}/statement?from=2025-05-01&to=2025-04-01", f.acme);
    let (status, body) = get(&f.app, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_unknown_report_kind_is_400() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/reports/cashflow?from=2025-04-01&to=2025-04-30").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNKNOWN_REPORT_KIND");
}

#[tokio::test]
async fn test_profit_and_loss() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/reports/pl?from=2025-04-01&to=2025-04-30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["kind"], "pl");
    assert_eq!(body["report"]["report"]["income"]["total"], "5000");
    assert_eq!(body["report"]["report"]["net_profit"], "5000");
}

#[tokio::test]
async fn test_trial_balance_is_balanced() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/reports/tb?from=2025-04-01&to=2025-04-30").await;

    assert_eq!(status, StatusCode::OK);
    let totals = &body["report"]["report"]["totals"];
    // Acme's 1,000 opening has no contra entry, so the columns differ by it.
    assert_eq!(totals["total_debit"], "6000");
    assert_eq!(totals["total_credit"], "5000");
    assert_eq!(totals["is_balanced"], false);
}

#[tokio::test]
async fn test_acme_aging() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/reports/aging?perspective=receivable&as_of=2025-05-11").await;

    assert_eq!(status, StatusCode::OK);
    let report = &body["report"];
    assert_eq!(report["group"], "Sundry Debtors");
    assert_eq!(report["rows"].as_array().unwrap().len(), 1);
    assert_eq!(report["rows"][0]["buckets"]["31-60"], "3000");
    assert_eq!(report["rows"][0]["buckets"]["0-30"], "0");
}

#[tokio::test]
async fn test_unknown_perspective_is_400() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/reports/aging?perspective=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNKNOWN_PERSPECTIVE");
}

#[tokio::test]
async fn test_create_ledger_and_reject_duplicate_code() {
    let f = fixture();
    let body = json!({
        "code": "BK001",
        "name": "State Bank",
        "group": "Bank Accounts",
        "openingBalance": "2500",
        "openingBalanceType": "Dr"
    });

    let (status, created) = send(&f.app, "POST", "/api/v1/ledgers", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["group"], "Bank Accounts");

    let (status, err) = send(&f.app, "POST", "/api/v1/ledgers", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "CONFLICT");

    let (_, list) = get(&f.app, "/api/v1/ledgers?as_of=2025-04-30").await;
    let bank = list
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["code"] == "BK001")
        .unwrap();
    assert_eq!(bank["balanceLabel"], "2500.00 Dr");
}

#[tokio::test]
async fn test_ledger_list_hides_portal_credentials() {
    let f = fixture();
    let (status, list) = get(&f.app, "/api/v1/ledgers?as_of=2025-04-30").await;

    assert_eq!(status, StatusCode::OK);
    let initech = list
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["code"] == "DR002")
        .unwrap();
    assert_eq!(initech["portalEnabled"], true);
    assert!(initech.get("portalCredentials").is_none());
}

#[tokio::test]
async fn test_posted_voucher_flows_into_statement() {
    let f = fixture();
    let voucher = json!({
        "type": "Receipt",
        "date": "2025-04-20",
        "referenceNo": "RCT-002",
        "partyLedgerId": f.acme,
        "items": [{ "itemId": f.cash, "amount": "500" }]
    });

    let (status, saved) = send(&f.app, "POST", "/api/v1/vouchers", Some(voucher)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["totalAmount"], "500");
    assert_eq!(saved["items"][0]["target"]["kind"], "ledger");

    let uri = format!("/api/v1/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", f.acme);
    let (_, body) = get(&f.app, &uri).await;
    assert_eq!(body["report"]["closing_balance"], "2500");

    let voucher_id = saved["id"].as_str().unwrap();
    let (status, _) = send(&f.app, "DELETE", &format!("/api/v1/vouchers/{voucher_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&f.app, "DELETE", &format!("/api/v1/vouchers/{voucher_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&f.app, &uri).await;
    assert_eq!(body["report"]["closing_balance"], "3000");
}

#[tokio::test]
async fn test_voucher_with_unknown_party_is_rejected() {
    let f = fixture();
    let voucher = json!({
        "type": "Sales",
        "date": "2025-04-20",
        "partyLedgerId": LedgerId::new(),
        "items": [{ "itemId": f.cash, "amount": "10" }]
    });

    let (status, body) = send(&f.app, "POST", "/api/v1/vouchers", Some(voucher)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_voucher_list_filters_by_ledger_and_date() {
    let f = fixture();
    let uri = format!("/api/v1/vouchers?from=2025-04-05&ledger_id={}", f.acme);
    let (status, body) = get(&f.app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let vouchers = body.as_array().unwrap();
    assert_eq!(vouchers.len(), 1);
    assert_eq!(vouchers[0]["referenceNo"], "RCT-001");
}

#[tokio::test]
async fn test_portal_statement_checks_credentials() {
    let f = fixture();
    let login = [(PORTAL_USER_HEADER, "initech"), (PORTAL_CODE_HEADER, "4821")];

    let uri = format!("/api/v1/portal/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", f.acme);
    let (status, _) = send_with_headers(&f.app, "GET", &uri, &login, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/portal/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", f.partner);
    let (status, body) = get(&f.app, &uri).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let wrong = [(PORTAL_USER_HEADER, "initech"), (PORTAL_CODE_HEADER, "0000")];
    let (status, _) = send_with_headers(&f.app, "GET", &uri, &wrong, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send_with_headers(&f.app, "GET", &uri, &login, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["party"]["name"], "Initech");
    assert_eq!(body["report"]["statement"]["lines"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stock_statement_errors() {
    let f = fixture();
    let missing = uuid::Uuid::new_v4();

    let (status, _) = get(&f.app, &format!("/api/v1/items/{missing}/stock-statement")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&f.app, &format!("/api/v1/items/{missing}/stock-statement?opening=fifo")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNKNOWN_OPENING_STOCK");
}

#[tokio::test]
async fn test_saved_ledger_does_not_echo_portal_credentials() {
    let f = fixture();
    let body = json!({
        "code": "DR003",
        "name": "Globex",
        "group": "Sundry Debtors",
        "portalCredentials": { "username": "globex", "accessCode": "9911" }
    });

    let (status, created) = send(&f.app, "POST", "/api/v1/ledgers", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["portalEnabled"], true);
    assert!(created.get("portalCredentials").is_none());
    assert!(!created.to_string().contains("9911"));
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected() {
    let f = fixture();
    let huge = "79228162514264337593543950335";

    let voucher = json!({
        "type": "Sales",
        "date": "2025-04-20",
        "partyLedgerId": f.acme,
        "items": [{ "itemId": f.cash, "amount": "10" }],
        "totalAmount": huge
    });
    let (status, body) = send(&f.app, "POST", "/api/v1/vouchers", Some(voucher)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let voucher = json!({
        "type": "Sales",
        "date": "2025-04-20",
        "partyLedgerId": f.acme,
        "items": [
            { "itemId": f.cash, "amount": "1000000000000" },
            { "itemId": f.cash, "amount": "1" }
        ]
    });
    let (status, _) = send(&f.app, "POST", "/api/v1/vouchers", Some(voucher)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ledger = json!({
        "code": "BK009",
        "name": "Offshore",
        "group": "Bank Accounts",
        "openingBalance": huge
    });
    let (status, _) = send(&f.app, "POST", "/api/v1/ledgers", Some(ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", f.acme);
    let (status, body) = get(&f.app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["closing_balance"], "3000");
}

#[tokio::test]
async fn test_posted_purchase_moves_item_stock() {
    let f = fixture();
    let item = json!({
        "name": "Widget",
        "sku": "WGT-01",
        "unit": "pcs",
        "purchasePrice": "10",
        "stock": { "00000000-0000-0000-0000-000000000000": "50" }
    });
    let (status, saved) = send(&f.app, "POST", "/api/v1/items", Some(item)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["totalQuantity"], "50");
    let item_id = saved["id"].as_str().unwrap().to_string();

    let purchase = json!({
        "type": "Purchase",
        "date": "2025-04-15",
        "partyLedgerId": f.acme,
        "items": [{ "itemId": item_id, "quantity": "20", "rate": "10", "amount": "200" }]
    });
    let (status, voucher) = send(&f.app, "POST", "/api/v1/vouchers", Some(purchase)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(voucher["items"][0]["target"]["kind"], "inventory");

    let (_, items) = get(&f.app, "/api/v1/items").await;
    assert_eq!(items[0]["totalQuantity"], "70");

    let uri = format!(
        "/api/v1/items/{item_id}/stock-statement?from=2025-04-01&to=2025-04-30&opening=reconstructed"
    );
    let (status, body) = get(&f.app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["opening_quantity"], "50");
    assert_eq!(body["report"]["total_inward"], "20");
    assert_eq!(body["report"]["closing_quantity"], "70");

    let voucher_id = voucher["id"].as_str().unwrap();
    send(&f.app, "DELETE", &format!("/api/v1/vouchers/{voucher_id}"), None).await;
    let (_, items) = get(&f.app, "/api/v1/items").await;
    assert_eq!(items[0]["totalQuantity"], "50");
}

#[tokio::test]
async fn test_item_validation_and_delete() {
    let f = fixture();
    let (status, _) = send(&f.app, "POST", "/api/v1/items", Some(json!({ "name": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let oversized = json!({ "name": "Bolt", "purchasePrice": "1000000000001" });
    let (status, _) = send(&f.app, "POST", "/api/v1/items", Some(oversized)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, saved) = send(&f.app, "POST", "/api/v1/items", Some(json!({ "name": "Bolt" }))).await;
    let uri = format!("/api/v1/items/{}", saved["id"].as_str().unwrap());
    let (status, _) = send(&f.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&f.app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_statement_lists_each_ledger_of_the_group() {
    let f = fixture();
    let (status, body) = get(
        &f.app,
        "/api/v1/statements?group=sundry%20debtors&from=2025-04-01&to=2025-04-30",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business"]["companyName"], "Bahi Demo Traders");

    let statements = body["report"].as_array().unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0]["name"], "Acme Traders");
    assert_eq!(statements[0]["closing_balance"], "3000");
    assert_eq!(statements[1]["name"], "Initech");

    let (_, body) = get(&f.app, "/api/v1/statements?group=Nowhere").await;
    assert!(body["report"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_round_trip() {
    let f = fixture();
    let (status, body) = get(&f.app, "/api/v1/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companyName"], "Bahi Demo Traders");

    let profile = json!({ "companyName": "Bahi Wholesale", "gstin": "27AAAAA0000A1Z5" });
    let (status, saved) = send(&f.app, "PUT", "/api/v1/profile", Some(profile)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["gstin"], "27AAAAA0000A1Z5");

    let uri = format!("/api/v1/ledgers/{}/statement?from=2025-04-01&to=2025-04-30", f.acme);
    let (_, body) = get(&f.app, &uri).await;
    assert_eq!(body["business"]["companyName"], "Bahi Wholesale");

    let (status, _) = send(&f.app, "PUT", "/api/v1/profile", Some(json!({ "companyName": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
