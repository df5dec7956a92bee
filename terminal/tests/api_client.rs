//! End-to-end tests of the API client against a stub backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::{json, Value};

use stocksim::app::AppEvent;
use stocksim::config::ClientConfig;
use stocksim::core::error::{CONNECTION_ERROR, GENERIC_ERROR, INVALID_DATE, INVALID_RESPONSE};
use stocksim::core::AppError;
use stocksim::services::api::{ApiClient, LeaderboardPeriod, Settings, StockFilter, Theme, TimeRange};
use stocksim::services::storage::{KeyValueStore, MemoryStore, AUTH_TOKEN_KEY, LOGIN_URL_KEY};
use shared::TradeSide;

#[derive(Default)]
struct Recorded {
    stock_hits: AtomicUsize,
    auth_headers: Mutex<Vec<Option<String>>>,
    trade_bodies: Mutex<Vec<Value>>,
    settings_bodies: Mutex<Vec<Value>>,
}

type Shared = Arc<Recorded>;

async fn list_stocks(State(rec): State<Shared>, headers: HeaderMap) -> Json<Value> {
    rec.stock_hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    rec.auth_headers.lock().push(auth);

    Json(json!({
        "success": true,
        "data": [
            {
                "symbol": "aapl",
                "name": "Apple",
                "sector": "Technology",
                "currentPrice": 190.5,
                "priceChange": 2.5,
                "changePercent": 1.33,
                "volume": 1000,
                "updatedAt": "2024-01-02T15:04:05Z"
            },
            {
                "symbol": "XOM",
                "name": "Exxon",
                "price": 101.0,
                "change_percent": -0.5,
                "last_updated": "not a date"
            }
        ]
    }))
}

async fn market_status() -> Json<Value> {
    Json(json!({ "isOpen": false, "nextOpen": "2024-01-03T14:30:00" }))
}

async fn stock_detail(Path(symbol): Path<String>) -> Response {
    if symbol == "ZZZZ" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Stock not found" }))).into_response();
    }
    Json(json!({
        "symbol": symbol,
        "name": "Apple",
        "price": 190.5,
        "dayHigh": 192.0,
        "previousClose": 188.0
    }))
    .into_response()
}

async fn history(Path(symbol): Path<String>) -> Json<Value> {
    if symbol == "BAD" {
        return Json(json!([{ "date": "yesterday", "close": 1.0 }]));
    }
    Json(json!({
        "success": true,
        "data": [
            { "date": "2024-01-03", "close": 3.0 },
            { "timestamp": "1704067200", "price": 1.0 },
            { "time": "2024-01-02T00:00:00Z", "close": 2.0 }
        ]
    }))
}

async fn portfolio(Path(user): Path<String>) -> Response {
    if user == "locked" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": {
                    "code": "UNAUTHORIZED",
                    "message": "Sign in first",
                    "details": { "loginUrl": "https://sim.example/login" }
                }
            })),
        )
            .into_response();
    }
    Json(json!({
        "success": true,
        "data": {
            "userId": 42,
            "cash": 1000.0,
            "holdings": [
                { "symbol": "aapl", "quantity": 2, "avgCost": 100.0, "currentPrice": 150.0 },
                { "symbol": "MSFT", "quantity": 0, "avgCost": 300.0, "currentPrice": 410.0 }
            ]
        }
    }))
    .into_response()
}

async fn trade(Path(user): Path<String>, State(rec): State<Shared>, Json(body): Json<Value>) -> Response {
    rec.trade_bodies.lock().push(body.clone());
    match user.as_str() {
        // Committed, answered with the bare transaction
        "bare" => {
            return Json(json!({
                "success": true,
                "data": {
                    "id": "tx-9",
                    "symbol": body["symbol"],
                    "side": "buy",
                    "shares": body["shares"],
                    "price": 190.5,
                    "executedAt": "2024-01-02T15:04:05Z"
                }
            }))
            .into_response();
        }
        // Committed, answered with something unreadable
        "garbled" => return Json(json!({ "success": true, "data": { "status": "filled" } })).into_response(),
        "strict" => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "code": 400, "message": "Shares must be positive" } })),
            )
                .into_response();
        }
        _ => {}
    }
    if body["shares"].as_u64().unwrap_or(0) > 100 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": { "code": "INSUFFICIENT_FUNDS", "message": "Not enough cash", "details": { "needed": 19050.0 } }
            })),
        )
            .into_response();
    }
    Json(json!({
        "success": true,
        "data": {
            "transaction": {
                "id": 7,
                "symbol": body["symbol"],
                "type": "BUY",
                "quantity": body["shares"],
                "price": 190.5,
                "executedAt": "1704207845"
            },
            "cashBalance": 809.5
        }
    }))
    .into_response()
}

async fn add_watch() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": "Already watching", "code": "DUPLICATE" })),
    )
        .into_response()
}

async fn events() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn achievements() -> Json<Value> {
    Json(json!({ "success": false, "error": { "code": "NOPE", "message": "Achievements offline" } }))
}

async fn get_settings(Path(user): Path<String>) -> Json<Value> {
    if user == "garbled" {
        return Json(json!({ "success": true, "data": { "theme": "light", "refreshInterval": "30" } }));
    }
    Json(json!({
        "currency": "eur",
        "theme": "system",
        "notificationsEnabled": false,
        "refreshInterval": 15,
        "defaultChartRange": "1Y"
    }))
}

async fn put_settings(State(rec): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    rec.settings_bodies.lock().push(body.clone());
    Json(json!({ "success": true, "data": body }))
}

async fn leaderboard() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            { "rank": 2, "userId": "b", "username": "Bob", "portfolioValue": 90000.0, "gainPercent": -10.0 },
            { "rank": 1, "userId": "a", "displayName": "Ann", "totalValue": 120000.0, "returnPercent": 20.0 }
        ]
    }))
}

async fn navigation() -> Json<Value> {
    Json(json!([
        { "id": "news", "title": "News", "href": "/news", "sortOrder": 5 },
        { "id": "home", "label": "Home", "path": "/", "order": 1 }
    ]))
}

async fn spawn_backend() -> (String, Shared) {
    let recorded = Shared::default();
    let app = Router::new()
        .route("/api/stocks", get(list_stocks))
        .route("/api/stocks/:symbol", get(stock_detail))
        .route("/api/stocks/:symbol/history", get(history))
        .route("/api/market/status", get(market_status))
        .route("/api/portfolio/:user", get(portfolio))
        .route("/api/portfolio/:user/trades", post(trade))
        .route("/api/watchlist/:user", post(add_watch))
        .route("/api/events", get(events))
        .route("/api/achievements/:user", get(achievements))
        .route("/api/settings/:user", get(get_settings).put(put_settings))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/navigation", get(navigation))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), recorded)
}

fn client(base_url: &str, store: Arc<MemoryStore>) -> ApiClient {
    let mut config = ClientConfig::with_api_url(base_url);
    config.cache_ttl = Duration::from_secs(60);
    ApiClient::new(&config, store).unwrap()
}

fn api_code(err: &AppError) -> &str {
    err.api_code().unwrap_or("<not an api error>")
}

#[tokio::test]
async fn test_envelope_and_bare_bodies_unwrap() {
    let (url, _) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let stocks = api.list_stocks(&StockFilter::default()).await.unwrap();
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].symbol, "AAPL");
    assert_eq!(stocks[0].price, 190.5);
    assert_eq!(stocks[0].change, 2.5);
    assert_eq!(stocks[0].updated_at, Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).single());
    // optional dates that fail to parse are dropped, not fatal
    assert_eq!(stocks[1].updated_at, None);

    let status = api.get_market_status().await.unwrap();
    assert!(!status.is_open);
    assert_eq!(status.next_open, Utc.with_ymd_and_hms(2024, 1, 3, 14, 30, 0).single());
}

#[tokio::test]
async fn test_bearer_token_injected_when_stored() {
    let (url, recorded) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let api = client(&url, store.clone());

    api.refresh_stocks(&StockFilter::default()).await.unwrap();
    store.set(AUTH_TOKEN_KEY, "secret-token").unwrap();
    api.refresh_stocks(&StockFilter::default()).await.unwrap();

    let headers = recorded.auth_headers.lock().clone();
    assert_eq!(headers, vec![None, Some("Bearer secret-token".to_string())]);
}

#[tokio::test]
async fn test_quotes_cached_until_trade() {
    let (url, recorded) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    api.list_stocks(&StockFilter::default()).await.unwrap();
    api.list_stocks(&StockFilter::default()).await.unwrap();
    assert_eq!(recorded.stock_hits.load(Ordering::SeqCst), 1);

    let result = api.execute_trade("u1", TradeSide::Buy, "aapl", 1).await.unwrap();
    assert_eq!(result.transaction.id, "7");
    assert_eq!(result.transaction.side, TradeSide::Buy);
    assert_eq!(result.transaction.symbol, "AAPL");
    assert_eq!(result.transaction.total, 190.5);
    assert_eq!(result.transaction.executed_at, Utc.timestamp_opt(1_704_207_845, 0).unwrap());
    assert_eq!(result.cash_balance, Some(809.5));

    let body = recorded.trade_bodies.lock()[0].clone();
    assert_eq!(body, json!({ "symbol": "AAPL", "shares": 1, "side": "buy" }));

    api.list_stocks(&StockFilter::default()).await.unwrap();
    assert_eq!(recorded.stock_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_bare_trade_result_accepted_and_caches_dropped() {
    let (url, recorded) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    api.list_stocks(&StockFilter::default()).await.unwrap();
    let result = api.execute_trade("bare", TradeSide::Buy, "AAPL", 2).await.unwrap();
    assert_eq!(result.transaction.id, "tx-9");
    assert_eq!(result.transaction.shares, 2);
    assert_eq!(result.transaction.total, 381.0);
    assert_eq!(result.cash_balance, None);

    api.list_stocks(&StockFilter::default()).await.unwrap();
    assert_eq!(recorded.stock_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unreadable_trade_result_still_drops_caches() {
    let (url, recorded) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    api.list_stocks(&StockFilter::default()).await.unwrap();
    let err = api.execute_trade("garbled", TradeSide::Buy, "AAPL", 1).await.unwrap_err();
    assert_eq!(api_code(&err), INVALID_RESPONSE);
    assert_eq!(recorded.trade_bodies.lock().len(), 1);

    api.list_stocks(&StockFilter::default()).await.unwrap();
    assert_eq!(recorded.stock_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_trade_share_bounds_checked_before_sending() {
    let (url, recorded) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let err = api.execute_trade("u1", TradeSide::Sell, "AAPL", 0).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(recorded.trade_bodies.lock().is_empty());
}

#[tokio::test]
async fn test_error_shapes_coalesce() {
    let (url, _) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    // {success: false, error: {code, message, details}} with 400
    let err = api.execute_trade("u1", TradeSide::Buy, "AAPL", 500).await.unwrap_err();
    match err {
        AppError::Api(api_err) => {
            assert_eq!(api_err.code, "INSUFFICIENT_FUNDS");
            assert_eq!(api_err.message, "Not enough cash");
            assert_eq!(api_err.details, Some(json!({ "needed": 19050.0 })));
        }
        other => panic!("expected api error, got {:?}", other),
    }

    // {error: "text"}
    let err = api.get_stock("ZZZZ").await.unwrap_err();
    assert_eq!(api_code(&err), GENERIC_ERROR);
    assert_eq!(err.to_string(), "API error: [ERROR] Stock not found");

    // {message, code}
    let err = api.add_to_watchlist("u1", "AAPL").await.unwrap_err();
    assert_eq!(api_code(&err), "DUPLICATE");

    // empty body
    let err = api.get_market_events(5).await.unwrap_err();
    assert_eq!(err.to_string(), "API error: [ERROR] Request failed with status code 503");

    // 200 with success: false
    let err = api.get_achievements("u1").await.unwrap_err();
    assert_eq!(api_code(&err), "NOPE");

    // {error: {code: <number>, message}}
    let err = api.execute_trade("strict", TradeSide::Buy, "AAPL", 1).await.unwrap_err();
    assert_eq!(api_code(&err), "400");
    assert_eq!(err.to_string(), "API error: [400] Shares must be positive");
}

#[tokio::test]
async fn test_malformed_settings_data_is_rejected() {
    let (url, recorded) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let err = api.get_settings("garbled").await.unwrap_err();
    assert_eq!(api_code(&err), INVALID_RESPONSE);
    assert!(recorded.settings_bodies.lock().is_empty());
}

#[tokio::test]
async fn test_unauthorized_triggers_login_side_channel() {
    let (url, _) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = async_channel::unbounded();
    let api = client(&url, store.clone()).with_events(tx);

    let err = api.get_portfolio("locked").await.unwrap_err();
    match err {
        AppError::LoginRequired { login_url } => assert_eq!(login_url, "https://sim.example/login"),
        other => panic!("expected login required, got {:?}", other),
    }
    assert_eq!(store.get(LOGIN_URL_KEY).as_deref(), Some("https://sim.example/login"));
    match rx.try_recv() {
        Ok(AppEvent::LoginRequired { login_url }) => assert_eq!(login_url, "https://sim.example/login"),
        other => panic!("expected login event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_portfolio_normalized() {
    let (url, _) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let portfolio = api.get_portfolio("u1").await.unwrap();
    assert_eq!(portfolio.user_id, "42");
    assert_eq!(portfolio.positions.len(), 1);
    let aapl = portfolio.position("AAPL").unwrap();
    assert_eq!(aapl.market_value, 300.0);
    assert_eq!(aapl.gain_loss, 100.0);
    assert_eq!(portfolio.total_value, 1300.0);
}

#[tokio::test]
async fn test_history_dates_parsed_and_sorted() {
    let (url, _) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let points = api.get_price_history("aapl", TimeRange::OneWeek).await.unwrap();
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    assert_eq!(points[2].timestamp, Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());

    let err = api.get_price_history("BAD", TimeRange::OneWeek).await.unwrap_err();
    assert_eq!(api_code(&err), INVALID_DATE);
}

#[tokio::test]
async fn test_settings_update_sends_camel_case() {
    let (url, recorded) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let settings = api.get_settings("u1").await.unwrap();
    assert_eq!(settings.currency, "EUR");
    assert_eq!(settings.theme, Theme::System);
    assert_eq!(settings.refresh_interval_secs, 15);
    assert_eq!(settings.default_chart_range, TimeRange::OneYear);

    let changed = Settings { theme: Theme::Light, ..settings };
    let saved = api.update_settings("u1", &changed).await.unwrap();
    assert_eq!(saved, changed);

    let body = recorded.settings_bodies.lock()[0].clone();
    assert_eq!(body["theme"], "light");
    assert_eq!(body["refreshIntervalSecs"], 15);
    assert_eq!(body["defaultChartRange"], "1Y");
    assert!(body.get("notifications_enabled").is_none());
}

#[tokio::test]
async fn test_leaderboard_and_navigation_sorted() {
    let (url, _) = spawn_backend().await;
    let api = client(&url, Arc::new(MemoryStore::new()));

    let entries = api.get_leaderboard(LeaderboardPeriod::AllTime, 10).await.unwrap();
    assert_eq!(entries[0].display_name, "Ann");
    assert_eq!(entries[1].total_value, 90000.0);

    let items = api.get_navigation().await.unwrap();
    assert_eq!(items[0].label, "Home");
    assert_eq!(items[1].path, "/news");
}

#[tokio::test]
async fn test_unreachable_backend_is_connection_error() {
    let api = client("http://127.0.0.1:1", Arc::new(MemoryStore::new()));
    let err = api.get_market_status().await.unwrap_err();
    assert_eq!(api_code(&err), CONNECTION_ERROR);
}
