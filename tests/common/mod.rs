#![allow(dead_code)]

use auction_client::auction::{Auction, AuctionStatus, Money};
use auction_client::bidding::{Bid, BidStatus};
use auction_client::session::{Identity, TokenPair};
use auction_client::{AuctionClient, ClientConfig};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// 트레이싱 초기화 (여러 테스트에서 호출해도 안전)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

// region:    --- Mock Server
/// 테스트용 경매 API 서버 상태
pub struct MockState {
    generation: AtomicU64,
    pub refresh_calls: AtomicUsize,
    pub refresh_fails: AtomicBool,
    pub refresh_delay_ms: AtomicU64,
    pub always_unauthorized: AtomicBool,
    pub bid_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub accepted_tokens: Mutex<Vec<String>>,
    pub content_types: Mutex<Vec<(String, String)>>,
    pub created_products: Mutex<Vec<Value>>,
    pub product_bids: Mutex<Vec<Value>>,
    pub last_query: Mutex<Option<String>>,
}

impl MockState {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(1),
            refresh_calls: AtomicUsize::new(0),
            refresh_fails: AtomicBool::new(false),
            refresh_delay_ms: AtomicU64::new(100),
            always_unauthorized: AtomicBool::new(false),
            bid_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            accepted_tokens: Mutex::new(Vec::new()),
            content_types: Mutex::new(Vec::new()),
            created_products: Mutex::new(Vec::new()),
            product_bids: Mutex::new(Vec::new()),
            last_query: Mutex::new(None),
        }
    }

    /// 서버가 현재 유효하다고 보는 액세스 토큰
    pub fn valid_token(&self) -> String {
        format!("access-{}", self.generation.load(Ordering::SeqCst))
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn bid_count(&self) -> usize {
        self.bid_calls.load(Ordering::SeqCst)
    }

    fn record_content_type(&self, path: &str, headers: &HeaderMap) {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        self.content_types
            .lock()
            .unwrap()
            .push((path.to_string(), content_type));
    }

    pub fn content_type_of(&self, path: &str) -> Option<String> {
        self.content_types
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.clone())
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockServer {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
    }

    pub fn client(&self) -> AuctionClient {
        AuctionClient::new(&self.config()).unwrap()
    }

    /// 서버가 거부할 토큰으로 로그인된 클라이언트
    pub fn client_with_stale_session(&self) -> AuctionClient {
        let client = self.client();
        client
            .session()
            .store(TokenPair::new("stale-access", "refresh-1"), identity());
        client
    }
}

pub async fn spawn_server() -> MockServer {
    let state = Arc::new(MockState::new());
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/user/me", get(me))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/:id", get(get_product).delete(delete_product))
        .route("/api/bids", post(place_bid))
        .route("/api/bids/product/:id", get(bids_for_product))
        .route("/api/upload", post(upload))
        .route("/api/slow", get(slow))
        .route("/api/broken", get(broken))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

/// 아무것도 듣고 있지 않은 주소
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
// endregion: --- Mock Server

// region:    --- Handlers
type Shared = State<Arc<MockState>>;

fn ok(data: Value) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "OK", "data": data })),
    )
        .into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<String, Response> {
    if state.always_unauthorized.load(Ordering::SeqCst) {
        return Err(fail(StatusCode::UNAUTHORIZED, "인증이 필요합니다"));
    }
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    match token {
        Some(token) if token == state.valid_token() => Ok(token),
        _ => Err(fail(StatusCode::UNAUTHORIZED, "토큰이 만료되었습니다")),
    }
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return fail(StatusCode::UNAUTHORIZED, "이메일 또는 비밀번호가 올바르지 않습니다");
    }
    ok(json!({
        "accessToken": state.valid_token(),
        "refreshToken": "refresh-1",
        "email": body["email"],
        "fullName": "김입찰",
        "role": "BIDDER",
    }))
}

async fn refresh(State(state): Shared, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    tokio::time::sleep(std::time::Duration::from_millis(delay)).await;

    if state.refresh_fails.load(Ordering::SeqCst) || body["refreshToken"].as_str().is_none() {
        return fail(StatusCode::UNAUTHORIZED, "리프레시 토큰이 만료되었습니다");
    }
    let generation = state.generation.fetch_add(1, Ordering::SeqCst) + 1;
    ok(json!({
        "accessToken": format!("access-{}", generation),
        "refreshToken": format!("refresh-{}", generation),
    }))
}

async fn logout(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT.into_response()
}

async fn me(State(state): Shared, headers: HeaderMap) -> Response {
    let token = match authorize(&state, &headers) {
        Ok(token) => token,
        Err(denied) => return denied,
    };
    state.accepted_tokens.lock().unwrap().push(token);
    ok(json!({
        "email": "bidder@example.com",
        "fullName": "김입찰",
        "role": "BIDDER",
    }))
}

async fn list_products(State(state): Shared, RawQuery(query): RawQuery) -> Response {
    *state.last_query.lock().unwrap() = query;
    ok(json!([product_json("p-1", 2), product_json("p-2", 5)]))
}

async fn get_product(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return fail(StatusCode::NOT_FOUND, "상품을 찾을 수 없습니다");
    }
    ok(product_json(&id, 2))
}

async fn delete_product(
    State(state): Shared,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_product(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    state.record_content_type("/products", &headers);
    state.created_products.lock().unwrap().push(body.clone());
    ok(json!({
        "id": "p-new",
        "title": body["title"],
        "description": body["description"],
        "images": body["images"],
        "startingPrice": body["startingPrice"],
        "currentPrice": body["startingPrice"],
        "status": "ACTIVE",
        "endTime": body["endTime"],
        "sellerId": "seller-1",
        "bidCount": 0,
    }))
}

async fn place_bid(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let n = state.bid_calls.fetch_add(1, Ordering::SeqCst) + 1;
    ok(json!({
        "id": format!("bid-{}", n),
        "productId": body["productId"],
        "bidderId": "user-1",
        "bidderName": "김입찰",
        "amount": body["amount"],
        "status": "ACTIVE",
        "createdAt": Utc::now().to_rfc3339(),
    }))
}

async fn bids_for_product(State(state): Shared, Path(_id): Path<String>) -> Response {
    ok(Value::Array(state.product_bids.lock().unwrap().clone()))
}

async fn upload(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    state.record_content_type("/upload", &headers);
    let n = state.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
    ok(json!({ "url": format!("https://cdn.example.com/images/{}.jpg", n) }))
}

async fn slow(State(state): Shared, headers: HeaderMap) -> Response {
    tokio::time::sleep(std::time::Duration::from_millis(400)).await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    ok(json!({ "slow": true }))
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}
// endregion: --- Handlers

// region:    --- Fixtures
pub fn identity() -> Identity {
    Identity {
        email: "bidder@example.com".to_string(),
        full_name: "김입찰".to_string(),
        role: "BIDDER".to_string(),
    }
}

/// 서버가 처음 발급하는 토큰 쌍
pub fn valid_tokens() -> TokenPair {
    TokenPair::new("access-1", "refresh-1")
}

pub fn product_json(id: &str, bid_count: u32) -> Value {
    json!({
        "id": id,
        "title": "빈티지 카메라",
        "description": "1970년대 필름 카메라",
        "category": "camera",
        "images": ["https://cdn.example.com/images/camera.jpg"],
        "startingPrice": 250.0,
        "currentPrice": 300.0,
        "status": "ACTIVE",
        "endTime": (Utc::now() + Duration::hours(2)).to_rfc3339(),
        "sellerId": "seller-1",
        "bidCount": bid_count,
    })
}

pub fn bid_json(id: &str, product_id: &str, amount: f64, status: &str, seconds_ago: i64) -> Value {
    json!({
        "id": id,
        "productId": product_id,
        "bidderId": format!("bidder-{}", id),
        "bidderName": "입찰자",
        "amount": amount,
        "status": status,
        "createdAt": (Utc::now() - Duration::seconds(seconds_ago)).to_rfc3339(),
    })
}

/// 시작가 250, 종료 2시간 후인 경매
pub fn open_auction() -> Auction {
    auction_ending_at(Utc::now() + Duration::hours(2))
}

pub fn auction_ending_at(end_time: DateTime<Utc>) -> Auction {
    Auction {
        id: "p-1".to_string(),
        title: "빈티지 카메라".to_string(),
        description: "1970년대 필름 카메라".to_string(),
        category: Some("camera".to_string()),
        images: vec![],
        starting_price: money("250"),
        current_price: money("250"),
        status: AuctionStatus::Active,
        end_time,
        seller_id: "seller-1".to_string(),
        bid_count: 0,
    }
}

pub fn bid_at(id: &str, amount: &str, created_at: DateTime<Utc>) -> Bid {
    Bid {
        id: id.to_string(),
        product_id: "p-1".to_string(),
        bidder_id: format!("bidder-{}", id),
        bidder_name: "입찰자".to_string(),
        amount: money(amount),
        status: BidStatus::Active,
        created_at,
    }
}

pub fn money(raw: &str) -> Money {
    raw.parse().unwrap()
}
// endregion: --- Fixtures
