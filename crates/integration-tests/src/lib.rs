//! Integration test support for Dairy Ledger.
//!
//! [`MockBackend`] is an in-process axum server that answers like the PHP
//! backend: every script replies with a `{status, data, message}` envelope,
//! reads are GETs with query parameters and mutations are JSON POSTs with an
//! `action` field. It records every request it receives so tests can assert
//! on what was (or was not) sent.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dairy-ledger-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Contact and password the mock accepts.
pub const SELLER_CONTACT: &str = "9876543210";
pub const SELLER_PASSWORD: &str = "secret1";
pub const SELLER_ID: i64 = 4;
pub const SELLER_TOKEN: &str = "tok-seller-4";

/// Contact for which login fails with HTTP 401 and an error envelope.
pub const LOCKED_CONTACT: &str = "9000000000";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub script: &'static str,
    pub query: HashMap<String, String>,
    pub body: Value,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockState {
    hits: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
    seller_delay: Duration,
}

impl MockState {
    fn record(
        &self,
        method: &'static str,
        script: &'static str,
        query: HashMap<String, String>,
        body: Value,
        headers: &axum::http::HeaderMap,
    ) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let authorization = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                script,
                query,
                body,
                authorization,
            });
    }
}

/// Options for [`MockBackend::spawn_with`].
#[derive(Debug, Clone, Default)]
pub struct MockOptions {
    /// Delay before `sellers.php` answers, to provoke client timeouts.
    pub seller_delay: Duration,
}

/// Running mock backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Start a backend on an ephemeral port.
    pub async fn spawn() -> Self {
        Self::spawn_with(MockOptions::default()).await
    }

    /// Start a backend with `options`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn_with(options: MockOptions) -> Self {
        let state = Arc::new(MockState {
            seller_delay: options.seller_delay,
            ..MockState::default()
        });
        let app = router(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Self { addr, state }
    }

    /// Backend root URL, e.g. `http://127.0.0.1:41234/api/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A base URL nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{addr}/api/")
}

type Shared = State<Arc<MockState>>;
type Params = Query<HashMap<String, String>>;

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/login.php", axum::routing::post(login))
        .route("/api/change_password.php", axum::routing::post(change_password))
        .route("/api/customers.php", get(customers).post(ack_customers))
        .route("/api/sellers.php", get(sellers).post(ack_sellers))
        .route("/api/addresses.php", get(addresses).post(ack_addresses))
        .route("/api/assign_milk.php", get(assignments).post(ack_assign))
        .route("/api/distribution.php", get(distributions).post(ack_distribution))
        .route("/api/payments.php", get(payments).post(ack_payments))
        .route("/api/customer_summary.php", get(customer_summary))
        .with_state(state)
}

fn success(data: Value) -> Json<Value> {
    Json(json!({"status": "success", "data": data}))
}

fn failure(message: &str) -> Json<Value> {
    Json(json!({"status": "error", "message": message}))
}

async fn login(
    State(state): Shared,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST", "login.php", HashMap::new(), body.clone(), &headers);
    let contact = body["contact"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if contact == LOCKED_CONTACT {
        return (StatusCode::UNAUTHORIZED, failure("Account locked")).into_response();
    }
    if contact == SELLER_CONTACT && password == SELLER_PASSWORD {
        success(json!({
            "user_id": SELLER_ID.to_string(),
            "role": "seller",
            "name": "Mahesh",
            "token": SELLER_TOKEN,
        }))
        .into_response()
    } else {
        failure("Invalid credentials").into_response()
    }
}

async fn change_password(
    State(state): Shared,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record("POST", "change_password.php", HashMap::new(), body.clone(), &headers);
    if body["current_password"] == SELLER_PASSWORD {
        Json(json!({"status": "success", "message": "Password updated"}))
    } else {
        failure("Current password is incorrect")
    }
}

/// Customers 1-6; customers 1-3 live in area 1, the rest in area 2.
pub fn customer_rows() -> Vec<Value> {
    (1..=6)
        .map(|i| {
            let area = if i <= 3 { 1 } else { 2 };
            json!({
                "id": i.to_string(),
                "name": format!("Customer {i}"),
                "contact": format!("98765000{i:02}"),
                "address_id": area.to_string(),
                "address": if area == 1 { "Shivaji Nagar" } else { "Kothrud" },
                "price": "64.00",
                "join_date": "2024-03-15",
                "milk_quantity": if i == 6 { "" } else { "2.5" },
            })
        })
        .collect()
}

async fn customers(State(state): Shared, headers: axum::http::HeaderMap, Query(q): Params) -> Json<Value> {
    state.record("GET", "customers.php", q.clone(), Value::Null, &headers);
    let rows = customer_rows();
    if q.get("path").map(String::as_str) == Some("customers_by_area") {
        let areas: Vec<&str> = q
            .get("address_ids")
            .map(|ids| ids.split(',').collect())
            .unwrap_or_default();
        let matching: Vec<Value> = rows
            .into_iter()
            .filter(|c| c["address_id"].as_str().is_some_and(|a| areas.contains(&a)))
            .collect();
        return success(Value::Array(matching));
    }
    if let Some(id) = q.get("id") {
        return rows
            .into_iter()
            .find(|c| c["id"].as_str() == Some(id.as_str()))
            .map_or_else(|| failure("Customer not found"), success);
    }
    success(Value::Array(rows))
}

async fn sellers(State(state): Shared, headers: axum::http::HeaderMap) -> Json<Value> {
    state.record("GET", "sellers.php", HashMap::new(), Value::Null, &headers);
    if !state.seller_delay.is_zero() {
        tokio::time::sleep(state.seller_delay).await;
    }
    success(json!([
        {"id": 4, "name": "Mahesh", "contact": "9876543210", "vehicle_no": "MH12AB1234"},
        {"id": "7", "name": "Ramesh", "contact": "9876543217", "vehicle_number": "MH14CD5678"},
    ]))
}

async fn addresses(State(state): Shared, headers: axum::http::HeaderMap) -> Json<Value> {
    state.record("GET", "addresses.php", HashMap::new(), Value::Null, &headers);
    success(json!([
        {"id": 1, "address": "Shivaji Nagar"},
        {"id": 2, "address": "Kothrud"},
    ]))
}

async fn assignments(State(state): Shared, headers: axum::http::HeaderMap, Query(q): Params) -> Json<Value> {
    let date = q.get("date").cloned().unwrap_or_default();
    state.record("GET", "assign_milk.php", q, Value::Null, &headers);
    success(json!([
        {"id": 1, "seller_id": 4, "seller_name": "Mahesh", "date": date, "quantity": "120"},
        {"id": 2, "seller_id": 7, "seller_name": "Ramesh", "date": date, "quantity": "80.5"},
    ]))
}

/// Seller 4's round: 12.5 L with no rate of its own, 2 L at ₹70, and a
/// row whose quantity is garbage.
pub fn delivery_rows(date: &str) -> Vec<Value> {
    vec![
        json!({"id": 1, "seller_id": 4, "customer_id": 1, "customer_name": "Asha",
               "seller_name": "Mahesh", "date": date, "quantity": "12.5"}),
        json!({"id": 2, "seller_id": 4, "customer_id": 2, "customer_name": "Bhavna",
               "seller_name": "Mahesh", "date": date, "quantity": "2", "price": "70"}),
        json!({"id": 3, "seller_id": "", "customer_id": 3, "customer_name": "Chetan",
               "seller_name": "Mahesh", "date": date, "quantity": "n/a"}),
    ]
}

async fn distributions(State(state): Shared, headers: axum::http::HeaderMap, Query(q): Params) -> Json<Value> {
    state.record("GET", "distribution.php", q.clone(), Value::Null, &headers);
    if q.get("path").map(String::as_str) == Some("customer_history") {
        return success(json!([
            {"id": 9, "customer_id": q.get("customer_id"), "customer_name": "Asha",
             "seller_name": "Mahesh", "date": "2024-05-31", "quantity": "2.5", "rate": "64"},
        ]));
    }
    if q.get("seller_id").map(String::as_str) != Some("4") {
        return failure("Seller not found");
    }
    let date = q.get("date").cloned().unwrap_or_default();
    success(Value::Array(delivery_rows(&date)))
}

/// Eighteen payments; every third one has a phone containing "123".
pub fn payment_rows() -> Vec<Value> {
    (1..=18)
        .map(|i| {
            let phone = if i % 3 == 0 {
                format!("98123{i:05}")
            } else {
                format!("9870{i:06}")
            };
            json!({
                "id": i,
                "customer_id": i,
                "customer_name": format!("Customer {i}"),
                "phone": phone,
                "amount": format!("{}.00", i * 100),
                "method": if i % 2 == 0 { "UPI" } else { "Cash" },
                "status": if i % 4 == 0 { "Pending" } else { "Paid" },
                "payment_date": format!("2024-06-{i:02} 09:00:00"),
            })
        })
        .collect()
}

async fn payments(State(state): Shared, headers: axum::http::HeaderMap, Query(q): Params) -> Json<Value> {
    state.record("GET", "payments.php", q.clone(), Value::Null, &headers);
    let rows = payment_rows();
    if q.get("path").map(String::as_str) == Some("customer_payments") {
        let customer = q.get("customer_id").and_then(|c| c.parse::<i64>().ok());
        let own: Vec<Value> = rows
            .into_iter()
            .filter(|p| p["customer_id"].as_i64() == customer)
            .collect();
        return success(Value::Array(own));
    }
    success(Value::Array(rows))
}

async fn customer_summary(State(state): Shared, headers: axum::http::HeaderMap, Query(q): Params) -> Json<Value> {
    state.record("GET", "customer_summary.php", q.clone(), Value::Null, &headers);
    success(json!({
        "customer_id": q.get("customer_id"),
        "month": q.get("month"),
        "total_quantity": "77.5",
        "total_amount": "4960.00",
        "paid_amount": 2000,
        "status": "Pending",
    }))
}

/// Mutations: reject deletes of id 999, accept everything else.
fn acknowledge(body: &Value, noun: &str) -> Json<Value> {
    let action = body["action"].as_str().unwrap_or_default();
    if action == "delete" && body["id"] == 999 {
        return failure(&format!("{noun} not found"));
    }
    let verb = match action {
        "add" => "added",
        "edit" => "updated",
        "delete" => "deleted",
        _ => "saved",
    };
    Json(json!({"status": "success", "message": format!("{noun} {verb}")}))
}

macro_rules! ack_handler {
    ($name:ident, $script:literal, $noun:literal) => {
        async fn $name(
            State(state): Shared,
            headers: axum::http::HeaderMap,
            Query(q): Params,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            state.record("POST", $script, q, body.clone(), &headers);
            acknowledge(&body, $noun)
        }
    };
}

ack_handler!(ack_customers, "customers.php", "Customer");
ack_handler!(ack_sellers, "sellers.php", "Seller");
ack_handler!(ack_addresses, "addresses.php", "Address");
ack_handler!(ack_assign, "assign_milk.php", "Assignment");
ack_handler!(ack_distribution, "distribution.php", "Delivery");
ack_handler!(ack_payments, "payments.php", "Payment");
