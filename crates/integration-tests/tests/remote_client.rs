//! Integration tests for the HTTP client against the mock backend.
//!
//! Covers the envelope contract, failure mapping, and the request shapes
//! the backend scripts expect.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::time::Duration;

use dairy_ledger_client::{
    ApiClient, ClientConfig, ClientError, FileStore, MemoryStore, Session, TransportKind,
};
use dairy_ledger_core::forms::Credentials;
use dairy_ledger_core::{
    AddressId, CustomerId, PaymentMethod, PaymentStatus, Phone, Role, SellerId, UserId,
};
use dairy_ledger_integration_tests::{
    LOCKED_CONTACT, MockBackend, MockOptions, SELLER_CONTACT, SELLER_ID, SELLER_PASSWORD,
    SELLER_TOKEN, unreachable_base_url,
};
use secrecy::{ExposeSecret, SecretString};

fn client_for(base_url: &str) -> ApiClient {
    let config = ClientConfig::new(base_url).expect("valid base url");
    ApiClient::new(&config).expect("client builds")
}

fn credentials(contact: &str, password: &str) -> Credentials {
    Credentials {
        contact: contact.parse::<Phone>().expect("valid phone"),
        password: password.to_string(),
    }
}

// =============================================================================
// Login and session
// =============================================================================

#[tokio::test]
async fn test_login_returns_role_and_token() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let data = api
        .login(&credentials(SELLER_CONTACT, SELLER_PASSWORD))
        .await
        .expect("login succeeds");

    assert_eq!(data.role, Role::Seller);
    assert_eq!(data.user_id.to_string(), SELLER_ID.to_string());
    assert_eq!(data.token.as_deref(), Some(SELLER_TOKEN));

    let request = backend.requests().pop().expect("login recorded");
    assert_eq!(request.method, "POST");
    assert_eq!(request.script, "login.php");
    assert_eq!(request.body["contact"], SELLER_CONTACT);
}

#[tokio::test]
async fn test_login_error_message_is_shown_verbatim() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let err = api
        .login(&credentials(SELLER_CONTACT, "wrong-password"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api(_)));
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_error_envelope_on_non_2xx_keeps_backend_message() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let err = api
        .login(&credentials(LOCKED_CONTACT, SELLER_PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Account locked");
}

#[tokio::test]
async fn test_session_persists_and_token_is_sent() {
    let backend = MockBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("state/session.json"));
    let api = client_for(&backend.base_url());

    let data = api
        .login(&credentials(SELLER_CONTACT, SELLER_PASSWORD))
        .await
        .unwrap();
    Session::new(
        data.role,
        data.user_id,
        SELLER_CONTACT.to_string(),
        data.token.map(SecretString::from),
    )
    .save(&store)
    .unwrap();

    // A fresh store over the same file sees the session.
    let reopened = FileStore::new(dir.path().join("state/session.json"));
    let session = Session::load_required(&reopened).unwrap();
    assert_eq!(session.role, Role::Seller);
    assert_eq!(session.seller_id(), SellerId::new(SELLER_ID));
    assert_eq!(
        session.token().map(|t| t.expose_secret().to_string()),
        Some(SELLER_TOKEN.to_string())
    );

    let authed = api.with_token(session.token());
    authed
        .list_deliveries(session.seller_id(), chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .await
        .unwrap();
    let request = backend.requests().pop().unwrap();
    assert_eq!(
        request.authorization.as_deref(),
        Some(format!("Bearer {SELLER_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_logout_clears_session() {
    let store = MemoryStore::default();
    Session::new(Role::Admin, UserId::new(1), SELLER_CONTACT.to_string(), None)
        .save(&store)
        .unwrap();

    Session::clear(&store).unwrap();

    assert!(matches!(
        Session::load_required(&store),
        Err(ClientError::NotSignedIn)
    ));
}

// =============================================================================
// Failure mapping
// =============================================================================

#[tokio::test]
async fn test_slow_backend_times_out() {
    let backend = MockBackend::spawn_with(MockOptions {
        seller_delay: Duration::from_secs(3),
    })
    .await;
    let mut config = ClientConfig::new(&backend.base_url()).unwrap();
    config.timeout = Duration::from_millis(200);
    let api = ApiClient::new(&config).unwrap();

    let err = api.list_sellers().await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(err.is_offline());
    assert_eq!(err.user_message(), "Failed to connect to server");
}

#[tokio::test]
async fn test_unreachable_backend_is_a_connect_failure() {
    let api = client_for(&unreachable_base_url().await);

    let err = api.list_addresses().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Transport {
            kind: TransportKind::Connect,
            ..
        }
    ));
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_customers_by_area_sends_comma_list() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let customers = api
        .customers_by_area(&[AddressId::new(2)])
        .await
        .unwrap();

    assert_eq!(customers.len(), 3);
    assert!(customers.iter().all(|c| c.address_id == Some(AddressId::new(2))));
    let request = backend.requests().pop().unwrap();
    assert_eq!(request.query.get("path").map(String::as_str), Some("customers_by_area"));
    assert_eq!(request.query.get("address_ids").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn test_sellers_accept_mixed_id_and_vehicle_shapes() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let sellers = api.list_sellers().await.unwrap();

    assert_eq!(sellers.len(), 2);
    assert_eq!(sellers[1].id, SellerId::new(7));
    assert_eq!(sellers[1].vehicle_no, "MH14CD5678");
}

#[tokio::test]
async fn test_missing_customer_surfaces_backend_message() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let err = api.get_customer(CustomerId::new(42)).await.unwrap_err();

    assert_eq!(err.user_message(), "Customer not found");
}

#[tokio::test]
async fn test_customer_summary_due() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let summary = api
        .customer_summary(CustomerId::new(1), "2024-06")
        .await
        .unwrap();

    assert_eq!(summary.month, "2024-06");
    assert_eq!(summary.status, PaymentStatus::Pending);
    assert!((summary.due() - 2960.0).abs() < f64::EPSILON);
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_delete_sends_action_and_id() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let message = api.delete_customer(CustomerId::new(3)).await.unwrap();

    assert_eq!(message.as_deref(), Some("Customer deleted"));
    let request = backend.requests().pop().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.body["action"], "delete");
    assert_eq!(request.body["id"], 3);
}

#[tokio::test]
async fn test_rejected_delete_is_an_api_error() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    let err = api.delete_seller(SellerId::new(999)).await.unwrap_err();

    assert!(matches!(err, ClientError::Api(ref m) if m == "Seller not found"));
}

#[tokio::test]
async fn test_mark_paid_targets_path_with_month() {
    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    api.mark_paid(CustomerId::new(5), "2024-06").await.unwrap();

    let request = backend.requests().pop().unwrap();
    assert_eq!(request.script, "payments.php");
    assert_eq!(request.query.get("path").map(String::as_str), Some("mark_paid"));
    assert_eq!(request.body["customer_id"], 5);
    assert_eq!(request.body["month"], "2024-06");
}

#[tokio::test]
async fn test_record_payment_body() {
    use dairy_ledger_core::{Amount, PaymentInput};
    use rust_decimal::Decimal;

    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());

    api.record_payment(&PaymentInput {
        customer_id: CustomerId::new(2),
        amount: Amount::new(Decimal::from(1500)),
        method: PaymentMethod::Upi,
        status: PaymentStatus::Paid,
    })
    .await
    .unwrap();

    let request = backend.requests().pop().unwrap();
    assert_eq!(request.body["customer_id"], 2);
    assert_eq!(request.body["method"], "UPI");
}

#[tokio::test]
async fn test_change_password_reports_backend_verdict() {
    use dairy_ledger_core::forms::PasswordChange;

    let backend = MockBackend::spawn().await;
    let api = client_for(&backend.base_url());
    let user = UserId::new(SELLER_ID);

    let ok = api
        .change_password(
            user,
            &PasswordChange {
                current_password: SELLER_PASSWORD.to_string(),
                new_password: "fresh-milk".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(ok.as_deref(), Some("Password updated"));

    let err = api
        .change_password(
            user,
            &PasswordChange {
                current_password: "not-it".to_string(),
                new_password: "fresh-milk".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Current password is incorrect");
    assert_eq!(backend.requests()[0].body["user_id"], SELLER_ID);
}
