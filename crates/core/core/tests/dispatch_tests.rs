//! End-to-end tests of the dispatcher and resource protocol against a mock server.

use horuspay_core::config::API_BASE_ENV;
use horuspay_core::requestor::{SOURCE, VERSION};
use horuspay_core::{
    ApiResource, ClientConfig, Environment, Headers, HorusPayError, HorusPayObject, Listing,
    ObjectKind, Requestor, ResourceProtocol,
};
use mockito::Matcher;
use serde_json::{Value, json};
use serial_test::serial;

#[derive(Debug)]
struct Payout(HorusPayObject);

impl ApiResource for Payout {
    const NAME: &'static str = "payout";
    const PATH_PREFIX: &'static str = "/accounts";

    fn from_object(object: HorusPayObject) -> Self {
        Self(object)
    }

    fn object(&self) -> &HorusPayObject {
        &self.0
    }

    fn object_mut(&mut self) -> &mut HorusPayObject {
        &mut self.0
    }
}

fn set_api_base(value: &str) {
    // SAFETY: Setting environment variables is unsafe in multi-threaded programs.
    // Tests calling this are #[serial].
    unsafe {
        std::env::set_var(API_BASE_ENV, value);
    }
}

fn clear_api_base() {
    // SAFETY: see set_api_base.
    unsafe {
        std::env::remove_var(API_BASE_ENV);
    }
}

#[tokio::test]
#[serial]
async fn test_env_base_routes_requests() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/accounts/payouts/5")
        .match_header("authorization", "Bearer sk_live_abc")
        .match_header("x-version", VERSION)
        .match_header("x-source", SOURCE)
        .with_status(200)
        .with_body(r#"{"v1/payout":{"id":5,"klass":"v1/payout","status":"sent"}}"#)
        .create_async()
        .await;

    set_api_base(&server.url());

    let requestor = Requestor::new(
        ClientConfig::new()
            .with_environment(Environment::Production)
            .with_api_key("sk_live_abc"),
    )
    .unwrap();
    let result = ResourceProtocol::<Payout>::new(&requestor)
        .retrieve(5, Value::Null, Headers::new())
        .await;

    clear_api_base();

    let payout = result.unwrap();
    mock.assert_async().await;
    assert_eq!(payout.0.kind(), ObjectKind::Payout);
    assert_eq!(payout.0.get_str("status"), Some("sent"));
}

#[tokio::test]
#[serial]
async fn test_explicit_base_beats_env() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/accounts/payouts")
        .with_status(200)
        .with_body(r#"{"v1/payouts":[],"meta":{"total":0}}"#)
        .create_async()
        .await;

    set_api_base("http://127.0.0.1:9");

    let requestor = Requestor::new(ClientConfig::new().with_api_base(server.url())).unwrap();
    let result = ResourceProtocol::<Payout>::new(&requestor)
        .list(Value::Null, Headers::new())
        .await;

    clear_api_base();

    mock.assert_async().await;
    match result.unwrap() {
        Listing::Many(page) => {
            assert!(page.data.is_empty());
            assert_eq!(page.meta.unwrap().get_i64("total"), Some(0));
        }
        Listing::One(_) => panic!("expected a page"),
    }
}

#[tokio::test]
#[serial]
async fn test_custom_environment_requires_base() {
    clear_api_base();

    let requestor =
        Requestor::new(ClientConfig::new().with_environment(Environment::Custom)).unwrap();
    let result = ResourceProtocol::<Payout>::new(&requestor)
        .create(json!({ "amount": 1000 }), Headers::new())
        .await;

    assert!(matches!(result, Err(HorusPayError::Configuration { .. })));
}

#[tokio::test]
async fn test_session_token_scopes_account() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/v1/accounts/payouts/5")
        .match_header("authorization", "Bearer session-token")
        .match_header("horuspay-account", "12")
        .match_body(Matcher::Json(json!({ "amount": 1500 })))
        .with_status(200)
        .with_body(r#"{"v1/payout":{"id":5,"klass":"v1/payout","amount":1500}}"#)
        .create_async()
        .await;

    let requestor = Requestor::new(
        ClientConfig::new()
            .with_token("session-token")
            .with_account_id(12)
            .with_api_base(server.url()),
    )
    .unwrap();

    let payout = ResourceProtocol::<Payout>::new(&requestor)
        .update("5", json!({ "amount": 1500 }), Headers::new())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(payout.0.get_i64("amount"), Some(1500));
}

#[tokio::test]
async fn test_connection_error_details() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/accounts/payouts/404")
        .with_status(404)
        .with_body(r#"{"message":"Record not found"}"#)
        .create_async()
        .await;

    let requestor = Requestor::new(
        ClientConfig::new()
            .with_api_key("sk_test")
            .with_api_base(server.url()),
    )
    .unwrap();

    let err = ResourceProtocol::<Payout>::new(&requestor)
        .retrieve(404, Value::Null, Headers::new())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(404));
    assert_eq!(
        err.to_string(),
        "Request error: Request failed with status code 404"
    );

    let details = err.as_api_connection().unwrap();
    assert_eq!(details.error_message(), Some("Record not found"));
    assert!(!details.has_errors());
    assert_eq!(details.http_request.method, "GET");
    assert!(details.http_request.url.ends_with("/v1/accounts/payouts/404"));
}
