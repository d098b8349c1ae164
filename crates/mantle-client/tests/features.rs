//! Feature-helper tests: evaluation against a fetched customer record.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mantle_client::{ClientOptions, MantleClient, NO_LIMIT};

fn client(server: &MockServer) -> MantleClient {
    MantleClient::with_customer_token_and_options(
        "app_1",
        "token_1",
        ClientOptions::with_base_url(server.uri()),
    )
    .unwrap()
}

async fn mount_customer(server: &MockServer, features: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/customer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customer": {"id": "cust_1", "features": features}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn boolean_feature_ignores_count() {
    let server = MockServer::start().await;
    mount_customer(
        &server,
        json!({"export": {"type": "boolean", "value": true}}),
    )
    .await;

    let client = client(&server);
    assert!(client
        .is_feature_enabled("export", None)
        .await
        .unwrap()
        .into_result()
        .unwrap());
    assert!(client
        .is_feature_enabled("export", Some(1_000_000))
        .await
        .unwrap()
        .into_result()
        .unwrap());
}

#[tokio::test]
async fn limit_feature_compares_count() {
    let server = MockServer::start().await;
    mount_customer(&server, json!({"seats": {"type": "limit", "value": 3}})).await;

    let client = client(&server);
    // Count defaults to 0.
    assert!(client
        .is_feature_enabled("seats", None)
        .await
        .unwrap()
        .into_result()
        .unwrap());
    assert!(client
        .is_feature_enabled("seats", Some(2))
        .await
        .unwrap()
        .into_result()
        .unwrap());
    assert!(!client
        .is_feature_enabled("seats", Some(3))
        .await
        .unwrap()
        .into_result()
        .unwrap());
}

#[tokio::test]
async fn limit_minus_one_is_unlimited() {
    let server = MockServer::start().await;
    mount_customer(&server, json!({"seats": {"type": "limit", "value": -1}})).await;

    assert!(client(&server)
        .is_feature_enabled("seats", Some(i64::MAX))
        .await
        .unwrap()
        .into_result()
        .unwrap());
}

#[tokio::test]
async fn missing_and_overage_features_are_disabled() {
    let server = MockServer::start().await;
    mount_customer(
        &server,
        json!({"overage": {"type": "limit_with_overage", "value": 10}}),
    )
    .await;

    let client = client(&server);
    assert!(!client
        .is_feature_enabled("overage", None)
        .await
        .unwrap()
        .into_result()
        .unwrap());
    assert!(!client
        .is_feature_enabled("absent", None)
        .await
        .unwrap()
        .into_result()
        .unwrap());
}

#[tokio::test]
async fn limit_for_feature_returns_value_only_for_limit_type() {
    let server = MockServer::start().await;
    mount_customer(
        &server,
        json!({
            "seats": {"type": "limit", "value": 25},
            "export": {"type": "boolean", "value": true},
            "overage": {"type": "limit_with_overage", "value": 10}
        }),
    )
    .await;

    let client = client(&server);
    assert_eq!(
        client
            .limit_for_feature("seats")
            .await
            .unwrap()
            .into_result()
            .unwrap(),
        25
    );
    for key in ["export", "overage", "absent"] {
        assert_eq!(
            client
                .limit_for_feature(key)
                .await
                .unwrap()
                .into_result()
                .unwrap(),
            NO_LIMIT
        );
    }
}

#[tokio::test]
async fn structured_error_from_get_customer_propagates_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customer"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let enabled = client.is_feature_enabled("seats", None).await.unwrap();
    assert_eq!(enabled.into_result().unwrap_err().error, "Unauthorized");

    let limit = client.limit_for_feature("seats").await.unwrap();
    assert_eq!(limit.into_result().unwrap_err().error, "Unauthorized");
}
