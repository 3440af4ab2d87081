//! tests/api/cors.rs

use crate::helpers::{spawn_app, spawn_app_with};
use reqwest::Method;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

fn assert_cors_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        headers["Access-Control-Allow-Methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers["Access-Control-Allow-Headers"],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn preflight_returns_200_with_cors_headers_and_no_body() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app.request_invitation(Method::OPTIONS).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_cors_headers(&response);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn preflight_works_without_email_configuration() {
    // Arrange
    let test_app = spawn_app_with(|c| {
        c.notification.provider.api_key = None;
        c.notification.recipient_email = None;
    })
    .await;

    // Act
    let response = test_app.request_invitation(Method::OPTIONS).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_cors_headers(&response);
}

#[tokio::test]
async fn other_methods_are_rejected_with_405() {
    // Arrange
    let test_app = spawn_app().await;

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        // Act
        let response = test_app.request_invitation(method.clone()).await;

        // Assert
        assert_eq!(
            405,
            response.status().as_u16(),
            "The API did not reject method {}.",
            method
        );
        assert_cors_headers(&response);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn success_and_error_responses_carry_cors_headers() {
    // Arrange
    let test_app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "1" })))
        .mount(&test_app.email_server)
        .await;

    // Act
    let accepted = test_app
        .post_invitation_json(&crate::helpers::valid_submission())
        .await;
    let rejected = test_app.post_invitation("{}".into()).await;

    // Assert
    assert_eq!(200, accepted.status().as_u16());
    assert_cors_headers(&accepted);
    assert_eq!(400, rejected.status().as_u16());
    assert_cors_headers(&rejected);
}
