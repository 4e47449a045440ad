//! Integration tests for tokeninfo-backed token validation.

use serde_json::json;
use surat_auth::{AuthConfig, AuthError, TokenValidator};
use surat_google::GoogleTokenValidator;
use wiremock::matchers::{body_string, header, method, path, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TOKEN, TestHarness};

fn config() -> AuthConfig {
    AuthConfig {
        enabled: true,
        audience: "client-1.apps.googleusercontent.com".into(),
        domain: "desa-ngabeyan.id".into(),
    }
}

async fn mount_tokeninfo(harness: &TestHarness, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/tokeninfo"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(format!("access_token={TOKEN}")))
        .and(query_param_is_missing("access_token"))
        .respond_with(response)
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_valid_access_token() {
    let harness = TestHarness::start().await;
    mount_tokeninfo(
        &harness,
        ResponseTemplate::new(200).set_body_json(json!({
            "azp": "client-1.apps.googleusercontent.com",
            "aud": "client-1.apps.googleusercontent.com",
            "sub": "1234567890",
            "exp": "4102444800",
            "expires_in": "3599",
            "email": "operator@desa-ngabeyan.id",
            "email_verified": "true"
        })),
    )
    .await;

    let validator = GoogleTokenValidator::new(&harness.config.google).unwrap();
    let user = validator.validate(TOKEN, &config()).await.unwrap();

    assert_eq!(user.email, "operator@desa-ngabeyan.id");
    assert_eq!(user.access_token, TOKEN);
    assert_eq!(user.expires_at, 4_102_444_800);
}

#[tokio::test]
async fn test_unknown_token_is_client_error() {
    let harness = TestHarness::start().await;
    mount_tokeninfo(
        &harness,
        ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_token" })),
    )
    .await;

    let validator = GoogleTokenValidator::new(&harness.config.google).unwrap();
    let err = validator.validate(TOKEN, &config()).await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_provider_outage() {
    let harness = TestHarness::start().await;
    mount_tokeninfo(&harness, ResponseTemplate::new(503)).await;

    let validator = GoogleTokenValidator::new(&harness.config.google).unwrap();
    let err = validator.validate(TOKEN, &config()).await.unwrap_err();

    assert!(matches!(err, AuthError::ProviderUnavailable(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_garbled_body() {
    let harness = TestHarness::start().await;
    mount_tokeninfo(&harness, ResponseTemplate::new(200).set_body_string("not json")).await;

    let validator = GoogleTokenValidator::new(&harness.config.google).unwrap();
    let err = validator.validate(TOKEN, &config()).await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidFormat(_)));
}
