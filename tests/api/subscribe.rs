use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_partial_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{subscriptions_path, TestApp};

#[tokio::test]
async fn subscribe_ok_with_full_payload() -> Result<()> {
    let app = TestApp::spawn().await?;

    let json_request = json!({
        "email": "jane.doe@example.com",
        "first_name": "Jane",
        "last_name": "Doe",
        "source": "landing-page"
    });

    // Setup the mock server
    Mock::given(path(subscriptions_path()))
        .and(method("POST"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "email": "jane.doe@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "utm_source": "landing-page",
            "reactivate_existing": true,
            "send_welcome_email": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "sub_123"})))
        .expect(1)
        .mount(&app.beehiiv_server)
        .await;

    let res = app.post_subscribe(&json_request).await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Successfully subscribed to newsletter",
            "subscriber_id": "sub_123"
        })
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_defaults_source_to_website() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(subscriptions_path()))
        .and(method("POST"))
        .and(body_partial_json(json!({"utm_source": "website"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "sub_1"})))
        .expect(1)
        .mount(&app.beehiiv_server)
        .await;

    let res = app
        .post_subscribe(&json!({"email": "jane.doe@example.com"}))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn subscribe_conflict_is_reported_as_success() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(subscriptions_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&app.beehiiv_server)
        .await;

    let res = app
        .post_subscribe(&json!({"email": "jane.doe@example.com"}))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Email already subscribed to newsletter"
        })
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_provider_rejection_answers_400_with_the_provider_body() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(subscriptions_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&app.beehiiv_server)
        .await;

    let res = app
        .post_subscribe(&json!({"email": "jane.doe@example.com"}))
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.text().await?;
    assert!(body.contains("oops"), "was: {body}");

    Ok(())
}

#[tokio::test]
async fn subscribe_invalid_email_rejected_without_a_provider_call() -> Result<()> {
    let app = TestApp::spawn().await?;

    // No request must reach the provider.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.beehiiv_server)
        .await;

    let cases = [
        (json!({"email": ""}), "Empty email"),
        (json!({"email": "not an email"}), "Invalid email"),
        (json!({"email": "missing-domain@"}), "Missing domain"),
    ];

    for (body, description) in cases {
        let res = app.post_subscribe(&body).await?;
        assert_eq!(
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "The API did not return a 422 UNPROCESSABLE ENTITY, the payload was {}.",
            description
        );
    }

    Ok(())
}

#[tokio::test]
async fn subscribe_missing_fields_unprocessable_entity() -> Result<()> {
    let app = TestApp::spawn().await?;

    let tests = [
        (json!({"first_name": "Jane"}), "Missing email"),
        (json!({"email": null}), "Null email"),
        (json!({}), "Empty json"),
    ];

    for (json_request, params) in tests {
        let res = app.post_subscribe(&json_request).await?;
        assert_eq!(
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Wrong response: ({}), Expected: ({}); for request with: {params}",
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    Ok(())
}

#[tokio::test]
async fn subscribe_unconfigured_app_answers_500_without_a_provider_call() -> Result<()> {
    let app = TestApp::spawn_unconfigured().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.beehiiv_server)
        .await;

    let res = app
        .post_subscribe(&json!({"email": "jane.doe@example.com"}))
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
