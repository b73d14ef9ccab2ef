use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{publication_path, TestApp};

#[tokio::test]
async fn publication_info_passes_the_provider_body_through() -> Result<()> {
    let app = TestApp::spawn().await?;
    let publication = json!({
        "id": "pub_test",
        "name": "Test Publication",
        "stats": { "active_subscriptions": 3 }
    });

    Mock::given(path(publication_path()))
        .and(method("GET"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(publication.clone()))
        .expect(1)
        .mount(&app.beehiiv_server)
        .await;

    let res = app.get("/publication-info").await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, publication);

    Ok(())
}

#[tokio::test]
async fn publication_info_propagates_the_provider_status_and_body() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(publication_path()))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such publication"))
        .expect(1)
        .mount(&app.beehiiv_server)
        .await;

    let res = app.get("/publication-info").await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.text().await?;
    assert!(body.contains("no such publication"), "was: {body}");

    Ok(())
}

#[tokio::test]
async fn publication_info_unconfigured_app_answers_500() -> Result<()> {
    let app = TestApp::spawn_unconfigured().await?;

    let res = app.get("/publication-info").await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
