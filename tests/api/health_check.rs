//! Tests the service-status routes: 'health' and the root banner.

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/health").await?;

    assert!(res.status() == StatusCode::OK, "Healthcheck FAILED!");
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "status": "healthy", "service": "beehiiv-integration" })
    );

    Ok(())
}

#[tokio::test]
async fn root_reports_running() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/").await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "message": "Beehiiv Integration Backend is running" })
    );

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.get("/invalidpath").await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}
