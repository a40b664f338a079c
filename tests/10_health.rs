mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::start_server().await?;
    let res = reqwest::Client::new()
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    // The test database is unreachable, so degraded is expected
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]["status"].is_string(), "health body: {}", body);
    Ok(())
}

#[tokio::test]
async fn root_lists_service_info() -> Result<()> {
    let server = common::start_server().await?;
    let body = reqwest::get(format!("{}/", server.base_url))
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Cozy API");
    Ok(())
}

#[tokio::test]
async fn dropped_server_stops_listening() -> Result<()> {
    let server = common::start_server().await?;
    let url = format!("{}/health", server.base_url);
    drop(server);

    let res = reqwest::Client::new()
        .get(&url)
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await;
    assert!(res.is_err(), "server still answering on {}", url);
    Ok(())
}
