mod common;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::json;

fn nonce() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

struct Fixture {
    client_id: i64,
    warehouse_id: i64,
}

/// One tenant with one warehouse: aisles 1-3, levels 1-2, bins A-D,
/// bays unused.
async fn fixture(http: &reqwest::Client, base_url: &str, token: &str) -> Result<Fixture> {
    let n = nonce();

    let res = http
        .post(format!("{}/api/clients", base_url))
        .bearer_auth(token)
        .json(&json!({ "name": format!("Initech {}", n) }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "client: {}", res.status());
    let client_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("client id")?;

    let res = http
        .post(format!("{}/api/locations", base_url))
        .bearer_auth(token)
        .header("x-client-id", client_id.to_string())
        .json(&json!({ "name": "South DC" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "location: {}", res.status());
    let location_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("location id")?;

    let res = http
        .post(format!("{}/api/warehouses", base_url))
        .bearer_auth(token)
        .header("x-client-id", client_id.to_string())
        .json(&json!({
            "name": "Annex",
            "location_id": location_id,
            "aisle_type": "numeric", "aisle_count": 3,
            "level_type": "numeric", "level_count": 2,
            "bin_type": "alphabetic", "bin_count": 4
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "warehouse: {}", res.status());
    let warehouse_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("warehouse id")?;

    Ok(Fixture { client_id, warehouse_id })
}

#[tokio::test]
async fn rules_are_validated_before_they_are_stored() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let token = common::admin_token(&server.base_url).await?;
    let http = reqwest::Client::new();
    let fx = fixture(&http, &server.base_url, &token).await?;

    let post = |body: serde_json::Value| {
        http.post(format!("{}/api/warehouse-exclusions", server.base_url))
            .bearer_auth(&token)
            .header("x-client-id", fx.client_id.to_string())
            .json(&body)
            .send()
    };

    // A rule with no constrained dimension excludes everything
    let res = post(json!({ "warehouse_id": fx.warehouse_id })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));

    // Values must come from the warehouse's own sequences
    let res = post(json!({
        "warehouse_id": fx.warehouse_id,
        "aisle_from": "9", "aisle_to": "9"
    }))
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].as_str().unwrap().contains("aisle"));

    // Bays are unused in this warehouse, so any bay value is unknown
    let res = post(json!({
        "warehouse_id": fx.warehouse_id,
        "bay_from": "1", "bay_to": "1"
    }))
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Ranges run in sequence order
    let res = post(json!({
        "warehouse_id": fx.warehouse_id,
        "aisle_from": "3", "aisle_to": "1"
    }))
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // A well-formed rule persists
    let res = post(json!({
        "warehouse_id": fx.warehouse_id,
        "aisle_from": "1", "aisle_to": "2",
        "bin_from": "B", "bin_to": "D"
    }))
    .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["aisle_from"], json!("1"));

    Ok(())
}

#[tokio::test]
async fn listing_returns_rules_and_current_sequences() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let token = common::admin_token(&server.base_url).await?;
    let http = reqwest::Client::new();
    let fx = fixture(&http, &server.base_url, &token).await?;

    let res = http
        .post(format!("{}/api/warehouse-exclusions", server.base_url))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .json(&json!({
            "warehouse_id": fx.warehouse_id,
            "level_from": "2", "level_to": "2"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = http
        .get(format!(
            "{}/api/warehouse-exclusions/warehouse/{}",
            server.base_url, fx.warehouse_id
        ))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["possible_values"]["level"], json!(["1", "2"]));
    assert_eq!(body["possible_values"]["bin"], json!(["A", "B", "C", "D"]));

    // An unknown warehouse 404s rather than returning an empty list
    let res = http
        .get(format!(
            "{}/api/warehouse-exclusions/warehouse/{}",
            server.base_url, 999_999_999
        ))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn deleting_the_warehouse_removes_its_rules() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let token = common::admin_token(&server.base_url).await?;
    let http = reqwest::Client::new();
    let fx = fixture(&http, &server.base_url, &token).await?;

    let res = http
        .post(format!("{}/api/warehouse-exclusions", server.base_url))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .json(&json!({
            "warehouse_id": fx.warehouse_id,
            "aisle_from": "1", "aisle_to": "1"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let rule_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("rule id")?;

    let res = http
        .delete(format!("{}/api/warehouses/{}", server.base_url, fx.warehouse_id))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = http
        .get(format!("{}/api/warehouse-exclusions/{}", server.base_url, rule_id))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn updates_revalidate_against_current_configuration() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let token = common::admin_token(&server.base_url).await?;
    let http = reqwest::Client::new();
    let fx = fixture(&http, &server.base_url, &token).await?;

    let res = http
        .post(format!("{}/api/warehouse-exclusions", server.base_url))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .json(&json!({
            "warehouse_id": fx.warehouse_id,
            "bin_from": "A", "bin_to": "B"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let rule_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("rule id")?;

    // Replacing the rule with an out-of-range one is rejected
    let res = http
        .put(format!("{}/api/warehouse-exclusions/{}", server.base_url, rule_id))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .json(&json!({
            "warehouse_id": fx.warehouse_id,
            "bin_from": "A", "bin_to": "Z"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // A valid replacement goes through
    let res = http
        .put(format!("{}/api/warehouse-exclusions/{}", server.base_url, rule_id))
        .bearer_auth(&token)
        .header("x-client-id", fx.client_id.to_string())
        .json(&json!({
            "warehouse_id": fx.warehouse_id,
            "bin_from": "C", "bin_to": "D"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["bin_from"], json!("C"));
    assert_eq!(body["data"]["aisle_from"], json!(null));

    Ok(())
}
