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

#[tokio::test]
async fn client_management_is_admin_only() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let admin = common::admin_token(&server.base_url).await?;
    let http = reqwest::Client::new();
    let username = format!("clerk{}", nonce());

    // Admin provisions a user with no role at all
    let res = http
        .post(format!("{}/api/users", server.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "username": username, "password": "clerk-pass", "role_id": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = http
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": "clerk-pass" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<serde_json::Value>().await?["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("token")?;

    // Reading tenants is fine
    let res = http
        .get(format!("{}/api/clients", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Creating one is not
    let res = http
        .post(format!("{}/api/clients", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": format!("Rogue {}", nonce()) }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], json!("FORBIDDEN"));

    Ok(())
}

#[tokio::test]
async fn users_can_be_assigned_to_tenants() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let admin = common::admin_token(&server.base_url).await?;
    let http = reqwest::Client::new();
    let n = nonce();

    let res = http
        .post(format!("{}/api/clients", server.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "name": format!("Hooli {}", n) }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let client_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("client id")?;

    let res = http
        .post(format!("{}/api/users", server.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "username": format!("worker{}", n), "password": "worker-pass" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let user_id = res.json::<serde_json::Value>().await?["data"]["id"]
        .as_i64()
        .context("user id")?;

    let res = http
        .put(format!("{}/api/users/{}/clients", server.base_url, user_id))
        .bearer_auth(&admin)
        .json(&json!({ "client_ids": [client_id] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["clients"], json!([client_id]));

    Ok(())
}
