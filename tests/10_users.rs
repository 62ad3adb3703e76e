mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn register_creates_user() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .request(Method::POST, "/api/users")
        .json(&json!({ "username": "askar", "password": "rahasia", "name": "Askar Prayogo" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "data": { "username": "askar", "name": "Askar Prayogo" } }));
    Ok(())
}

#[tokio::test]
async fn register_rejects_invalid_body() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .request(Method::POST, "/api/users")
        .json(&json!({ "username": "", "password": "", "name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    let errors = body["errors"].as_object().expect("field errors");
    assert!(errors.contains_key("username"));
    assert!(errors.contains_key("password"));
    assert!(errors.contains_key("name"));
    Ok(())
}

#[tokio::test]
async fn register_rejects_taken_username() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .request(Method::POST, "/api/users")
        .json(&json!({ "username": "test", "password": "rahasia", "name": "test" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["errors"], "Username already exists");
    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_json() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .request(Method::POST, "/api/users")
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>().await?["errors"].is_string());
    Ok(())
}

#[tokio::test]
async fn login_replaces_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .request(Method::POST, "/api/users/login")
        .json(&json!({ "username": "test", "password": "rahasia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let token = body["data"]["token"].as_str().expect("token").to_string();
    assert!(!token.is_empty());
    assert_ne!(token, common::TEST_TOKEN);

    // The seeded token was overwritten
    let res = server.authed(Method::GET, "/api/users/current").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .request(Method::GET, "/api/users/current")
        .header("Authorization", token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_failures_share_one_message() -> Result<()> {
    let server = TestServer::spawn().await?;

    for payload in [
        json!({ "username": "test", "password": "salah" }),
        json!({ "username": "salah", "password": "rahasia" }),
    ] {
        let res = server
            .request(Method::POST, "/api/users/login")
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.json::<Value>().await?["errors"], "Username or password wrong");
    }
    Ok(())
}

#[tokio::test]
async fn login_rejects_invalid_body() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .request(Method::POST, "/api/users/login")
        .json(&json!({ "username": "", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn current_user_requires_valid_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.authed(Method::GET, "/api/users/current").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "data": { "username": "test", "name": "test" } })
    );

    let res = server
        .request(Method::GET, "/api/users/current")
        .header("Authorization", "salah")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["errors"], "Unauthorized");

    let res = server.request(Method::GET, "/api/users/current").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn update_changes_name_and_password() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .authed(Method::PATCH, "/api/users/current")
        .json(&json!({ "name": "Askar" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["name"], "Askar");

    let res = server
        .authed(Method::PATCH, "/api/users/current")
        .json(&json!({ "password": "lebihrahasia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["name"], "Askar");

    let res = server
        .request(Method::POST, "/api/users/login")
        .json(&json!({ "username": "test", "password": "lebihrahasia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn update_rejects_blank_fields() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .authed(Method::PATCH, "/api/users/current")
        .json(&json!({ "name": "", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn logout_revokes_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.authed(Method::DELETE, "/api/users/logout").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "data": "OK" }));

    let res = server.authed(Method::GET, "/api/users/current").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
