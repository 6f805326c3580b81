mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{TestServer, PASSWORD};

#[tokio::test]
async fn register_rejects_short_password() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server
        .post("/auth/register", None, json!({"email": "a@b.com", "password": "short"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(server.baas.rows("profiles").is_empty());
    Ok(())
}

#[tokio::test]
async fn register_rejects_bad_email_and_missing_fields() -> Result<()> {
    let server = TestServer::spawn().await?;

    for payload in [
        json!({"email": "nope", "password": "long enough"}),
        json!({"password": "long enough"}),
        json!({"email": "a@b.com"}),
        json!({"email": "a@b.com", "password": 12345678}),
    ] {
        let (status, body) = server.post("/auth/register", None, payload.clone()).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["error"], "validation_error");
    }
    Ok(())
}

#[tokio::test]
async fn register_creates_profile_with_elevated_credential() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server
        .post("/auth/register", None, json!({"email": "grace@lab.dev", "password": "hopper1906"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["email"], "grace@lab.dev");
    assert_eq!(body["profile"]["username"], "grace");
    assert_eq!(body["profile"]["is_admin"], false);
    assert_eq!(body["profile"]["id"], body["user"]["id"]);

    let profiles = server.baas.rows("profiles");
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], body["user"]["id"]);
    assert_eq!(
        server.baas.credentials_used("profiles"),
        vec![lab_hack_nexus_api::baas::Credential::Elevated]
    );
    Ok(())
}

#[tokio::test]
async fn register_keeps_explicit_username() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server
        .post(
            "/auth/register",
            None,
            json!({"email": "grace@lab.dev", "password": "hopper1906", "username": "amazing_grace"}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["profile"]["username"], "amazing_grace");
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_fails() -> Result<()> {
    let server = TestServer::spawn().await?;
    let payload = json!({"email": "dup@lab.dev", "password": "password123"});

    let (first, _) = server.post("/auth/register", None, payload.clone()).await?;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = server.post("/auth/register", None, payload).await?;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "registration_failed");
    Ok(())
}

#[tokio::test]
async fn profile_insert_failure_is_internal() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.baas.set_reject_writes(true);

    let (status, body) = server
        .post("/auth/register", None, json!({"email": "x@lab.dev", "password": "password123"}))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "profile_creation_failed");
    Ok(())
}

#[tokio::test]
async fn login_returns_a_usable_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.baas.add_user("ada@lab.dev", false);

    let (status, body) = server
        .post("/auth/login", None, json!({"email": "ada@lab.dev", "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@lab.dev");

    let token = body["access_token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let (status, me) = server.get("/profiles/me", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "ada");
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_fails() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.baas.add_user("ada@lab.dev", false);

    let (status, body) = server
        .post("/auth/login", None, json!({"email": "ada@lab.dev", "password": "wrong-password"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "authentication_failed");
    Ok(())
}

#[tokio::test]
async fn register_fails_when_profile_insert_returns_no_row() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.baas.set_empty_inserts(true);

    let (status, body) = server
        .post("/auth/register", None, json!({"email": "ghost@lab.dev", "password": "password123"}))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "profile_creation_failed");
    Ok(())
}

#[tokio::test]
async fn register_returns_the_stored_profile() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server
        .post("/auth/register", None, json!({"email": "new@lab.dev", "password": "password123"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let stored = server.baas.rows("profiles");
    assert_eq!(stored.len(), 1);
    assert_eq!(body["profile"]["id"], stored[0]["id"]);
    assert_eq!(body["profile"]["username"], stored[0]["username"]);
    Ok(())
}

#[tokio::test]
async fn unreachable_auth_service_is_internal() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.baas.add_user("ada@lab.dev", false);
    server.baas.set_offline(true);

    let (status, body) = server
        .post("/auth/login", None, json!({"email": "ada@lab.dev", "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");

    let (status, body) = server
        .post("/auth/register", None, json!({"email": "new@lab.dev", "password": "password123"}))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    Ok(())
}
