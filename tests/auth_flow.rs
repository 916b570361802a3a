//! End-to-end signup/login flow against JSON file stores.
//!
//! Drives the public router the same way the server does, then inspects the
//! documents on disk and reopens them to check persistence across restarts.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use keyhole::{
    api,
    auth::AuthService,
    store::{AttemptLog, CredentialStore, JsonAttemptLog, JsonCredentialStore},
};
use serde_json::{Value, json};
use std::{path::Path, sync::Arc};
use tower::ServiceExt;

fn app(dir: &Path) -> Result<Router> {
    let credentials = JsonCredentialStore::open(dir.join("users.json"))?;
    let attempts = JsonAttemptLog::open(dir.join("login_logs.json"))?;
    Ok(api::router(
        AuthService::new(Arc::new(credentials), Arc::new(attempts)),
        None,
    ))
}

async fn post(app: &Router, uri: &str, username: &str, password: &str) -> Result<(StatusCode, Value)> {
    let body = json!({ "username": username, "password": password });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = serde_json::from_slice(&bytes).context("response is not JSON")?;
    Ok((status, value))
}

#[tokio::test]
async fn documented_example_flow() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = app(dir.path())?;

    let (status, body) = post(&app, "/api/signup", "alice", "secret1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = post(&app, "/api/login", "alice", "secret1").await?;
    assert_eq!(status, StatusCode::OK);

    let (wrong_status, wrong_body) = post(&app, "/api/login", "alice", "wrong").await?;
    let (unknown_status, unknown_body) = post(&app, "/api/login", "bob", "x").await?;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);

    let attempts = JsonAttemptLog::open(dir.path().join("login_logs.json"))?.load()?;
    let outcomes: Vec<(String, bool)> = attempts
        .into_iter()
        .map(|entry| (entry.username, entry.success))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("alice".to_string(), true),
            ("alice".to_string(), false),
            ("bob".to_string(), false),
        ]
    );

    let raw_log = std::fs::read_to_string(dir.path().join("login_logs.json"))?;
    assert!(!raw_log.contains("secret1"));
    assert!(!raw_log.contains("wrong"));

    Ok(())
}

#[tokio::test]
async fn credentials_survive_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;

    {
        let app = app(dir.path())?;
        let (status, _) = post(&app, "/api/signup", "carol", "pa55word").await?;
        assert_eq!(status, StatusCode::OK);
    }

    let app = app(dir.path())?;
    let (status, _) = post(&app, "/api/login", "carol", "pa55word").await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(&app, "/api/signup", "carol", "another").await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let stored = JsonCredentialStore::open(dir.path().join("users.json"))?
        .get("carol")?
        .context("carol should be stored")?;
    assert!(stored.password_hash.starts_with("$argon2id$"));

    let (status, _) = post(&app, "/api/login", "carol", "another").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn concurrent_duplicate_signups_have_one_winner() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = app(dir.path())?;

    let mut tasks = Vec::new();
    for i in 0..6 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            post(&app, "/api/signup", "dana", &format!("pw-{i}")).await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for task in tasks {
        let (status, _) = task.await??;
        match status {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 5);

    let credentials = JsonCredentialStore::open(dir.path().join("users.json"))?.load()?;
    assert_eq!(credentials.len(), 1);

    Ok(())
}
