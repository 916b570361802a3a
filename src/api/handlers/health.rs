use crate::{GIT_COMMIT_HASH, auth::AuthService};
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info_span};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    credentials: String,
    attempts: String,
}

#[derive(Debug, Clone, Copy)]
struct StoreStatus {
    credentials: bool,
    attempts: bool,
}

impl StoreStatus {
    const fn is_healthy(self) -> bool {
        self.credentials && self.attempts
    }
}

const fn status_str(ok: bool) -> &'static str {
    if ok { "ok" } else { "error" }
}

fn check_stores(auth: &AuthService) -> StoreStatus {
    let _span = info_span!("store.check").entered();

    let credentials = match auth.credentials().load() {
        Ok(_) => true,
        Err(err) => {
            error!("Failed to load credentials: {}", err);
            false
        }
    };

    let attempts = match auth.attempts().load() {
        Ok(_) => true,
        Err(err) => {
            error!("Failed to load attempt log: {}", err);
            false
        }
    };

    StoreStatus {
        credentials,
        attempts,
    }
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Credential store and attempt log are readable", body = [Health]),
        (status = 503, description = "Credential store or attempt log is unreadable", body = [Health])
    ),
    tag= "health"
)]
// axum handler for health
pub async fn health(method: Method, auth: Extension<AuthService>) -> impl IntoResponse {
    let service = auth.0.clone();
    let status = tokio::task::spawn_blocking(move || check_stores(&service))
        .await
        .unwrap_or_else(|err| {
            error!("Health check task failed: {}", err);
            StoreStatus {
                credentials: false,
                attempts: false,
            }
        });

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        credentials: status_str(status.credentials).to_string(),
        attempts: status_str(status.attempts).to_string(),
    };

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let headers = format!("{}:{}:{}", health.name, health.version, short_hash)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();

            headers.insert("X-App", x_app_header_value);

            headers
        })
        .map_err(|err| {
            error!("Failed to parse X-App header: {}", err);
        });

    // Unwrap the headers or provide a default value (empty headers) in case of an error
    let headers = headers.unwrap_or_else(|()| HeaderMap::new());

    if status.is_healthy() {
        debug!("Stores are healthy");
        (StatusCode::OK, headers, body)
    } else {
        debug!("Stores are unhealthy");
        (StatusCode::SERVICE_UNAVAILABLE, headers, body)
    }
}
