use crate::APP_USER_AGENT;

// axum handler for /
pub async fn root() -> &'static str {
    APP_USER_AGENT
}
