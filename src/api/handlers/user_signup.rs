use super::{AuthResponse, UserCredentials, missing_payload, respond};
use crate::auth::AuthService;
use axum::{Json, extract::Extension, response::IntoResponse};
use tracing::{debug, info_span, instrument};

#[utoipa::path(
    post,
    path= "/api/signup",
    request_body = UserCredentials,
    responses (
        (status = 200, description = "Registration successful", body = AuthResponse, content_type = "application/json"),
        (status = 400, description = "Missing username or password", body = AuthResponse),
        (status = 409, description = "Username already exists", body = AuthResponse),
    ),
    tag= "auth"
)]
// axum handler for signup
#[instrument(skip(auth, payload))]
pub async fn signup(
    auth: Extension<AuthService>,
    payload: Option<Json<UserCredentials>>,
) -> impl IntoResponse {
    let Some(Json(user)) = payload else {
        return missing_payload();
    };

    debug!("user: {:?}", user);

    let (username, password) = user.into_parts();
    let service = auth.0.clone();

    let span = info_span!("auth.register");
    let outcome =
        tokio::task::spawn_blocking(move || span.in_scope(|| service.register(&username, &password)))
            .await;

    respond(outcome)
}
