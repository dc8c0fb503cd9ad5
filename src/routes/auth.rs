use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
};
use futures::{Stream, StreamExt};

use crate::{
    dto::auth::{SessionStatus, SignInRequest, SignInResponse},
    error::AppResult,
    gate::{AuthGate, GateDecision},
    middleware::auth::{AuthUser, bearer_token},
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/session", get(session))
        .route("/events", get(session_events))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in; redirect to the dashboard", body = ApiResponse<SignInResponse>),
        (status = 401, description = "Missing or invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> AppResult<Json<ApiResponse<SignInResponse>>> {
    let resp = auth_service::sign_in(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn sign_out(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<ApiResponse<serde_json::Value>> {
    Json(auth_service::sign_out(&state, &user).await)
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session and where the sign-in page should send the user", body = ApiResponse<SessionStatus>),
        (status = 400, description = "Malformed Authorization header")
    ),
    tag = "Auth"
)]
pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<SessionStatus>>> {
    let token = bearer_token(&headers)?;
    Ok(Json(auth_service::session_status(&state, token)))
}

#[utoipa::path(
    get,
    path = "/api/auth/events",
    responses(
        (status = 200, description = "Server-sent `gate` events: the decision on connect, then a redirect whenever someone signs in", content_type = "text/event-stream", body = GateDecision),
        (status = 400, description = "Malformed Authorization header")
    ),
    tag = "Auth"
)]
pub async fn session_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    let token = bearer_token(&headers)?;
    let current = auth_service::current_session(&state, token);
    let (gate, decision) = AuthGate::mount(&state.sessions, current.as_ref());
    tracing::debug!(?decision, "auth gate mounted");

    let events = gate
        .into_decisions(decision)
        .map(|decision| Event::default().event("gate").json_data(decision));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
