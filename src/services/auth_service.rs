use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    audit,
    dto::auth::{Claims, SessionStatus, SignInRequest, SignInResponse},
    entity::users::{Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    gate::{DASHBOARD_ROUTE, GateDecision, Session, SessionEvent},
    middleware::auth::{AuthUser, decode_session},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";

pub async fn sign_in(
    state: &AppState,
    payload: SignInRequest,
) -> AppResult<ApiResponse<SignInResponse>> {
    let SignInRequest { email, password } = payload;
    let email = email.trim().to_string();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await
        .map_err(|err| AppError::AuthFailed(err.to_string()))?
        .ok_or_else(|| AppError::AuthFailed(INVALID_CREDENTIALS.into()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::info!(email = %email, "sign-in rejected");
        return Err(AppError::AuthFailed(INVALID_CREDENTIALS.into()));
    }

    let user = User::from(user);
    let session = issue_session(&state.jwt_secret, &user)?;

    state.sessions.publish(SessionEvent::SignedIn {
        user_id: user.id,
        email: user.email.clone(),
    });
    audit::record(
        state,
        user.id,
        "user_sign_in",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Signed in",
        SignInResponse {
            session,
            user,
            redirect_to: DASHBOARD_ROUTE.to_string(),
        },
        Some(Meta::empty()),
    ))
}

pub fn issue_session(secret: &str, user: &User) -> AppResult<Session> {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: expires_at.timestamp() as usize,
    };

    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(Session {
        access_token,
        user_id: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
        expires_at,
    })
}

/// The caller's current session, if its token is valid.
pub fn current_session(state: &AppState, token: Option<&str>) -> Option<Session> {
    let token = token?;
    match decode_session(&state.jwt_secret, token) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring invalid session token");
            None
        }
    }
}

pub fn session_status(state: &AppState, token: Option<&str>) -> ApiResponse<SessionStatus> {
    let session = current_session(state, token);
    let decision = GateDecision::for_session(session.as_ref());
    ApiResponse::success(
        "Session",
        SessionStatus { session, decision },
        Some(Meta::empty()),
    )
}

pub async fn sign_out(state: &AppState, user: &AuthUser) -> ApiResponse<serde_json::Value> {
    state.sessions.publish(SessionEvent::SignedOut {
        user_id: user.user_id,
    });
    audit::record(
        state,
        user.user_id,
        "user_sign_out",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;
    ApiResponse::success("Signed out", serde_json::json!({}), Some(Meta::empty()))
}
