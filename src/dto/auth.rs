use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    gate::{GateDecision, Session},
    models::User,
};

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignInResponse {
    pub session: Session,
    pub user: User,
    pub redirect_to: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatus {
    pub session: Option<Session>,
    pub decision: GateDecision,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}
