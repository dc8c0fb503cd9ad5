use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Deletes only go through once the user has confirmed them.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}
