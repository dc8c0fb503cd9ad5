use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::categories::{CategoryList, ParentOptionsQuery, SaveCategoryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Category,
    response::ApiResponse,
    routes::params::DeleteQuery,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/parent-options", get(parent_options))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List categories ordered by id", body = ApiResponse<CategoryList>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch categories"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/parent-options",
    params(
        ("editing_id" = Option<i32>, Query, description = "Category being edited")
    ),
    responses(
        (status = 200, description = "Top-level categories that may act as parent", body = ApiResponse<CategoryList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn parent_options(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ParentOptionsQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::parent_options(&state, query.editing_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::get_category(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = SaveCategoryRequest,
    responses(
        (status = 200, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Invalid parent category or missing title"),
        (status = 409, description = "Backend rejected the save"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaveCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::save_category(&state, &user, None, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = SaveCategoryRequest,
    responses(
        (status = 200, description = "Overwrite category", body = ApiResponse<Category>),
        (status = 400, description = "Invalid parent category or missing title"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<SaveCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::save_category(&state, &user, Some(id), payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID"),
        DeleteQuery
    ),
    responses(
        (status = 200, description = "Deleted category"),
        (status = 400, description = "Delete was not confirmed"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Backend rejected the delete"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = category_service::delete_category(&state, &user, id, query.confirm).await?;
    Ok(Json(resp))
}
