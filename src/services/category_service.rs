use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    audit,
    dto::categories::{CategoryList, SaveCategoryRequest},
    entity::{
        categories::{ActiveModel, Column, Entity as Categories},
        products::{Column as ProductColumn, Entity as Products},
    },
    error::{AppError, AppResult},
    hierarchy,
    middleware::auth::{AuthUser, ensure_admin},
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// All categories, oldest id first.
pub async fn fetch_all(state: &AppState) -> AppResult<Vec<Category>> {
    let items = Categories::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await
        .map_err(AppError::fetch_failed("categories"))?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(items)
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = fetch_all(state).await?;
    let total = items.len() as i64;
    let message = if items.is_empty() {
        "No categories found"
    } else {
        "Categories"
    };
    Ok(ApiResponse::success(
        message,
        CategoryList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await
        .map_err(AppError::fetch_failed("category"))?
        .map(Category::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Category", category, None))
}

pub async fn parent_options(
    state: &AppState,
    editing_id: Option<i32>,
) -> AppResult<ApiResponse<CategoryList>> {
    let categories = fetch_all(state).await?;
    let items = hierarchy::parent_options(&categories, editing_id);
    Ok(ApiResponse::success(
        "Parent categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

/// Insert a new category, or overwrite every field of `existing_id`.
pub async fn save_category(
    state: &AppState,
    user: &AuthUser,
    existing_id: Option<i32>,
    payload: SaveCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let categories = fetch_all(state).await?;

    if let Some(id) = existing_id {
        if !categories.iter().any(|c| c.id == id) {
            return Err(AppError::NotFound);
        }
    }

    let fields = payload.into_form().validate(&categories, existing_id)?;

    if let Some(id) = existing_id {
        if hierarchy::promotes_to_top_level(&categories, id, fields.parent_id) {
            let product_count = Products::find()
                .filter(ProductColumn::CategoryId.eq(id))
                .count(&state.orm)
                .await
                .map_err(AppError::fetch_failed("products"))?;
            hierarchy::validate_promotion(id, product_count)?;
        }
    }

    let now = Utc::now();

    let active = ActiveModel {
        id: existing_id.map(Set).unwrap_or(NotSet),
        title_en: Set(fields.title_en),
        title_ar: Set(fields.title_ar),
        title_fr: Set(fields.title_fr),
        parent_id: Set(fields.parent_id),
        created_at: NotSet,
        updated_at: Set(now.into()),
    };

    let (saved, action, message) = match existing_id {
        Some(_) => (
            active.update(&state.orm).await.map_err(AppError::save_failed)?,
            "category_update",
            "Category updated successfully",
        ),
        None => (
            active.insert(&state.orm).await.map_err(AppError::save_failed)?,
            "category_create",
            "Category created successfully",
        ),
    };

    tracing::info!(category_id = saved.id, action, "category saved");
    audit::record(
        state,
        user.user_id,
        action,
        "categories",
        serde_json::json!({ "category_id": saved.id }),
    )
    .await;

    Ok(ApiResponse::success(
        message,
        Category::from(saved),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    confirmed: bool,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if !confirmed {
        return Err(AppError::ConfirmationRequired);
    }

    let result = Categories::delete_by_id(id)
        .exec(&state.orm)
        .await
        .map_err(AppError::delete_failed)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(category_id = id, "category deleted");
    audit::record(
        state,
        user.user_id,
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
