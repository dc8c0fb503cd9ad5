use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};

use crate::{
    audit,
    dto::{
        categories::CategoryList,
        products::{ProductList, ProductRow, SaveProductRequest},
    },
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    forms::ProductFields,
    hierarchy,
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Product},
    response::{ApiResponse, Meta},
    services::category_service,
    state::AppState,
};

pub async fn fetch_all(state: &AppState) -> AppResult<Vec<Product>> {
    let items = Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await
        .map_err(AppError::fetch_failed("products"))?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok(items)
}

/// Attach each product's category label, falling back to "Unknown".
pub fn join_labels(products: Vec<Product>, categories: &[Category]) -> Vec<ProductRow> {
    products
        .into_iter()
        .map(|product| ProductRow {
            category_label: hierarchy::category_label(categories, product.category_id),
            product,
        })
        .collect()
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let (products, categories) =
        tokio::try_join!(fetch_all(state), category_service::fetch_all(state))?;

    let items = join_labels(products, &categories);
    let total = items.len() as i64;
    let message = if items.is_empty() {
        "No products found"
    } else {
        "Products"
    };
    Ok(ApiResponse::success(
        message,
        ProductList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await
        .map_err(AppError::fetch_failed("product"))?
        .map(Product::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn category_options(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let categories = category_service::fetch_all(state).await?;
    let items = hierarchy::subcategory_options(&categories);
    Ok(ApiResponse::success(
        "Subcategories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

/// Insert a new product, or overwrite every field of `existing_id`.
pub async fn save_product(
    state: &AppState,
    user: &AuthUser,
    existing_id: Option<i32>,
    payload: SaveProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    if let Some(id) = existing_id {
        let exists = Products::find_by_id(id)
            .one(&state.orm)
            .await
            .map_err(AppError::fetch_failed("product"))?
            .is_some();
        if !exists {
            return Err(AppError::NotFound);
        }
    }

    let categories = category_service::fetch_all(state).await?;
    let fields = payload.into_form().validate(&categories)?;
    let active = active_model(existing_id, fields);

    let (saved, action, message) = match existing_id {
        Some(_) => (
            active.update(&state.orm).await.map_err(AppError::save_failed)?,
            "product_update",
            "Product updated successfully",
        ),
        None => (
            active.insert(&state.orm).await.map_err(AppError::save_failed)?,
            "product_create",
            "Product created successfully",
        ),
    };

    tracing::info!(product_id = saved.id, code = %saved.code, action, "product saved");
    audit::record(
        state,
        user.user_id,
        action,
        "products",
        serde_json::json!({ "product_id": saved.id, "code": saved.code }),
    )
    .await;

    Ok(ApiResponse::success(
        message,
        Product::from(saved),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    confirmed: bool,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if !confirmed {
        return Err(AppError::ConfirmationRequired);
    }

    let result = Products::delete_by_id(id)
        .exec(&state.orm)
        .await
        .map_err(AppError::delete_failed)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(product_id = id, "product deleted");
    audit::record(
        state,
        user.user_id,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn active_model(existing_id: Option<i32>, fields: ProductFields) -> ActiveModel {
    ActiveModel {
        id: existing_id.map(Set).unwrap_or(NotSet),
        code: Set(fields.code),
        category_id: Set(fields.category_id),
        title_en: Set(fields.title_en),
        title_ar: Set(fields.title_ar),
        title_fr: Set(fields.title_fr),
        material_en: Set(fields.material_en),
        material_ar: Set(fields.material_ar),
        material_fr: Set(fields.material_fr),
        length: Set(fields.length),
        weight: Set(fields.weight),
        diameter: Set(fields.diameter),
        quantity_bag: Set(fields.quantity_bag),
        quantity_box: Set(fields.quantity_box),
        images: Set(fields.images),
        colors: Set(fields.colors),
        additional_colors: Set(fields.additional_colors),
        is_featured: Set(fields.is_featured),
        top_products: Set(fields.top_products),
        primary_image_url: Set(fields.primary_image_url),
        created_at: NotSet,
        updated_at: Set(Utc::now().into()),
    }
}
