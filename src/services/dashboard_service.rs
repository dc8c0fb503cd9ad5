use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    dto::dashboard::DashboardStats,
    entity::{
        categories::Entity as Categories,
        products::{Column as ProductCol, Entity as Products},
    },
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Four independent counts, queried together. A failing count reads as zero.
pub async fn overview(state: &AppState) -> ApiResponse<DashboardStats> {
    let (categories, products, featured, top) = tokio::join!(
        Categories::find().count(&state.orm),
        Products::find().count(&state.orm),
        Products::find()
            .filter(ProductCol::IsFeatured.eq(true))
            .count(&state.orm),
        Products::find()
            .filter(ProductCol::TopProducts.eq(true))
            .count(&state.orm),
    );

    let stats = DashboardStats {
        total_categories: count_or_zero("categories", categories),
        total_products: count_or_zero("products", products),
        featured_products: count_or_zero("featured_products", featured),
        top_products: count_or_zero("top_products", top),
    };

    ApiResponse::success("Dashboard overview", stats, Some(Meta::empty()))
}

fn count_or_zero(what: &'static str, result: Result<u64, DbErr>) -> u64 {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, what, "dashboard count failed");
        0
    })
}
