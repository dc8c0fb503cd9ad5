use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_categories: u64,
    pub total_products: u64,
    pub featured_products: u64,
    pub top_products: u64,
}
