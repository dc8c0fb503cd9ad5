use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{SessionStatus, SignInRequest, SignInResponse},
        categories::{CategoryList, SaveCategoryRequest},
        dashboard::DashboardStats,
        images::{ImageActionRequest, ImageUploadForm, ImageUploadResponse},
        products::{ProductList, ProductRow, SaveProductRequest},
    },
    gate::{GateDecision, Session},
    images::{ImageSet, UploadFailure, UploadReport},
    models::{Category, Product, User},
    response::{ApiResponse, Meta},
    routes::{auth, categories, dashboard, health, images, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::sign_in,
        auth::sign_out,
        auth::session,
        auth::session_events,
        categories::list_categories,
        categories::parent_options,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::category_options,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        images::upload_images,
        images::remove_image,
        images::set_primary,
        dashboard::overview
    ),
    components(
        schemas(
            User,
            Category,
            Product,
            Session,
            GateDecision,
            SessionStatus,
            SignInRequest,
            SignInResponse,
            SaveCategoryRequest,
            CategoryList,
            SaveProductRequest,
            ProductRow,
            ProductList,
            ImageSet,
            UploadFailure,
            UploadReport,
            ImageActionRequest,
            ImageUploadForm,
            ImageUploadResponse,
            DashboardStats,
            params::DeleteQuery,
            Meta,
            ApiResponse<Category>,
            ApiResponse<CategoryList>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<ImageSet>,
            ApiResponse<ImageUploadResponse>,
            ApiResponse<DashboardStats>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-in and session endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Images", description = "Staged product image endpoints"),
        (name = "Dashboard", description = "Dashboard overview"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
