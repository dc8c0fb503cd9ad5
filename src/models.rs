use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{categories, products, users};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_subcategory(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub category_id: i32,
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    pub material_en: String,
    pub material_ar: String,
    pub material_fr: String,
    pub length: Option<f64>,
    pub weight: Option<f64>,
    pub diameter: Option<f64>,
    pub quantity_bag: i32,
    pub quantity_box: i32,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub additional_colors: i32,
    pub is_featured: bool,
    pub top_products: bool,
    pub primary_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            title_en: model.title_en,
            title_ar: model.title_ar,
            title_fr: model.title_fr,
            parent_id: model.parent_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            category_id: model.category_id,
            title_en: model.title_en,
            title_ar: model.title_ar,
            title_fr: model.title_fr,
            material_en: model.material_en,
            material_ar: model.material_ar,
            material_fr: model.material_fr,
            length: model.length,
            weight: model.weight,
            diameter: model.diameter,
            quantity_bag: model.quantity_bag,
            quantity_box: model.quantity_box,
            images: model.images,
            colors: model.colors,
            additional_colors: model.additional_colors,
            is_featured: model.is_featured,
            top_products: model.top_products,
            primary_image_url: model.primary_image_url,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
