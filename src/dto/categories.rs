use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{forms::CategoryForm, models::Category};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveCategoryRequest {
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

impl SaveCategoryRequest {
    pub fn into_form(self) -> CategoryForm {
        CategoryForm::default()
            .with_title_en(self.title_en)
            .with_title_ar(self.title_ar)
            .with_title_fr(self.title_fr)
            .with_parent(self.parent_id)
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ParentOptionsQuery {
    /// Category being edited, excluded from the candidates.
    pub editing_id: Option<i32>,
}
