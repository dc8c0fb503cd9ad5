use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{forms::ProductForm, images::ImageSet, models::Product};

/// A numeric form input, accepted either as a JSON number or as the text
/// typed into the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(serde_json::Number),
    Text(String),
}

impl FormNumber {
    pub fn into_text(self) -> String {
        match self {
            FormNumber::Number(n) => n.to_string(),
            FormNumber::Text(s) => s,
        }
    }
}

fn text(value: Option<FormNumber>) -> String {
    value.map(FormNumber::into_text).unwrap_or_default()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveProductRequest {
    pub code: String,
    pub category_id: Option<i32>,
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    pub material_en: String,
    pub material_ar: String,
    pub material_fr: String,
    #[schema(value_type = Option<String>)]
    pub length: Option<FormNumber>,
    #[schema(value_type = Option<String>)]
    pub weight: Option<FormNumber>,
    #[schema(value_type = Option<String>)]
    pub diameter: Option<FormNumber>,
    #[schema(value_type = Option<String>)]
    pub quantity_bag: Option<FormNumber>,
    #[schema(value_type = Option<String>)]
    pub quantity_box: Option<FormNumber>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[schema(value_type = Option<String>)]
    pub additional_colors: Option<FormNumber>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub top_products: bool,
    #[serde(flatten)]
    pub images: ImageSet,
}

impl SaveProductRequest {
    pub fn into_form(self) -> ProductForm {
        let mut form = ProductForm::default()
            .with_code(self.code)
            .with_titles(self.title_en, self.title_ar, self.title_fr)
            .with_materials(self.material_en, self.material_ar, self.material_fr)
            .with_length(text(self.length))
            .with_weight(text(self.weight))
            .with_diameter(text(self.diameter))
            .with_quantity_bag(text(self.quantity_bag))
            .with_quantity_box(text(self.quantity_box))
            .with_additional_colors(
                self.additional_colors
                    .map(FormNumber::into_text)
                    .unwrap_or_else(|| "0".into()),
            )
            .with_featured(self.is_featured)
            .with_top_product(self.top_products)
            .with_images(self.images);

        if let Some(category_id) = self.category_id {
            form = form.with_category(category_id);
        }
        self.colors
            .iter()
            .fold(form, |form, color| form.with_color(color))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub category_label: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductRow>)]
    pub items: Vec<ProductRow>,
}
