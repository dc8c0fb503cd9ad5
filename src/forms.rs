//! Edit-dialog form values.
//!
//! Forms are plain values: every `with_*` call returns an updated copy, and
//! `validate` checks the whole form at once, producing the record that is
//! written on insert or overwrite.

use crate::{
    error::{AppError, AppResult},
    hierarchy,
    images::ImageSet,
    models::{Category, Product},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    pub parent_id: Option<i32>,
}

/// Validated category fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFields {
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    pub parent_id: Option<i32>,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            title_en: category.title_en.clone(),
            title_ar: category.title_ar.clone(),
            title_fr: category.title_fr.clone(),
            parent_id: category.parent_id,
        }
    }

    pub fn with_title_en(self, title: impl Into<String>) -> Self {
        Self { title_en: title.into(), ..self }
    }

    pub fn with_title_ar(self, title: impl Into<String>) -> Self {
        Self { title_ar: title.into(), ..self }
    }

    pub fn with_title_fr(self, title: impl Into<String>) -> Self {
        Self { title_fr: title.into(), ..self }
    }

    pub fn with_parent(self, parent_id: Option<i32>) -> Self {
        Self { parent_id, ..self }
    }

    pub fn validate(
        &self,
        categories: &[Category],
        editing_id: Option<i32>,
    ) -> AppResult<CategoryFields> {
        let title_en = required("title_en", &self.title_en)?;
        let title_ar = required("title_ar", &self.title_ar)?;
        let title_fr = required("title_fr", &self.title_fr)?;
        hierarchy::validate_parent(categories, editing_id, self.parent_id)?;

        Ok(CategoryFields {
            title_en,
            title_ar,
            title_fr,
            parent_id: self.parent_id,
        })
    }
}

/// Product dialog state. Numeric inputs are kept as typed text until
/// validation so that an empty dimension stays distinct from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub code: String,
    pub category_id: Option<i32>,
    pub title_en: String,
    pub title_ar: String,
    pub title_fr: String,
    pub material_en: String,
    pub material_ar: String,
    pub material_fr: String,
    pub length: String,
    pub weight: String,
    pub diameter: String,
    pub quantity_bag: String,
    pub quantity_box: String,
    pub colors: Vec<String>,
    pub additional_colors: String,
    pub is_featured: bool,
    pub top_products: bool,
    pub images: ImageSet,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            category_id: None,
            title_en: String::new(),
            title_ar: String::new(),
            title_fr: String::new(),
            material_en: String::new(),
            material_ar: String::new(),
            material_fr: String::new(),
            length: String::new(),
            weight: String::new(),
            diameter: String::new(),
            quantity_bag: "0".into(),
            quantity_box: "0".into(),
            colors: Vec::new(),
            additional_colors: "0".into(),
            is_featured: false,
            top_products: false,
            images: ImageSet::default(),
        }
    }
}

/// Validated product fields, written as a whole on insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
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
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            category_id: Some(product.category_id),
            title_en: product.title_en.clone(),
            title_ar: product.title_ar.clone(),
            title_fr: product.title_fr.clone(),
            material_en: product.material_en.clone(),
            material_ar: product.material_ar.clone(),
            material_fr: product.material_fr.clone(),
            length: product.length.map(|v| v.to_string()).unwrap_or_default(),
            weight: product.weight.map(|v| v.to_string()).unwrap_or_default(),
            diameter: product.diameter.map(|v| v.to_string()).unwrap_or_default(),
            quantity_bag: product.quantity_bag.to_string(),
            quantity_box: product.quantity_box.to_string(),
            colors: product.colors.clone(),
            additional_colors: product.additional_colors.to_string(),
            is_featured: product.is_featured,
            top_products: product.top_products,
            images: ImageSet::from_product(product),
        }
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        Self { code: code.into(), ..self }
    }

    pub fn with_category(self, category_id: i32) -> Self {
        Self { category_id: Some(category_id), ..self }
    }

    pub fn with_titles(
        self,
        en: impl Into<String>,
        ar: impl Into<String>,
        fr: impl Into<String>,
    ) -> Self {
        Self {
            title_en: en.into(),
            title_ar: ar.into(),
            title_fr: fr.into(),
            ..self
        }
    }

    pub fn with_materials(
        self,
        en: impl Into<String>,
        ar: impl Into<String>,
        fr: impl Into<String>,
    ) -> Self {
        Self {
            material_en: en.into(),
            material_ar: ar.into(),
            material_fr: fr.into(),
            ..self
        }
    }

    pub fn with_length(self, text: impl Into<String>) -> Self {
        Self { length: text.into(), ..self }
    }

    pub fn with_weight(self, text: impl Into<String>) -> Self {
        Self { weight: text.into(), ..self }
    }

    pub fn with_diameter(self, text: impl Into<String>) -> Self {
        Self { diameter: text.into(), ..self }
    }

    pub fn with_quantity_bag(self, text: impl Into<String>) -> Self {
        Self { quantity_bag: text.into(), ..self }
    }

    pub fn with_quantity_box(self, text: impl Into<String>) -> Self {
        Self { quantity_box: text.into(), ..self }
    }

    pub fn with_additional_colors(self, text: impl Into<String>) -> Self {
        Self { additional_colors: text.into(), ..self }
    }

    /// Add a color swatch. Blank input and colors already present are ignored.
    pub fn with_color(mut self, color: &str) -> Self {
        let color = color.trim();
        if !color.is_empty() && !self.colors.iter().any(|c| c == color) {
            self.colors.push(color.to_string());
        }
        self
    }

    pub fn without_color(mut self, color: &str) -> Self {
        self.colors.retain(|c| c != color);
        self
    }

    pub fn with_featured(self, is_featured: bool) -> Self {
        Self { is_featured, ..self }
    }

    pub fn with_top_product(self, top_products: bool) -> Self {
        Self { top_products, ..self }
    }

    pub fn with_images(self, images: ImageSet) -> Self {
        Self { images, ..self }
    }

    pub fn validate(&self, categories: &[Category]) -> AppResult<ProductFields> {
        let code = required("code", &self.code)?;
        let category_id = self.category_id.ok_or(AppError::MissingField("category_id"))?;
        hierarchy::validate_product_category(categories, category_id)?;

        for color in &self.colors {
            if !is_hex_color(color) {
                return Err(AppError::InvalidColor(color.clone()));
            }
        }

        let ImageSet {
            images,
            primary_image_url,
        } = self.images.clone().validated()?;

        Ok(ProductFields {
            code,
            category_id,
            title_en: required("title_en", &self.title_en)?,
            title_ar: required("title_ar", &self.title_ar)?,
            title_fr: required("title_fr", &self.title_fr)?,
            material_en: required("material_en", &self.material_en)?,
            material_ar: required("material_ar", &self.material_ar)?,
            material_fr: required("material_fr", &self.material_fr)?,
            length: parse_dimension("length", &self.length)?,
            weight: parse_dimension("weight", &self.weight)?,
            diameter: parse_dimension("diameter", &self.diameter)?,
            quantity_bag: parse_quantity("quantity_bag", &self.quantity_bag)?,
            quantity_box: parse_quantity("quantity_box", &self.quantity_box)?,
            images,
            colors: self.colors.clone(),
            additional_colors: parse_quantity("additional_colors", &self.additional_colors)?,
            is_featured: self.is_featured,
            top_products: self.top_products,
            primary_image_url,
        })
    }
}

/// Parse an optional physical dimension. Empty input means "not set".
pub fn parse_dimension(field: &'static str, text: &str) -> AppResult<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AppError::InvalidNumber { field }),
    }
}

/// Parse a required non-negative whole number.
pub fn parse_quantity(field: &'static str, text: &str) -> AppResult<i32> {
    match text.trim().parse::<i32>() {
        Ok(value) if value >= 0 => Ok(value),
        _ => Err(AppError::InvalidQuantity { field }),
    }
}

pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

fn required(field: &'static str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(value.to_string())
}
