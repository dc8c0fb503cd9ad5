//! Two-level category hierarchy rules.
//!
//! Categories are either top-level or subcategories of a top-level category.
//! Products may only be filed under subcategories.

use crate::{error::AppError, models::Category};

/// Label shown for a product whose category cannot be resolved.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// Categories that may be chosen as parent when creating or editing `editing_id`.
pub fn parent_options(categories: &[Category], editing_id: Option<i32>) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| c.is_top_level() && Some(c.id) != editing_id)
        .cloned()
        .collect()
}

/// Categories a product may be assigned to.
pub fn subcategory_options(categories: &[Category]) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| c.is_subcategory())
        .cloned()
        .collect()
}

/// Check that `parent_id` is a valid parent for the category `editing_id`
/// (`None` when creating).
pub fn validate_parent(
    categories: &[Category],
    editing_id: Option<i32>,
    parent_id: Option<i32>,
) -> Result<(), AppError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    if Some(parent_id) == editing_id {
        return Err(AppError::InvalidParentReference(
            "a category cannot be its own parent".into(),
        ));
    }

    let parent = categories
        .iter()
        .find(|c| c.id == parent_id)
        .ok_or_else(|| {
            AppError::InvalidParentReference(format!("category {parent_id} does not exist"))
        })?;

    if parent.is_subcategory() {
        return Err(AppError::InvalidParentReference(format!(
            "category {parent_id} is already a subcategory"
        )));
    }

    if let Some(id) = editing_id {
        if categories.iter().any(|c| c.parent_id == Some(id)) {
            return Err(AppError::InvalidParentReference(format!(
                "category {id} has subcategories and must stay top-level"
            )));
        }
    }

    Ok(())
}

/// True when saving `editing_id` with `parent_id` turns an existing
/// subcategory into a top-level category.
pub fn promotes_to_top_level(
    categories: &[Category],
    editing_id: i32,
    parent_id: Option<i32>,
) -> bool {
    parent_id.is_none()
        && categories
            .iter()
            .any(|c| c.id == editing_id && c.is_subcategory())
}

/// A subcategory that still holds products must keep a parent, otherwise
/// those products would end up filed under a top-level category.
pub fn validate_promotion(category_id: i32, product_count: u64) -> Result<(), AppError> {
    if product_count > 0 {
        return Err(AppError::InvalidParentReference(format!(
            "category {category_id} still has {product_count} product(s) and must stay a subcategory"
        )));
    }
    Ok(())
}

/// Check that a product's `category_id` names an existing subcategory.
pub fn validate_product_category(categories: &[Category], category_id: i32) -> Result<(), AppError> {
    match categories.iter().find(|c| c.id == category_id) {
        None => Err(AppError::InvalidCategoryReference(format!(
            "category {category_id} does not exist"
        ))),
        Some(c) if c.is_top_level() => Err(AppError::InvalidCategoryReference(format!(
            "category {category_id} is top-level; choose a subcategory"
        ))),
        Some(_) => Ok(()),
    }
}

pub fn category_label(categories: &[Category], category_id: i32) -> String {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.title_en.clone())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_string())
}
