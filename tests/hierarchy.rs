use catalog_admin_api::{
    error::AppError,
    hierarchy::{
        UNKNOWN_CATEGORY_LABEL, category_label, parent_options, promotes_to_top_level,
        subcategory_options, validate_parent, validate_product_category, validate_promotion,
    },
    models::Category,
};
use chrono::Utc;

fn category(id: i32, title: &str, parent_id: Option<i32>) -> Category {
    Category {
        id,
        title_en: title.into(),
        title_ar: format!("{title} (ar)"),
        title_fr: format!("{title} (fr)"),
        parent_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// 1 Bags -> 2 Shopping, 3 Garbage; 4 Packaging (no children)
fn tree() -> Vec<Category> {
    vec![
        category(1, "Bags", None),
        category(2, "Shopping", Some(1)),
        category(3, "Garbage", Some(1)),
        category(4, "Packaging", None),
    ]
}

#[test]
fn parent_options_are_top_level_and_exclude_the_edited_category() {
    let categories = tree();

    let ids: Vec<i32> = parent_options(&categories, None).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 4]);

    let ids: Vec<i32> = parent_options(&categories, Some(4)).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn subcategory_options_only_lists_children() {
    let ids: Vec<i32> = subcategory_options(&tree()).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn no_parent_is_always_valid() {
    assert!(validate_parent(&tree(), None, None).is_ok());
    assert!(validate_parent(&tree(), Some(2), None).is_ok());
}

#[test]
fn category_cannot_be_its_own_parent() {
    let err = validate_parent(&tree(), Some(4), Some(4)).unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));
}

#[test]
fn subcategory_cannot_be_a_parent() {
    // Creating C under B where B already sits under A.
    let err = validate_parent(&tree(), None, Some(2)).unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));
}

#[test]
fn missing_parent_is_rejected() {
    let err = validate_parent(&tree(), None, Some(99)).unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));
}

#[test]
fn category_with_children_must_stay_top_level() {
    let err = validate_parent(&tree(), Some(1), Some(4)).unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));

    // A childless top-level category may move under another one.
    assert!(validate_parent(&tree(), Some(4), Some(1)).is_ok());
}

#[test]
fn products_must_use_a_subcategory() {
    let categories = tree();
    assert!(validate_product_category(&categories, 2).is_ok());

    let err = validate_product_category(&categories, 1).unwrap_err();
    assert!(matches!(err, AppError::InvalidCategoryReference(_)));

    let err = validate_product_category(&categories, 42).unwrap_err();
    assert!(matches!(err, AppError::InvalidCategoryReference(_)));
}

#[test]
fn unresolved_category_label_falls_back_to_unknown() {
    let categories = tree();
    assert_eq!(category_label(&categories, 3), "Garbage");
    assert_eq!(category_label(&categories, 77), UNKNOWN_CATEGORY_LABEL);
    assert_eq!(UNKNOWN_CATEGORY_LABEL, "Unknown");
}

#[test]
fn only_a_subcategory_losing_its_parent_counts_as_promotion() {
    let categories = tree();

    assert!(promotes_to_top_level(&categories, 2, None));
    assert!(!promotes_to_top_level(&categories, 2, Some(4)));
    assert!(!promotes_to_top_level(&categories, 1, None));
    assert!(!promotes_to_top_level(&categories, 99, None));
}

#[test]
fn subcategory_with_products_cannot_become_top_level() {
    let err = validate_promotion(2, 3).unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));

    assert!(validate_promotion(3, 0).is_ok());
}
