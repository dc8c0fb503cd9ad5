use catalog_admin_api::{
    dto::products::SaveProductRequest,
    error::AppError,
    forms::{CategoryForm, ProductForm, is_hex_color, parse_dimension, parse_quantity},
    images::ImageSet,
    models::Category,
};
use chrono::Utc;

fn category(id: i32, parent_id: Option<i32>) -> Category {
    Category {
        id,
        title_en: format!("Category {id}"),
        title_ar: format!("فئة {id}"),
        title_fr: format!("Catégorie {id}"),
        parent_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn categories() -> Vec<Category> {
    vec![category(1, None), category(2, Some(1))]
}

fn filled_form() -> ProductForm {
    ProductForm::default()
        .with_code("X1")
        .with_category(2)
        .with_titles("Bag", "كيس", "Sac")
        .with_materials("Plastic", "بلاستيك", "Plastique")
        .with_quantity_bag("3")
        .with_quantity_box("12")
        .with_color("#ff0000")
}

#[test]
fn empty_dimension_is_absent_not_zero() {
    assert_eq!(parse_dimension("length", "").unwrap(), None);
    assert_eq!(parse_dimension("length", "   ").unwrap(), None);
    assert_eq!(parse_dimension("length", "0").unwrap(), Some(0.0));
    assert_eq!(parse_dimension("weight", "12.5").unwrap(), Some(12.5));
}

#[test]
fn non_numeric_dimension_is_rejected() {
    let err = parse_dimension("diameter", "wide").unwrap_err();
    assert!(matches!(err, AppError::InvalidNumber { field: "diameter" }));
}

#[test]
fn quantities_must_be_non_negative_integers() {
    assert_eq!(parse_quantity("quantity_bag", " 24 ").unwrap(), 24);
    assert!(matches!(
        parse_quantity("quantity_bag", "abc").unwrap_err(),
        AppError::InvalidQuantity { field: "quantity_bag" }
    ));
    assert!(matches!(
        parse_quantity("quantity_box", "-1").unwrap_err(),
        AppError::InvalidQuantity { field: "quantity_box" }
    ));
    assert!(matches!(
        parse_quantity("quantity_box", "2.5").unwrap_err(),
        AppError::InvalidQuantity { .. }
    ));
}

#[test]
fn hex_colors() {
    assert!(is_hex_color("#ff0000"));
    assert!(is_hex_color("#ABC"));
    assert!(!is_hex_color("ff0000"));
    assert!(!is_hex_color("#ff00"));
    assert!(!is_hex_color("#gg0000"));
}

#[test]
fn colors_are_unique_and_keep_insertion_order() {
    let form = ProductForm::default()
        .with_color("#ff0000")
        .with_color("#00ff00")
        .with_color("#ff0000")
        .with_color("  ")
        .with_color("#0000ff");
    assert_eq!(form.colors, vec!["#ff0000", "#00ff00", "#0000ff"]);

    let form = form.without_color("#00ff00");
    assert_eq!(form.colors, vec!["#ff0000", "#0000ff"]);
}

#[test]
fn transitions_leave_the_original_untouched() {
    let base = filled_form();
    let edited = base.clone().with_code("X2").with_featured(true);
    assert_eq!(base.code, "X1");
    assert!(!base.is_featured);
    assert_eq!(edited.code, "X2");
    assert!(edited.is_featured);
}

#[test]
fn valid_form_produces_full_record() {
    let fields = filled_form().validate(&categories()).expect("valid form");
    assert_eq!(fields.code, "X1");
    assert_eq!(fields.category_id, 2);
    assert_eq!((fields.quantity_bag, fields.quantity_box), (3, 12));
    assert_eq!(fields.colors, vec!["#ff0000"]);
    assert_eq!(fields.length, None);
    assert_eq!(fields.additional_colors, 0);
    assert!(fields.images.is_empty());
    assert_eq!(fields.primary_image_url, None);
    assert!(!fields.is_featured);
}

#[test]
fn top_level_category_is_rejected_for_products() {
    let err = filled_form().with_category(1).validate(&categories()).unwrap_err();
    assert!(matches!(err, AppError::InvalidCategoryReference(_)));
}

#[test]
fn missing_category_and_blank_code_are_rejected() {
    let mut form = filled_form();
    form.category_id = None;
    assert!(matches!(
        form.validate(&categories()).unwrap_err(),
        AppError::MissingField("category_id")
    ));

    let err = filled_form().with_code("  ").validate(&categories()).unwrap_err();
    assert!(matches!(err, AppError::MissingField("code")));
}

#[test]
fn invalid_quantity_fails_validation() {
    let err = filled_form()
        .with_quantity_box("a dozen")
        .validate(&categories())
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidQuantity { field: "quantity_box" }));
}

#[test]
fn bad_color_fails_validation() {
    let err = filled_form().with_color("red").validate(&categories()).unwrap_err();
    assert!(matches!(err, AppError::InvalidColor(c) if c == "red"));
}

#[test]
fn primary_is_cleared_when_no_images_remain() {
    let images = ImageSet {
        images: Vec::new(),
        primary_image_url: Some("http://media/a.png".into()),
    };
    let fields = filled_form()
        .with_images(images)
        .validate(&categories())
        .expect("valid form");
    assert_eq!(fields.primary_image_url, None);
}

#[test]
fn primary_outside_the_image_list_is_rejected() {
    let images = ImageSet {
        images: vec!["http://media/a.png".into()],
        primary_image_url: Some("http://elsewhere/zzz.png".into()),
    };
    let err = filled_form()
        .with_images(images)
        .validate(&categories())
        .unwrap_err();
    assert!(matches!(err, AppError::ImageNotInSet(url) if url == "http://elsewhere/zzz.png"));

    let images = ImageSet::new(
        vec!["http://media/a.png".into(), "http://media/b.png".into()],
        Some("http://media/b.png".into()),
    );
    let fields = filled_form()
        .with_images(images)
        .validate(&categories())
        .expect("valid form");
    assert_eq!(fields.primary_image_url.as_deref(), Some("http://media/b.png"));
}

#[test]
fn edited_category_round_trips_through_its_form() {
    let sub = category(2, Some(1));
    let fields = CategoryForm::from_category(&sub)
        .with_title_en("Shopping bags")
        .validate(&categories(), Some(2))
        .expect("valid edit");
    assert_eq!(fields.title_en, "Shopping bags");
    assert_eq!(fields.title_ar, sub.title_ar);
    assert_eq!(fields.title_fr, sub.title_fr);
    assert_eq!(fields.parent_id, Some(1));
}

#[test]
fn category_form_requires_all_titles() {
    let form = CategoryForm::default()
        .with_title_en("Bags")
        .with_title_ar("أكياس");
    let err = form.validate(&categories(), None).unwrap_err();
    assert!(matches!(err, AppError::MissingField("title_fr")));

    let fields = form
        .with_title_fr("Sacs")
        .with_parent(Some(1))
        .validate(&categories(), None)
        .expect("valid category");
    assert_eq!(fields.parent_id, Some(1));
}

#[test]
fn category_form_rejects_subcategory_parent() {
    let err = CategoryForm::default()
        .with_title_en("Deep")
        .with_title_ar("عميق")
        .with_title_fr("Profond")
        .with_parent(Some(2))
        .validate(&categories(), None)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));
}

#[test]
fn request_accepts_numbers_or_typed_text() {
    let payload: SaveProductRequest = serde_json::from_value(serde_json::json!({
        "code": "X1",
        "category_id": 2,
        "title_en": "Bag",
        "title_ar": "كيس",
        "title_fr": "Sac",
        "material_en": "Plastic",
        "material_ar": "بلاستيك",
        "material_fr": "Plastique",
        "length": "",
        "weight": 1.5,
        "diameter": "30",
        "quantity_bag": 3,
        "quantity_box": "12",
        "colors": ["#ff0000", "#ff0000"],
        "images": ["http://media/a.png"],
        "primary_image_url": "http://media/a.png"
    }))
    .expect("payload");

    let fields = payload.into_form().validate(&categories()).expect("valid");
    assert_eq!(fields.length, None);
    assert_eq!(fields.weight, Some(1.5));
    assert_eq!(fields.diameter, Some(30.0));
    assert_eq!((fields.quantity_bag, fields.quantity_box), (3, 12));
    assert_eq!(fields.colors, vec!["#ff0000"]);
    assert_eq!(fields.images, vec!["http://media/a.png"]);
    assert_eq!(fields.primary_image_url.as_deref(), Some("http://media/a.png"));
}
