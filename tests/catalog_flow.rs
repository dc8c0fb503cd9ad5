use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use password_hash::rand_core::OsRng;
use catalog_admin_api::{
    db::{create_orm_conn, run_migrations},
    dto::{auth::SignInRequest, categories::SaveCategoryRequest, products::SaveProductRequest},
    entity::users::ActiveModel as UserActive,
    error::AppError,
    gate::{AuthGate, SessionEvents},
    images::ImageSet,
    middleware::auth::AuthUser,
    services::{auth_service, category_service, dashboard_service, product_service},
    state::AppState,
    storage::MemoryObjectStore,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: build a two-level tree, save and re-read a product,
// check counts, delete everything again, then sign in.
#[tokio::test]
async fn catalog_lifecycle_and_sign_in() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let admin = create_admin(&state, "admin@example.com", "secret-pass").await?;

    // A (top-level) -> B (subcategory); C under B is refused.
    let a = category_service::save_category(&state, &admin, None, category_request("A", None))
        .await?
        .data
        .unwrap();
    let b = category_service::save_category(&state, &admin, None, category_request("B", Some(a.id)))
        .await?
        .data
        .unwrap();
    let err = category_service::save_category(&state, &admin, None, category_request("C", Some(b.id)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));

    let options = category_service::parent_options(&state, None).await?.data.unwrap();
    assert!(options.items.iter().all(|c| c.id != b.id));

    // Round trip a product.
    let created = product_service::save_product(&state, &admin, None, product_request("X1", b.id))
        .await?
        .data
        .unwrap();
    let fetched = product_service::get_product(&state, created.id).await?.data.unwrap();
    assert_eq!(fetched.code, "X1");
    assert_eq!(fetched.category_id, b.id);
    assert_eq!((fetched.quantity_bag, fetched.quantity_box), (3, 12));
    assert_eq!(fetched.colors, vec!["#ff0000"]);
    assert!(fetched.images.is_empty());
    assert!(!fetched.is_featured);
    assert_eq!(fetched.length, None);
    assert_eq!(fetched.primary_image_url, None);

    // Products cannot sit under a top-level category.
    let err = product_service::save_product(&state, &admin, None, product_request("X2", a.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCategoryReference(_)));

    // B holds a product, so it cannot be edited into a top-level category.
    let err = category_service::save_category(&state, &admin, Some(b.id), category_request("B", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidParentReference(_)));
    let still_sub = category_service::get_category(&state, b.id).await?.data.unwrap();
    assert_eq!(still_sub.parent_id, Some(a.id));

    // A staged primary that is not one of the images is refused.
    let mut stray = product_request("X1", b.id);
    stray.images = ImageSet {
        images: vec!["http://localhost:3000/media/a.png".into()],
        primary_image_url: Some("http://elsewhere/zzz.png".into()),
    };
    let err = product_service::save_product(&state, &admin, Some(created.id), stray)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ImageNotInSet(_)));

    // Full overwrite on edit.
    let mut edit = product_request("X1", b.id);
    edit.is_featured = true;
    let updated = product_service::save_product(&state, &admin, Some(created.id), edit)
        .await?
        .data
        .unwrap();
    assert!(updated.is_featured);
    assert_eq!(updated.id, created.id);

    let rows = product_service::list_products(&state).await?.data.unwrap();
    assert_eq!(rows.items.len(), 1);
    assert_eq!(rows.items[0].category_label, "B");

    let stats = dashboard_service::overview(&state).await.data.unwrap();
    assert_eq!(stats.total_categories, 2);
    assert_eq!(stats.total_products, 1);
    assert_eq!(stats.featured_products, 1);
    assert_eq!(stats.top_products, 0);

    // Deletes need confirmation.
    let err = product_service::delete_product(&state, &admin, created.id, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ConfirmationRequired));
    product_service::delete_product(&state, &admin, created.id, true).await?;
    let rows = product_service::list_products(&state).await?.data.unwrap();
    assert!(rows.items.is_empty());

    category_service::delete_category(&state, &admin, b.id, true).await?;
    let categories = category_service::list_categories(&state).await?.data.unwrap();
    assert_eq!(categories.items.len(), 1);
    assert_eq!(categories.items[0].id, a.id);

    sign_in_checks(&state).await
}

async fn sign_in_checks(state: &AppState) -> anyhow::Result<()> {
    create_admin(state, "owner@example.com", "correct horse").await?;

    let err = auth_service::sign_in(state, sign_in("owner@example.com", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MissingCredentials));

    let err = auth_service::sign_in(state, sign_in("owner@example.com", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthFailed(ref m) if m == "Invalid login credentials"));

    let (mut gate, _) = AuthGate::mount(&state.sessions, None);
    let resp = auth_service::sign_in(state, sign_in("owner@example.com", "correct horse"))
        .await?
        .data
        .unwrap();
    assert_eq!(resp.redirect_to, "/dashboard");
    assert_eq!(gate.next_redirect().await, Some("/dashboard"));

    let status = auth_service::session_status(state, Some(resp.session.access_token.as_str()))
        .data
        .unwrap();
    assert_eq!(status.session.map(|s| s.email).as_deref(), Some("owner@example.com"));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE audit_logs, products, categories, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState {
        orm,
        storage: Arc::new(MemoryObjectStore::new("http://localhost:3000/media")),
        sessions: SessionEvents::default(),
        jwt_secret: "test-secret".into(),
    })
}

async fn create_admin(state: &AppState, email: &str, password: &str) -> anyhow::Result<AuthUser> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        role: Set("admin".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
    })
}

fn category_request(title: &str, parent_id: Option<i32>) -> SaveCategoryRequest {
    SaveCategoryRequest {
        title_en: title.into(),
        title_ar: format!("{title}-ar"),
        title_fr: format!("{title}-fr"),
        parent_id,
    }
}

fn product_request(code: &str, category_id: i32) -> SaveProductRequest {
    serde_json::from_value(serde_json::json!({
        "code": code,
        "category_id": category_id,
        "title_en": "Bag",
        "title_ar": "كيس",
        "title_fr": "Sac",
        "material_en": "Plastic",
        "material_ar": "بلاستيك",
        "material_fr": "Plastique",
        "quantity_bag": 3,
        "quantity_box": 12,
        "colors": ["#ff0000"],
        "images": [],
        "is_featured": false
    }))
    .expect("product request")
}

fn sign_in(email: &str, password: &str) -> SignInRequest {
    SignInRequest {
        email: email.into(),
        password: password.into(),
    }
}
