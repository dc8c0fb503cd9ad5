use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use password_hash::rand_core::OsRng;
use catalog_admin_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_admin(&orm, "admin@example.com", "admin123").await?;
    seed_categories(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(orm: &DatabaseConnection, email: &str, password: &str) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("Admin {email} already exists");
        return Ok(existing.id);
    }

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
    .insert(orm)
    .await?;

    println!("Created admin {email}");
    Ok(user.id)
}

/// Top-level categories with their subcategories, titles in en/ar/fr.
const TREE: &[((&str, &str, &str), &[(&str, &str, &str)])] = &[
    (
        ("Plastic Bags", "أكياس بلاستيكية", "Sacs en plastique"),
        &[
            ("Shopping Bags", "أكياس تسوق", "Sacs de courses"),
            ("Garbage Bags", "أكياس قمامة", "Sacs poubelle"),
        ],
    ),
    (
        ("Packaging", "تغليف", "Emballage"),
        &[
            ("Stretch Film", "فيلم مطاطي", "Film étirable"),
            ("Food Containers", "حاويات طعام", "Barquettes alimentaires"),
        ],
    ),
];

async fn seed_categories(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for &(parent, children) in TREE {
        let parent_id = ensure_category(orm, parent, None).await?;
        for &child in children {
            ensure_category(orm, child, Some(parent_id)).await?;
        }
    }

    println!("Seeded categories");
    Ok(())
}

async fn ensure_category(
    orm: &DatabaseConnection,
    (en, ar, fr): (&str, &str, &str),
    parent_id: Option<i32>,
) -> anyhow::Result<i32> {
    if let Some(existing) = Categories::find()
        .filter(CategoryCol::TitleEn.eq(en))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let category = CategoryActive {
        id: NotSet,
        title_en: Set(en.to_string()),
        title_ar: Set(ar.to_string()),
        title_fr: Set(fr.to_string()),
        parent_id: Set(parent_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(orm)
    .await?;

    Ok(category.id)
}
