use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
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
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
