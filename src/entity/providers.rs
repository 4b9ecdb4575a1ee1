use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "providers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub service: String,
    pub experience: Option<String>,
    pub hourly_rate: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub total_jobs: i64,
    pub completed_jobs: i64,
    pub earnings: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub id_proofs: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub certificates: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub work_photos: Json,
    pub created_at: DateTimeWithTimeZone,
}

// Declares the users FK for schemas built from the entity.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl ActiveModelBehavior for ActiveModel {}
