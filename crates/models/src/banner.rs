use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::{Expr, StringLen}, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Publication state of a banner. At most one row may be `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BannerStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[default]
    #[sea_orm(string_value = "Draft")]
    Draft,
}

impl BannerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerStatus::Active => "Active",
            BannerStatus::Draft => "Draft",
        }
    }

    /// Parse the wire form (`"Active"` / `"Draft"`).
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.trim() {
            "Active" => Ok(BannerStatus::Active),
            "Draft" => Ok(BannerStatus::Draft),
            other => Err(ModelError::Validation(format!("status must be Active or Draft, got `{other}`"))),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BannerStatus::Active)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub link: String,
    pub status: BannerStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Trim and require a non-empty value.
pub fn validate_required(field: &str, value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(v.to_string())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    title: &str,
    image: &str,
    link: &str,
    status: BannerStatus,
) -> Result<Model, ModelError> {
    let title = validate_required("title", title)?;
    let image = validate_required("image", image)?;
    let link = validate_required("link", link)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        image: Set(image),
        link: Set(link),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Apply the supplied fields to an existing row; omitted fields stay as they are.
pub async fn update_fields<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    title: Option<&str>,
    image: Option<&str>,
    link: Option<&str>,
    status: Option<BannerStatus>,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    if let Some(t) = title { am.title = Set(validate_required("title", t)?); }
    if let Some(i) = image { am.image = Set(validate_required("image", i)?); }
    if let Some(l) = link { am.link = Set(validate_required("link", l)?); }
    if let Some(s) = status { am.status = Set(s); }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

/// Set-based demotion of every `Active` row (optionally sparing `except`) to `Draft`.
/// Returns the number of rows demoted.
pub async fn demote_active<C: ConnectionTrait>(db: &C, except: Option<Uuid>) -> Result<u64, ModelError> {
    let mut query = Entity::update_many()
        .col_expr(Column::Status, Expr::value(BannerStatus::Draft.to_value()))
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::Status.eq(BannerStatus::Active));
    if let Some(id) = except {
        query = query.filter(Column::Id.ne(id));
    }
    let res = query.exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Status.eq(BannerStatus::Active))
        .order_by_desc(Column::UpdatedAt)
        .one(db)
        .await?)
}

/// All banners in insertion order.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Hard delete; `false` when no row matched.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
