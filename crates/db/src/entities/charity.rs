//! Charity entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "charity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The charity admin who registered and runs this charity.
    pub owner_user_id: String,

    #[sea_orm(unique)]
    pub name: String,

    /// Mission statement shown on the charity page.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Has platform staff verified the charity's registration papers?
    #[sea_orm(default_value = false)]
    pub is_verified: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
