//! Federated identities of a user
//!
//! One row per user; each provider occupies a nullable id/display-name pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_auths")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    pub certificate_serial: Option<String>,
    pub facebook_id: Option<String>,
    pub facebook_display_name: Option<String>,
    pub linkedin_id: Option<String>,
    pub linkedin_display_name: Option<String>,
    pub google_id: Option<String>,
    pub google_display_name: Option<String>,
    pub github_id: Option<String>,
    pub github_display_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
