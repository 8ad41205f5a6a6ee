//! Submission entity - one photo per user per challenge

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{challenge, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub user_id: i64,
  pub challenge_id: i64,
  pub image_url: String,
  pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "user::Entity",
    from = "Column::UserId",
    to = "user::Column::Id",
    on_delete = "Cascade"
  )]
  User,
  #[sea_orm(
    belongs_to = "challenge::Entity",
    from = "Column::ChallengeId",
    to = "challenge::Column::Id",
    on_delete = "Cascade"
  )]
  Challenge,
}

impl Related<user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<challenge::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Challenge.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
