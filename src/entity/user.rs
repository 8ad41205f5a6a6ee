//! User entity - Telegram identity and linked wallet

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::submission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  #[sea_orm(unique)]
  pub telegram_id: i64,
  pub username: Option<String>,
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub photo_url: Option<String>,
  pub wallet_address: Option<String>,
  pub created_at: DateTimeUtc,
  pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "submission::Entity")]
  Submissions,
}

impl Related<submission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Submissions.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
