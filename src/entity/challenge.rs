//! Challenge entity - time-bounded brand challenges

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::submission;

#[derive(
  Clone,
  Copy,
  Debug,
  PartialEq,
  Eq,
  EnumIter,
  DeriveActiveEnum,
  Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Status {
  #[sea_orm(string_value = "active")]
  Active,
  #[sea_orm(string_value = "expired")]
  Expired,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub title: String,
  pub description: String,
  pub image_url: String,
  pub reward_info: String,
  pub deadline: DateTimeUtc,
  pub status: Status,
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
