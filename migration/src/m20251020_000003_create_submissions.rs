use sea_orm_migration::prelude::*;

use super::{
  m20251020_000001_create_users::Users,
  m20251020_000002_create_challenges::Challenges,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Submissions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Submissions::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Submissions::UserId).big_integer().not_null())
          .col(
            ColumnDef::new(Submissions::ChallengeId).big_integer().not_null(),
          )
          .col(ColumnDef::new(Submissions::ImageUrl).text().not_null())
          .col(
            ColumnDef::new(Submissions::CreatedAt)
              .timestamp_with_time_zone()
              .not_null()
              .default(Expr::current_timestamp()),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_submissions_user")
              .from(Submissions::Table, Submissions::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_submissions_challenge")
              .from(Submissions::Table, Submissions::ChallengeId)
              .to(Challenges::Table, Challenges::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // one photo per user per challenge
    manager
      .create_index(
        Index::create()
          .name("submissions_user_id_challenge_id_key")
          .table(Submissions::Table)
          .col(Submissions::UserId)
          .col(Submissions::ChallengeId)
          .unique()
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_submissions_challenge")
          .table(Submissions::Table)
          .col(Submissions::ChallengeId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Submissions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Submissions {
  Table,
  Id,
  UserId,
  ChallengeId,
  ImageUrl,
  CreatedAt,
}
