use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Challenges::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Challenges::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Challenges::Title).text().not_null())
          .col(ColumnDef::new(Challenges::Description).text().not_null())
          .col(ColumnDef::new(Challenges::ImageUrl).text().not_null())
          .col(ColumnDef::new(Challenges::RewardInfo).text().not_null())
          .col(
            ColumnDef::new(Challenges::Deadline)
              .timestamp_with_time_zone()
              .not_null(),
          )
          .col(
            ColumnDef::new(Challenges::Status)
              .text()
              .not_null()
              .default("active")
              .check(Expr::col(Challenges::Status).is_in(["active", "expired"])),
          )
          .col(
            ColumnDef::new(Challenges::CreatedAt)
              .timestamp_with_time_zone()
              .not_null()
              .default(Expr::current_timestamp()),
          )
          .col(
            ColumnDef::new(Challenges::UpdatedAt)
              .timestamp_with_time_zone()
              .not_null()
              .default(Expr::current_timestamp()),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_challenges_status")
          .table(Challenges::Table)
          .col(Challenges::Status)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_challenges_deadline")
          .table(Challenges::Table)
          .col(Challenges::Deadline)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Challenges::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Challenges {
  Table,
  Id,
  Title,
  Description,
  ImageUrl,
  RewardInfo,
  Deadline,
  Status,
  CreatedAt,
  UpdatedAt,
}
