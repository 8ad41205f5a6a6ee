use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Users::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Users::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Users::TelegramId)
              .big_integer()
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(Users::Username).text().null())
          .col(ColumnDef::new(Users::FirstName).text().null())
          .col(ColumnDef::new(Users::LastName).text().null())
          .col(ColumnDef::new(Users::PhotoUrl).text().null())
          .col(ColumnDef::new(Users::WalletAddress).text().null())
          .col(
            ColumnDef::new(Users::CreatedAt)
              .timestamp_with_time_zone()
              .not_null()
              .default(Expr::current_timestamp()),
          )
          .col(
            ColumnDef::new(Users::UpdatedAt)
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
          .name("idx_users_telegram_id")
          .table(Users::Table)
          .col(Users::TelegramId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Users {
  Table,
  Id,
  TelegramId,
  Username,
  FirstName,
  LastName,
  PhotoUrl,
  WalletAddress,
  CreatedAt,
  UpdatedAt,
}
