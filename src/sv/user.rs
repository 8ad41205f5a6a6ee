use sea_orm::sea_query::{Expr, OnConflict};

use crate::{entity::user, model::LoginReq, prelude::*};

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Registers the Telegram user or refreshes their profile.
  ///
  /// A single `INSERT .. ON CONFLICT (telegram_id) DO UPDATE` decides between
  /// both paths, so concurrent logins never produce two rows. The wallet
  /// address and the creation time are left as they are.
  pub async fn login(&self, req: LoginReq) -> Result<user::Model> {
    let now = Utc::now();
    let txn = self.db.begin().await?;

    let user = user::ActiveModel {
      id: NotSet,
      telegram_id: Set(req.telegram_id),
      username: Set(req.username),
      first_name: Set(req.first_name),
      last_name: Set(req.last_name),
      photo_url: Set(req.photo_url),
      wallet_address: Set(None),
      created_at: Set(now),
      updated_at: Set(now),
    };

    user::Entity::insert(user)
      .on_conflict(
        OnConflict::column(user::Column::TelegramId)
          .update_columns([
            user::Column::Username,
            user::Column::FirstName,
            user::Column::LastName,
            user::Column::PhotoUrl,
            user::Column::UpdatedAt,
          ])
          .to_owned(),
      )
      .exec_without_returning(&txn)
      .await?;

    let user = user::Entity::find()
      .filter(user::Column::TelegramId.eq(req.telegram_id))
      .one(&txn)
      .await?
      .ok_or_else(|| Error::Internal("Upserted user vanished".into()))?;

    txn.commit().await?;

    debug!(user_id = user.id, telegram_id = user.telegram_id, "User logged in");
    Ok(user)
  }

  pub async fn link_wallet(
    &self,
    telegram_id: i64,
    wallet_address: &str,
  ) -> Result<()> {
    let res = user::Entity::update_many()
      .col_expr(user::Column::WalletAddress, Expr::value(wallet_address))
      .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
      .filter(user::Column::TelegramId.eq(telegram_id))
      .exec(self.db)
      .await?;

    if res.rows_affected == 0 {
      return Err(Error::UserNotFound);
    }

    info!(telegram_id, "Wallet linked");
    Ok(())
  }

  pub async fn by_telegram_id(
    &self,
    telegram_id: i64,
  ) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::TelegramId.eq(telegram_id))
      .one(self.db)
      .await?;
    Ok(user)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(user::Entity::find().count(self.db).await?)
  }
}
