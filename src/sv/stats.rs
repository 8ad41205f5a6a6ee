use sea_orm::sea_query::Expr;

use crate::{
  entity::{submission, user},
  model::{LeaderboardEntry, Overview},
  prelude::*,
  sv,
};

pub struct Stats<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Stats<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Users ranked by submission count, earlier accounts first on ties.
  ///
  /// Users without submissions take part with a count of zero.
  pub async fn leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
    let entries = user::Entity::find()
      .select_only()
      .column(user::Column::Username)
      .column(user::Column::FirstName)
      .column(user::Column::PhotoUrl)
      .column_as(
        Expr::col((submission::Entity, submission::Column::Id)).count(),
        "submission_count",
      )
      .left_join(submission::Entity)
      .group_by(user::Column::Id)
      .group_by(user::Column::Username)
      .group_by(user::Column::FirstName)
      .group_by(user::Column::PhotoUrl)
      .group_by(user::Column::CreatedAt)
      .order_by_desc(Expr::cust("submission_count"))
      .order_by_asc(user::Column::CreatedAt)
      .limit(limit)
      .into_model::<LeaderboardEntry>()
      .all(self.db)
      .await?;

    Ok(entries)
  }

  pub async fn overview(&self) -> Result<Overview> {
    Ok(Overview {
      total_users: sv::User::new(self.db).count().await?,
      active_challenges: sv::Challenge::new(self.db).count_active().await?,
      total_submissions: sv::Submission::new(self.db).count().await?,
    })
  }
}
