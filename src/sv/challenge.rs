use crate::{
  entity::{Status, challenge},
  prelude::*,
};

pub struct Challenge<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Challenge<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Active challenges whose deadline is still ahead, soonest first.
  pub async fn active(&self) -> Result<Vec<challenge::Model>> {
    let challenges = challenge::Entity::find()
      .filter(challenge::Column::Status.eq(Status::Active))
      .filter(challenge::Column::Deadline.gt(Utc::now()))
      .order_by_asc(challenge::Column::Deadline)
      .all(self.db)
      .await?;
    Ok(challenges)
  }

  /// Any challenge by id, expired ones included.
  pub async fn by_id(&self, id: i64) -> Result<challenge::Model> {
    challenge::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ChallengeNotFound)
  }

  // status only, the deadline is not checked here
  pub async fn count_active(&self) -> Result<u64> {
    let count = challenge::Entity::find()
      .filter(challenge::Column::Status.eq(Status::Active))
      .count(self.db)
      .await?;
    Ok(count)
  }
}
