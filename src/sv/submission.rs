use sea_orm::{DbErr, JoinType, RelationTrait, SqlErr};

use crate::{
  entity::{challenge, submission, user},
  model::UserSubmission,
  prelude::*,
  sv,
};

pub struct Submission<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Submission<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Stores the user's single photo for a challenge.
  ///
  /// The lookup of an existing row only gives a friendlier early error, the
  /// `(user_id, challenge_id)` unique index is what rejects a second row when
  /// two requests race past it. Challenge status and deadline are not checked.
  pub async fn create(
    &self,
    telegram_id: i64,
    challenge_id: i64,
    image_url: String,
  ) -> Result<submission::Model> {
    let txn = self.db.begin().await?;

    let user = user::Entity::find()
      .filter(user::Column::TelegramId.eq(telegram_id))
      .one(&txn)
      .await?
      .ok_or(Submit::Unregistered)?;

    let existing = submission::Entity::find()
      .filter(submission::Column::UserId.eq(user.id))
      .filter(submission::Column::ChallengeId.eq(challenge_id))
      .one(&txn)
      .await?;

    if existing.is_some() {
      return Err(Submit::Duplicate.into());
    }

    let submission = Self::insert(&txn, user.id, challenge_id, image_url).await?;
    txn.commit().await?;

    info!(
      submission_id = submission.id,
      user_id = user.id,
      challenge_id,
      "Photo submitted"
    );
    Ok(submission)
  }

  pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    challenge_id: i64,
    image_url: String,
  ) -> Result<submission::Model> {
    submission::ActiveModel {
      id: NotSet,
      user_id: Set(user_id),
      challenge_id: Set(challenge_id),
      image_url: Set(image_url),
      created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
    .map_err(duplicate_or)
  }

  /// Every submission of the user with its challenge title, newest first.
  pub async fn history(&self, telegram_id: i64) -> Result<Vec<UserSubmission>> {
    let user = sv::User::new(self.db)
      .by_telegram_id(telegram_id)
      .await?
      .ok_or(Error::UserNotFound)?;

    let submissions = submission::Entity::find()
      .select_only()
      .column(submission::Column::Id)
      .column(submission::Column::ChallengeId)
      .column_as(challenge::Column::Title, "challenge_title")
      .column(submission::Column::ImageUrl)
      .column(submission::Column::CreatedAt)
      .join(JoinType::InnerJoin, submission::Relation::Challenge.def())
      .filter(submission::Column::UserId.eq(user.id))
      .order_by_desc(submission::Column::CreatedAt)
      .order_by_desc(submission::Column::Id)
      .into_model::<UserSubmission>()
      .all(self.db)
      .await?;

    Ok(submissions)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(submission::Entity::find().count(self.db).await?)
  }
}

fn duplicate_or(err: DbErr) -> Error {
  match err.sql_err() {
    Some(SqlErr::UniqueConstraintViolation(_)) => Submit::Duplicate.into(),
    _ => err.into(),
  }
}
