pub mod challenge;
pub mod stats;
pub mod submission;
pub mod user;

pub use challenge::Challenge;
pub use stats::Stats;
pub use submission::Submission;
pub use user::User;

#[cfg(test)]
pub(crate) mod testing {
  use chrono::TimeDelta;

  use crate::{
    entity::{Status, challenge},
    prelude::*,
  };

  pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
  }

  pub async fn insert_challenge(
    db: &DatabaseConnection,
    title: &str,
    status: Status,
    deadline_in: TimeDelta,
  ) -> challenge::Model {
    let now = Utc::now();
    challenge::ActiveModel {
      id: NotSet,
      title: Set(title.to_string()),
      description: Set(format!("{title} description")),
      image_url: Set(format!("https://cdn.example.com/{title}.jpg")),
      reward_info: Set(String::from("10 TON")),
      deadline: Set(now + deadline_in),
      status: Set(status),
      created_at: Set(now),
      updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
  }
}
