//! Request and response shapes of the HTTP API
//!
//! Field names here are the public contract and stay stable even when the
//! underlying columns change.

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entity::{Status, challenge, submission, user};

pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct LoginReq {
  pub telegram_id: i64,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name: Option<String>,
  #[serde(default)]
  pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRes {
  pub id: i64,
  pub telegram_id: i64,
  pub username: Option<String>,
  pub wallet_address: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserRes {
  fn from(user: user::Model) -> Self {
    Self {
      id: user.id,
      telegram_id: user.telegram_id,
      username: user.username,
      wallet_address: user.wallet_address,
      created_at: user.created_at,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct WalletReq {
  pub telegram_id: i64,
  pub wallet_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletRes {
  pub message: String,
  pub wallet_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeRes {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub image_url: String,
  pub reward_info: String,
  pub deadline: DateTime<Utc>,
  pub status: Status,
}

impl From<challenge::Model> for ChallengeRes {
  fn from(challenge: challenge::Model) -> Self {
    Self {
      id: challenge.id,
      title: challenge.title,
      description: challenge.description,
      image_url: challenge.image_url,
      reward_info: challenge.reward_info,
      deadline: challenge.deadline,
      status: challenge.status,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct SubmissionReq {
  pub telegram_id: i64,
  pub challenge_id: i64,
  pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionRes {
  pub id: i64,
  pub user_id: i64,
  pub challenge_id: i64,
  pub image_url: String,
  pub created_at: DateTime<Utc>,
}

impl From<submission::Model> for SubmissionRes {
  fn from(submission: submission::Model) -> Self {
    Self {
      id: submission.id,
      user_id: submission.user_id,
      challenge_id: submission.challenge_id,
      image_url: submission.image_url,
      created_at: submission.created_at,
    }
  }
}

/// Submission joined with the title of its challenge
#[derive(Debug, Serialize, Deserialize, FromQueryResult)]
pub struct UserSubmission {
  pub id: i64,
  pub challenge_id: i64,
  pub challenge_title: String,
  pub image_url: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
  pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, FromQueryResult)]
pub struct LeaderboardEntry {
  pub username: Option<String>,
  pub first_name: Option<String>,
  pub photo_url: Option<String>,
  pub submission_count: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Overview {
  pub total_users: u64,
  pub active_challenges: u64,
  pub total_submissions: u64,
}
