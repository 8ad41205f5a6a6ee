use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};

use crate::{
  model::*,
  prelude::*,
  state::AppState,
};

pub async fn root() -> Json<json::Value> {
  Json(json::json!({
    "message": "Brand Challenge API",
    "version": env!("CARGO_PKG_VERSION"),
    "status": "running",
    "health": "/health",
  }))
}

pub async fn health(
  State(app): State<Arc<AppState>>,
) -> Result<Json<json::Value>> {
  app.db.ping().await.map_err(|err| Error::Unavailable(err.to_string()))?;

  Ok(Json(json::json!({
    "status": "healthy",
    "database": "connected",
    "environment": app.config.environment,
    "timestamp": Utc::now(),
  })))
}

pub async fn login(
  State(app): State<Arc<AppState>>,
  Json(req): Json<LoginReq>,
) -> Result<Json<UserRes>> {
  let user = app.sv().user.login(req).await?;
  Ok(Json(user.into()))
}

pub async fn link_wallet(
  State(app): State<Arc<AppState>>,
  Json(req): Json<WalletReq>,
) -> Result<Json<WalletRes>> {
  app.sv().user.link_wallet(req.telegram_id, &req.wallet_address).await?;

  Ok(Json(WalletRes {
    message: String::from("Wallet linked successfully"),
    wallet_address: req.wallet_address,
  }))
}

pub async fn challenges(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<ChallengeRes>>> {
  let challenges = app.sv().challenge.active().await?;
  Ok(Json(challenges.into_iter().map(Into::into).collect()))
}

pub async fn challenge(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> Result<Json<ChallengeRes>> {
  Ok(Json(app.sv().challenge.by_id(id).await?.into()))
}

pub async fn submit(
  State(app): State<Arc<AppState>>,
  Json(req): Json<SubmissionReq>,
) -> Result<(StatusCode, Json<SubmissionRes>)> {
  let submission = app
    .sv()
    .submission
    .create(req.telegram_id, req.challenge_id, req.image_url)
    .await?;

  Ok((StatusCode::CREATED, Json(submission.into())))
}

pub async fn user_submissions(
  State(app): State<Arc<AppState>>,
  Path(telegram_id): Path<i64>,
) -> Result<Json<Vec<UserSubmission>>> {
  Ok(Json(app.sv().submission.history(telegram_id).await?))
}

pub async fn leaderboard(
  State(app): State<Arc<AppState>>,
  Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
  let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
  Ok(Json(app.sv().stats.leaderboard(limit).await?))
}

pub async fn stats(State(app): State<Arc<AppState>>) -> Result<Json<Overview>> {
  Ok(Json(app.sv().stats.overview().await?))
}
