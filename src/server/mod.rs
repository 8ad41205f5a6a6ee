mod handlers;

use std::net::SocketAddr;

use axum::{
  Router,
  http::{HeaderValue, header},
  routing::{get, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  set_header::SetResponseHeaderLayer,
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

pub fn router(app: Arc<AppState>) -> Router {
  Router::new()
    .route("/", get(handlers::root))
    .route("/health", get(handlers::health))
    .route("/users/login", post(handlers::login))
    .route("/users/wallet", post(handlers::link_wallet))
    .route("/challenges", get(handlers::challenges))
    .route("/challenges/{id}", get(handlers::challenge))
    .route("/submissions", post(handlers::submit))
    .route(
      "/submissions/user/{telegram_id}",
      get(handlers::user_submissions),
    )
    .route("/leaderboard", get(handlers::leaderboard))
    .route("/stats", get(handlers::stats))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        )
        // clients must always see fresh data
        .layer(SetResponseHeaderLayer::overriding(
          header::CACHE_CONTROL,
          HeaderValue::from_static("no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
          header::PRAGMA,
          HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
          header::EXPIRES,
          HeaderValue::from_static("0"),
        )),
    )
    .with_state(app)
}

pub async fn serve(app: Arc<AppState>) -> anyhow::Result<()> {
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(app.config.rate_per_second)
      .burst_size(app.config.rate_burst)
      .finish()
      .context("Failed to build rate limiter config")?,
  );

  let limiter = governor_conf.limiter().clone();
  let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));

  let router = router(app)
    .layer(GovernorLayer::new(governor_conf))
    .into_make_service_with_connect_info::<SocketAddr>();

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind {addr}"))?;
  info!("HTTP server listening on {addr}");

  let limiter = async {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      limiter.retain_recent();
    }
  };

  let server =
    async { axum::serve(listener, router).await.context("Axum server error") };

  tokio::select! {
    result = server => {
      match &result {
        Ok(_) => info!("Server stopped gracefully"),
        Err(err) => error!("Server stopped with error: {err}"),
      }
      result
    }
    _ = limiter => {
      error!("Rate limiter cleaner stopped unexpectedly!");
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use chrono::TimeDelta;
  use http_body_util::BodyExt;
  use tower::ServiceExt;

  use super::*;
  use crate::{
    entity::Status,
    model::*,
    state::Config,
    sv::testing::{insert_challenge, setup_test_db},
  };

  async fn test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let config =
      Config { environment: String::from("test"), ..Config::default() };
    let app = AppState::with_connection(db.clone(), config).await.unwrap();
    (router(Arc::new(app)), db)
  }

  async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<json::Value>,
  ) -> (StatusCode, axum::http::HeaderMap, json::Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
      Some(body) => request
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string())),
      None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // extractor rejections come back as plain text
    let value = json::from_slice(&bytes).unwrap_or(json::Value::Null);

    (status, headers, value)
  }

  async fn login(router: &Router, telegram_id: i64) -> UserRes {
    let (status, _, body) = send(
      router,
      "POST",
      "/users/login",
      Some(json::json!({
        "telegram_id": telegram_id,
        "username": "fran42",
        "first_name": "Francisco",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json::from_value(body).unwrap()
  }

  #[tokio::test]
  async fn test_health_and_cache_headers() {
    let (router, _) = test_app().await;

    let (status, headers, body) = send(&router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());

    assert_eq!(headers[header::CACHE_CONTROL], "no-store, must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
  }

  #[tokio::test]
  async fn test_health_reports_unavailable_store() {
    let (router, db) = test_app().await;
    db.close().await.unwrap();

    let (status, _, body) = send(&router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().starts_with("Service unhealthy"));
  }

  #[tokio::test]
  async fn test_login_and_wallet() {
    let (router, _) = test_app().await;

    let user = login(&router, 123456789).await;
    assert_eq!(user.telegram_id, 123456789);
    assert_eq!(user.username.as_deref(), Some("fran42"));
    assert_eq!(user.wallet_address, None);

    let (status, _, body) = send(
      &router,
      "POST",
      "/users/wallet",
      Some(json::json!({
        "telegram_id": 123456789,
        "wallet_address": "EQDrf-abc123",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Wallet linked successfully");
    assert_eq!(body["wallet_address"], "EQDrf-abc123");

    let again = login(&router, 123456789).await;
    assert_eq!(again.id, user.id);
    assert_eq!(again.wallet_address.as_deref(), Some("EQDrf-abc123"));
  }

  #[tokio::test]
  async fn test_wallet_unknown_user() {
    let (router, _) = test_app().await;

    let (status, _, body) = send(
      &router,
      "POST",
      "/users/wallet",
      Some(json::json!({ "telegram_id": 1, "wallet_address": "EQD" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
  }

  #[tokio::test]
  async fn test_login_requires_telegram_id() {
    let (router, _) = test_app().await;

    let (status, _, _) = send(
      &router,
      "POST",
      "/users/login",
      Some(json::json!({ "username": "anon" })),
    )
    .await;

    assert!(status.is_client_error());
  }

  #[tokio::test]
  async fn test_challenges() {
    let (router, db) = test_app().await;
    let open =
      insert_challenge(&db, "open", Status::Active, TimeDelta::days(2)).await;
    let closed =
      insert_challenge(&db, "closed", Status::Expired, TimeDelta::days(2))
        .await;

    let (status, _, body) = send(&router, "GET", "/challenges", None).await;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<ChallengeRes> = json::from_value(body.clone()).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, open.id);
    assert_eq!(body[0]["reward_info"], "10 TON");
    assert_eq!(body[0]["status"], "active");

    let uri = format!("/challenges/{}", closed.id);
    let (status, _, body) = send(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "closed");
    assert_eq!(body["status"], "expired");

    let (status, _, body) =
      send(&router, "GET", "/challenges/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Challenge not found");
  }

  #[tokio::test]
  async fn test_submission_flow() {
    let (router, db) = test_app().await;
    let challenge =
      insert_challenge(&db, "logo", Status::Active, TimeDelta::days(1)).await;
    let payload = json::json!({
      "telegram_id": 555,
      "challenge_id": challenge.id,
      "image_url": "https://cdn.example.com/xyz123.jpg",
    });

    let (status, _, body) =
      send(&router, "POST", "/submissions", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found. Please login first.");

    let user = login(&router, 555).await;

    let (status, _, body) =
      send(&router, "POST", "/submissions", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: SubmissionRes = json::from_value(body).unwrap();
    assert_eq!(created.user_id, user.id);
    assert_eq!(created.challenge_id, challenge.id);

    let (status, _, body) =
      send(&router, "POST", "/submissions", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "You have already submitted to this challenge");

    let (status, _, body) =
      send(&router, "GET", "/submissions/user/555", None).await;
    assert_eq!(status, StatusCode::OK);
    let history: Vec<UserSubmission> = json::from_value(body).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, created.id);
    assert_eq!(history[0].challenge_title, "logo");

    let (status, _, body) =
      send(&router, "GET", "/submissions/user/556", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
  }

  #[tokio::test]
  async fn test_leaderboard_and_stats() {
    let (router, db) = test_app().await;
    let challenge =
      insert_challenge(&db, "logo", Status::Active, TimeDelta::days(1)).await;
    insert_challenge(&db, "stale", Status::Active, TimeDelta::days(-1)).await;

    for telegram_id in 1..=12 {
      login(&router, telegram_id).await;
    }
    let payload = json::json!({
      "telegram_id": 7,
      "challenge_id": challenge.id,
      "image_url": "p.jpg",
    });
    send(&router, "POST", "/submissions", Some(payload)).await;

    let (status, _, body) = send(&router, "GET", "/leaderboard", None).await;
    assert_eq!(status, StatusCode::OK);
    let board: Vec<LeaderboardEntry> = json::from_value(body.clone()).unwrap();
    assert_eq!(board.len(), 10);
    assert_eq!(board[0].submission_count, 1);
    assert_eq!(board[1].submission_count, 0);
    assert!(body[0].get("wallet_address").is_none());
    assert!(body[0].get("telegram_id").is_none());

    let (_, _, body) =
      send(&router, "GET", "/leaderboard?limit=3", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _, body) = send(&router, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let overview: Overview = json::from_value(body).unwrap();
    assert_eq!(
      overview,
      Overview { total_users: 12, active_challenges: 2, total_submissions: 1 }
    );
  }
}
