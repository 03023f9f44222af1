//! Client tests against an in-process axum server on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::{
  Json, Router,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
  routing::{get, post},
};
use chrono::{TimeZone, Utc};
use handyhub_app::{AuthGate, ContractorsHook, Decision, RedirectReason, Requirements};
use handyhub_core::{
  api::{ResourceApi, SessionProvider},
  contractor::{Contractor, ContractorFilter, ContractorUpdate},
  review::{NewReview, Review},
  viewer::{Role, SubscriptionStatus, Viewer},
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::{ApiClient, ApiConfig, ClientError};

const TOKEN: &str = "good-token";

// ─── Fake marketplace server ─────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Market {
  contractors: Arc<Mutex<Vec<Contractor>>>,
  reviews:     Arc<Mutex<Vec<Review>>>,
}

fn not_found(what: &str) -> Response {
  (StatusCode::NOT_FOUND, Json(json!({ "error": format!("{what} not found") }))).into_response()
}

fn viewer() -> Viewer {
  Viewer {
    user_id:             Uuid::from_u128(7),
    display_name:        "Casey".into(),
    role:                Role::Contractor,
    subscription_status: SubscriptionStatus::Active,
  }
}

async fn session(headers: HeaderMap) -> Response {
  let auth = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default();
  match auth.strip_prefix("Bearer ") {
    Some(TOKEN) => Json(viewer()).into_response(),
    Some("broken") => (StatusCode::INTERNAL_SERVER_ERROR, "session store down").into_response(),
    _ => StatusCode::UNAUTHORIZED.into_response(),
  }
}

#[derive(Deserialize)]
struct ListParams {
  category: Option<String>,
}

async fn list_contractors(
  State(market): State<Market>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Contractor>> {
  let all = market.contractors.lock().unwrap().clone();
  Json(
    all
      .into_iter()
      .filter(|c| params.category.as_ref().is_none_or(|cat| &c.category == cat))
      .collect(),
  )
}

async fn get_contractor(State(market): State<Market>, Path(id): Path<Uuid>) -> Response {
  let all = market.contractors.lock().unwrap();
  match all.iter().find(|c| c.contractor_id == id) {
    Some(c) => Json(c.clone()).into_response(),
    None => not_found("contractor"),
  }
}

#[derive(Deserialize)]
struct PatchBody {
  business_name: Option<String>,
}

async fn patch_contractor(
  State(market): State<Market>,
  Path(id): Path<Uuid>,
  Json(body): Json<PatchBody>,
) -> Response {
  if body.business_name.as_deref() == Some("") {
    return (
      StatusCode::UNPROCESSABLE_ENTITY,
      Json(json!({ "error": "business_name must not be empty" })),
    )
      .into_response();
  }
  let mut all = market.contractors.lock().unwrap();
  let Some(c) = all.iter_mut().find(|c| c.contractor_id == id) else {
    return not_found("contractor");
  };
  if let Some(name) = body.business_name {
    c.business_name = name;
  }
  Json(c.clone()).into_response()
}

#[derive(Deserialize)]
struct ReviewBody {
  contractor_id: Uuid,
  rating:        u8,
  comment:       Option<String>,
}

async fn post_review(State(market): State<Market>, Json(body): Json<ReviewBody>) -> Response {
  let review = Review {
    review_id:     Uuid::new_v4(),
    contractor_id: body.contractor_id,
    rating:        body.rating,
    comment:       body.comment,
    created_at:    Utc::now(),
  };
  let mut reviews = market.reviews.lock().unwrap();
  reviews.push(review.clone());

  let ratings: Vec<f32> = reviews
    .iter()
    .filter(|r| r.contractor_id == body.contractor_id)
    .map(|r| f32::from(r.rating))
    .collect();
  let mut all = market.contractors.lock().unwrap();
  if let Some(c) = all.iter_mut().find(|c| c.contractor_id == body.contractor_id) {
    c.review_count = ratings.len() as u32;
    c.rating = Some(ratings.iter().sum::<f32>() / ratings.len() as f32);
  }
  (StatusCode::CREATED, Json(review)).into_response()
}

fn contractor(n: u128, category: &str) -> Contractor {
  Contractor {
    contractor_id: Uuid::from_u128(n),
    business_name: format!("Contractor {n}"),
    category:      category.into(),
    location:      "Austin".into(),
    rating:        None,
    review_count:  0,
    created_at:    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
  }
}

/// Start the fake server and return its base URL.
async fn serve(market: Market) -> String {
  let app = Router::new()
    .route("/api/session", get(session))
    .route("/api/contractors", get(list_contractors))
    .route(
      "/api/contractors/{id}",
      get(get_contractor).patch(patch_contractor),
    )
    .route("/api/reviews", post(post_review))
    .with_state(market);

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
  format!("http://{addr}")
}

fn client(base_url: String, token: Option<&str>) -> ApiClient {
  ApiClient::new(ApiConfig {
    base_url,
    token: token.map(str::to_string),
    ..ApiConfig::default()
  })
  .unwrap()
}

fn seeded() -> Market {
  let market = Market::default();
  *market.contractors.lock().unwrap() = vec![
    contractor(1, "plumbing"),
    contractor(2, "roofing"),
    contractor(3, "plumbing"),
  ];
  market
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_returns_viewer_for_valid_token() {
  let api = client(serve(Market::default()).await, Some(TOKEN));
  assert_eq!(api.current_viewer().await.unwrap(), Some(viewer()));
}

#[tokio::test]
async fn unauthorized_session_means_signed_out() {
  let api = client(serve(Market::default()).await, None);
  assert_eq!(api.current_viewer().await.unwrap(), None);
}

#[tokio::test]
async fn session_server_error_is_an_error() {
  let api = client(serve(Market::default()).await, Some("broken"));
  let err = api.current_viewer().await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn gate_over_http_allows_subscribed_contractor() {
  let api = Arc::new(client(serve(Market::default()).await, Some(TOKEN)));
  let gate = AuthGate::new(api);
  let required = Requirements::roles([Role::Contractor]).with_active_subscription();
  assert_eq!(gate.evaluate("/leads", &required).await, Decision::Allow(viewer()));
}

#[tokio::test]
async fn unreachable_session_provider_fails_closed() {
  let api = Arc::new(client("http://127.0.0.1:1".into(), Some(TOKEN)));
  let gate = AuthGate::new(api);
  match gate.evaluate("/dashboard", &Requirements::signed_in()).await {
    Decision::Redirect(r) => {
      assert_eq!(r.to, "/login");
      assert_eq!(r.reason, RedirectReason::SessionError);
      assert_eq!(r.return_to.as_deref(), Some("/dashboard"));
    }
    Decision::Allow(v) => panic!("allowed {v:?} without a session"),
  }
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_sends_filters_as_query_string() {
  let api = client(serve(seeded()).await, Some(TOKEN));
  let filter = ContractorFilter { category: Some("plumbing".into()), ..Default::default() };
  let found: Vec<Contractor> = api.list(&filter).await.unwrap();
  let ids: Vec<_> = found.iter().map(|c| c.contractor_id.as_u128()).collect();
  assert_eq!(ids, [1, 3]);
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
  let api = client(serve(seeded()).await, Some(TOKEN));
  let err = api.get::<Contractor>(&Uuid::from_u128(99)).await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
  assert!(matches!(
    err,
    ClientError::Status { ref message, .. } if message == "contractor not found"
  ));
}

#[tokio::test]
async fn hook_surfaces_server_error_message() {
  let api = Arc::new(client(serve(seeded()).await, Some(TOKEN)));
  let hook = ContractorsHook::new(api);
  hook.load(ContractorFilter::default()).await;

  let update = ContractorUpdate { business_name: Some(String::new()), ..Default::default() };
  let err = hook.update(&Uuid::from_u128(2), &update).await.unwrap_err();

  assert_eq!(err.message(), "business_name must not be empty");
  assert_eq!(hook.items()[1].business_name, "Contractor 2");
}

#[tokio::test]
async fn review_refreshes_contractor_rating() {
  let api = Arc::new(client(serve(seeded()).await, Some(TOKEN)));
  let hook = ContractorsHook::new(api);
  hook.load(ContractorFilter::default()).await;

  for rating in [5, 4] {
    hook
      .add_review(&NewReview {
        contractor_id: Uuid::from_u128(3),
        rating,
        comment: Some("Fixed the leak".into()),
      })
      .await
      .unwrap();
  }

  let items = hook.items();
  assert_eq!(items.len(), 3);
  assert_eq!(items[2].review_count, 2);
  assert_eq!(items[2].rating, Some(4.5));
  assert_eq!(items[0].rating, None);
}

#[tokio::test]
async fn unreachable_api_is_a_fetch_error() {
  let api = Arc::new(client("http://127.0.0.1:1".into(), None));
  let hook = ContractorsHook::new(api);
  hook.load(ContractorFilter::default()).await;
  assert!(hook.error().is_some());
  assert!(hook.items().is_empty());
  assert!(!hook.is_loading());
}
