//! Async HTTP client wrapping the handyhub JSON API.

use std::time::Duration;

use handyhub_core::{
  api::{ResourceApi, SessionProvider},
  resource::Resource,
  viewer::Viewer,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::ClientError;

/// Connection settings for the handyhub API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Bearer token; requests are sent anonymously when `None`.
  pub token:    Option<String>,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080".into(),
      token:    None,
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the handyhub JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Shape of error bodies returned by the API.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Transport)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.config.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Send `req` and decode a JSON body, mapping non-2xx statuses to
  /// [`ClientError::Status`].
  async fn send<T: DeserializeOwned>(
    &self,
    what: &str,
    req: RequestBuilder,
  ) -> Result<T, ClientError> {
    debug!(request = what, "sending");
    let resp = self.auth(req).send().await?;
    let resp = check(what, resp).await?;
    resp
      .json()
      .await
      .map_err(|source| ClientError::Decode { what: what.to_string(), source })
  }
}

/// Pass 2xx responses through; turn anything else into an error carrying the
/// server's `{"error": …}` message when there is one.
async fn check(what: &str, resp: Response) -> Result<Response, ClientError> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let text = resp.text().await.unwrap_or_default();
  let message = serde_json::from_str::<ErrorBody>(&text)
    .map(|body| body.error)
    .unwrap_or(text);
  debug!(request = what, %status, "rejected");
  Err(ClientError::Status {
    what: what.to_string(),
    status,
    message,
  })
}

// ─── Session ──────────────────────────────────────────────────────────────────

impl SessionProvider for ApiClient {
  type Error = ClientError;

  /// `GET /api/session` — `401` means nobody is signed in.
  async fn current_viewer(&self) -> Result<Option<Viewer>, ClientError> {
    let what = "GET /session";
    let resp = self
      .auth(self.client.get(self.url("/session")))
      .send()
      .await?;

    if resp.status() == StatusCode::UNAUTHORIZED {
      return Ok(None);
    }
    let resp = check(what, resp).await?;
    resp
      .json()
      .await
      .map(Some)
      .map_err(|source| ClientError::Decode { what: what.to_string(), source })
  }
}

// ─── Collections ──────────────────────────────────────────────────────────────

impl ResourceApi for ApiClient {
  type Error = ClientError;

  /// `GET /api/{kind}?{filters}`
  async fn list<'a, R: Resource>(&'a self, filters: &'a R::Filter) -> Result<Vec<R>, ClientError> {
    let path = format!("/{}", R::KIND.segment());
    let req = self.client.get(self.url(&path)).query(filters);
    self.send(&format!("GET {path}"), req).await
  }

  /// `GET /api/{kind}/{id}`
  async fn get<'a, R: Resource>(&'a self, id: &'a R::Id) -> Result<R, ClientError> {
    let path = format!("/{}/{id}", R::KIND.segment());
    let req = self.client.get(self.url(&path));
    self.send(&format!("GET {path}"), req).await
  }

  /// `POST /api/{kind}`
  async fn create<'a, R: Resource>(&'a self, payload: &'a R::Create) -> Result<R, ClientError> {
    let path = format!("/{}", R::KIND.segment());
    let req = self.client.post(self.url(&path)).json(payload);
    self.send(&format!("POST {path}"), req).await
  }

  /// `PATCH /api/{kind}/{id}`
  async fn update<'a, R: Resource>(
    &'a self,
    id: &'a R::Id,
    payload: &'a R::Update,
  ) -> Result<R, ClientError> {
    let path = format!("/{}/{id}", R::KIND.segment());
    let req = self.client.patch(self.url(&path)).json(payload);
    self.send(&format!("PATCH {path}"), req).await
  }
}
