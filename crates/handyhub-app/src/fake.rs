//! Scripted [`ResourceApi`] for hook tests.
//!
//! Each call records itself and pops the next scripted [`Reply`]. Replies are
//! JSON so one fake serves every record type.

use std::{
  collections::VecDeque,
  sync::Mutex,
};

use handyhub_core::{
  api::ResourceApi,
  resource::{Resource, ResourceKind},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

pub enum Reply {
  Ok(Value),
  Err(String),
  /// Wait for the sender to fire (or drop) before answering.
  Held(oneshot::Receiver<()>, Box<Reply>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
  List(ResourceKind, Value),
  Get(ResourceKind, String),
  Create(ResourceKind, Value),
  Update(ResourceKind, String, Value),
}

#[derive(Default)]
pub struct FakeApi {
  replies: Mutex<VecDeque<Reply>>,
  calls:   Mutex<Vec<Call>>,
}

impl FakeApi {
  pub fn reply(&self, reply: Reply) -> &Self {
    self.replies.lock().unwrap().push_back(reply);
    self
  }

  pub fn ok(&self, value: Value) -> &Self { self.reply(Reply::Ok(value)) }

  pub fn err(&self, message: &str) -> &Self { self.reply(Reply::Err(message.into())) }

  /// Script a reply that is only delivered once the returned sender fires.
  pub fn held(&self, value: Value) -> oneshot::Sender<()> {
    let (tx, rx) = oneshot::channel();
    self.reply(Reply::Held(rx, Box::new(Reply::Ok(value))));
    tx
  }

  pub fn calls(&self) -> Vec<Call> { self.calls.lock().unwrap().clone() }

  fn next(&self, call: Call) -> Reply {
    self.calls.lock().unwrap().push(call.clone());
    self
      .replies
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| panic!("unscripted call: {call:?}"))
  }
}

async fn resolve<T: DeserializeOwned>(reply: Reply) -> Result<T, FakeError> {
  let reply = match reply {
    Reply::Held(rx, inner) => {
      let _ = rx.await;
      *inner
    }
    other => other,
  };
  match reply {
    Reply::Ok(value) => Ok(serde_json::from_value(value).expect("scripted reply has the wrong shape")),
    Reply::Err(message) => Err(FakeError(message)),
    Reply::Held(..) => panic!("nested held replies are not supported"),
  }
}

impl ResourceApi for FakeApi {
  type Error = FakeError;

  async fn list<'a, R: Resource>(&'a self, filters: &'a R::Filter) -> Result<Vec<R>, FakeError> {
    let reply = self.next(Call::List(R::KIND, serde_json::to_value(filters).unwrap()));
    resolve(reply).await
  }

  async fn get<'a, R: Resource>(&'a self, id: &'a R::Id) -> Result<R, FakeError> {
    let reply = self.next(Call::Get(R::KIND, id.to_string()));
    resolve(reply).await
  }

  async fn create<'a, R: Resource>(&'a self, payload: &'a R::Create) -> Result<R, FakeError> {
    let reply = self.next(Call::Create(R::KIND, serde_json::to_value(payload).unwrap()));
    resolve(reply).await
  }

  async fn update<'a, R: Resource>(
    &'a self,
    id: &'a R::Id,
    payload: &'a R::Update,
  ) -> Result<R, FakeError> {
    let reply = self.next(Call::Update(
      R::KIND,
      id.to_string(),
      serde_json::to_value(payload).unwrap(),
    ));
    resolve(reply).await
  }
}

// ─── Fixtures ─────────────────────────────────────────────────────────────────

pub fn id(n: u128) -> Uuid { Uuid::from_u128(n) }

pub fn contractor(n: u128, rating: Option<f32>) -> Value {
  json!({
    "contractor_id": id(n),
    "business_name": format!("Contractor {n}"),
    "category": "plumbing",
    "location": "Austin",
    "rating": rating,
    "review_count": 0,
    "created_at": "2026-01-01T00:00:00Z",
  })
}

pub fn service_request(n: u128, status: &str) -> Value {
  json!({
    "request_id": id(n),
    "customer_id": id(1000),
    "category": "roofing",
    "description": format!("Request {n}"),
    "location": "Austin",
    "status": status,
    "created_at": "2026-01-01T00:00:00Z",
  })
}

pub fn review(n: u128, contractor: u128, rating: u8) -> Value {
  json!({
    "review_id": id(n),
    "contractor_id": id(contractor),
    "rating": rating,
    "comment": null,
    "created_at": "2026-01-02T00:00:00Z",
  })
}
