//! Generic list / create / update hook over a remote collection.
//!
//! A [`ResourceHook`] holds an in-memory copy of one collection and keeps it
//! consistent with the server after its own mutations, without refetching:
//!
//! - a successful load replaces the whole collection,
//! - a successful create appends the canonical record,
//! - a successful update replaces the matching record in place.
//!
//! Every load is stamped with a sequence number. Only the response to the most
//! recently issued load is applied; older responses that arrive late are
//! dropped.

use std::{
  collections::HashSet,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use handyhub_core::{api::ResourceApi, resource::Resource};
use tracing::{debug, warn};

use crate::error::HookError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Fetch progress of a collection.
#[derive(Debug, Clone)]
pub enum FetchState {
  /// Nothing has been requested yet.
  Idle,
  Loading,
  /// The latest load settled; `error` is set if it failed.
  Ready { error: Option<HookError> },
}

struct HookState<R: Resource> {
  items:   Vec<R>,
  loading: bool,
  error:   Option<HookError>,
  /// Filters of the most recently issued load.
  filters: Option<R::Filter>,
  /// Sequence number of the most recently issued load.
  issued:  u64,
}

impl<R: Resource> Default for HookState<R> {
  fn default() -> Self {
    Self {
      items:   Vec::new(),
      loading: false,
      error:   None,
      filters: None,
      issued:  0,
    }
  }
}

impl<R: Resource> HookState<R> {
  fn replace_all(&mut self, items: Vec<R>) {
    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    self.items = items
      .into_iter()
      .filter(|item| seen.insert(item.id().clone()))
      .collect();
    if self.items.len() != before {
      warn!(
        kind = %R::KIND,
        dropped = before - self.items.len(),
        "server returned duplicate ids; kept first occurrence"
      );
    }
  }

  /// Insert `item`, replacing an existing record with the same id in place.
  fn upsert(&mut self, item: R) {
    match self.position(item.id()) {
      Some(i) => self.items[i] = item,
      None => self.items.push(item),
    }
  }

  /// Replace the record with `item`'s id; returns `false` if it was absent.
  fn replace_one(&mut self, item: R) -> bool {
    match self.position(item.id()) {
      Some(i) => {
        self.items[i] = item;
        true
      }
      None => false,
    }
  }

  fn position(&self, id: &R::Id) -> Option<usize> {
    self.items.iter().position(|item| item.id() == id)
  }
}

// ─── Hook ─────────────────────────────────────────────────────────────────────

/// In-memory view of one remote collection.
///
/// Methods take `&self`; the state lock is never held across an `.await`, so
/// several operations on the same hook may be in flight at once.
pub struct ResourceHook<R: Resource, A> {
  api:   Arc<A>,
  state: Mutex<HookState<R>>,
}

impl<R: Resource, A: ResourceApi> ResourceHook<R, A> {
  pub fn new(api: Arc<A>) -> Self {
    Self { api, state: Mutex::new(HookState::default()) }
  }

  fn state(&self) -> MutexGuard<'_, HookState<R>> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  // ── Snapshots ─────────────────────────────────────────────────────────────

  pub fn items(&self) -> Vec<R> { self.state().items.clone() }

  pub fn get(&self, id: &R::Id) -> Option<R> {
    self.state().items.iter().find(|item| item.id() == id).cloned()
  }

  pub fn is_loading(&self) -> bool { self.state().loading }

  pub fn error(&self) -> Option<HookError> { self.state().error.clone() }

  /// Filters of the most recently issued load, if any.
  pub fn filters(&self) -> Option<R::Filter> { self.state().filters.clone() }

  pub fn fetch_state(&self) -> FetchState {
    let state = self.state();
    if state.loading {
      FetchState::Loading
    } else if state.issued == 0 {
      FetchState::Idle
    } else {
      FetchState::Ready { error: state.error.clone() }
    }
  }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Load on first use and whenever `filters` differ from the last requested
  /// ones. Returns `true` if a load was performed.
  pub async fn set_filters(&self, filters: R::Filter) -> bool {
    if self.state().filters.as_ref() == Some(&filters) {
      return false;
    }
    self.load(filters).await;
    true
  }

  /// Reload with the most recently requested filters (or the defaults).
  pub async fn refresh(&self) {
    let filters = self.filters().unwrap_or_default();
    self.load(filters).await;
  }

  /// Fetch the collection for `filters`.
  ///
  /// On success the collection is replaced and any error cleared. On failure
  /// the previous collection is kept and the error recorded. A response is
  /// ignored if another load was issued after this one.
  pub async fn load(&self, filters: R::Filter) {
    let seq = {
      let mut state = self.state();
      state.issued += 1;
      state.loading = true;
      state.filters = Some(filters.clone());
      state.issued
    };
    debug!(kind = %R::KIND, seq, ?filters, "loading collection");

    let result = self.api.list::<R>(&filters).await;

    let mut state = self.state();
    if seq != state.issued {
      debug!(kind = %R::KIND, seq, latest = state.issued, "discarding stale response");
      return;
    }
    match result {
      Ok(items) => {
        state.replace_all(items);
        state.error = None;
      }
      Err(e) => {
        warn!(kind = %R::KIND, error = %e, "load failed, keeping previous collection");
        state.error = Some(HookError::fetch_failed(e));
      }
    }
    state.loading = false;
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Create a record and append the server's canonical copy.
  pub async fn create(&self, payload: &R::Create) -> Result<R, HookError> {
    let created = self.api.create::<R>(payload).await.map_err(|e| {
      warn!(kind = %R::KIND, error = %e, "create failed");
      HookError::mutation_failed(e)
    })?;
    self.state().upsert(created.clone());
    Ok(created)
  }

  /// Update record `id` and replace it in place with the server's copy.
  pub async fn update(&self, id: &R::Id, payload: &R::Update) -> Result<R, HookError> {
    let updated = self.api.update::<R>(id, payload).await.map_err(|e| {
      warn!(kind = %R::KIND, %id, error = %e, "update failed");
      HookError::mutation_failed(e)
    })?;
    if !self.state().replace_one(updated.clone()) {
      debug!(kind = %R::KIND, %id, "updated record not in collection");
    }
    Ok(updated)
  }

  /// Create a dependent record `D`, then re-read the parent `parent_id` and
  /// replace only that record.
  ///
  /// For mutations that change fields of the parent which only the server can
  /// derive (e.g. a contractor's aggregate rating after a new review). If the
  /// create succeeds but the re-read fails, the dependent record is still
  /// returned and the stale parent is left in place.
  pub async fn create_dependent_and_refetch_parent<D: Resource>(
    &self,
    parent_id: &R::Id,
    payload: &D::Create,
  ) -> Result<D, HookError> {
    let created = self.api.create::<D>(payload).await.map_err(|e| {
      warn!(kind = %D::KIND, parent = %parent_id, error = %e, "create failed");
      HookError::mutation_failed(e)
    })?;

    match self.api.get::<R>(parent_id).await {
      Ok(parent) => {
        if !self.state().replace_one(parent) {
          debug!(kind = %R::KIND, id = %parent_id, "refetched parent not in collection");
        }
      }
      Err(e) => {
        warn!(kind = %R::KIND, id = %parent_id, error = %e, "parent refetch failed");
      }
    }
    Ok(created)
  }
}
