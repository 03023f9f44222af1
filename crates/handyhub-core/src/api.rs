//! Collaborator traits: the remote API, the session provider and navigation.
//!
//! These are implemented by `handyhub-client` over HTTP and by hand-written
//! fakes in tests. Higher layers (`handyhub-app`, `handyhub-cli`) depend on
//! this abstraction, not on any concrete transport.

use std::future::Future;

use crate::{resource::Resource, viewer::Viewer};

// ─── Session ─────────────────────────────────────────────────────────────────

/// Source of the current viewer.
pub trait SessionProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Resolve the signed-in viewer, or `None` when nobody is signed in.
  ///
  /// Returns an error only when the provider itself could not be reached.
  fn current_viewer(
    &self,
  ) -> impl Future<Output = Result<Option<Viewer>, Self::Error>> + Send + '_;
}

// ─── Remote collections ──────────────────────────────────────────────────────

/// Abstraction over the marketplace's REST collections.
///
/// Every method returns a canonical record (or records) as stored by the
/// server. All methods return `Send` futures so callers can drive them from a
/// multi-threaded tokio runtime.
pub trait ResourceApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List the collection for `R`, filtered by `filters`.
  fn list<'a, R: Resource>(
    &'a self,
    filters: &'a R::Filter,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + 'a;

  /// Fetch one record by identifier.
  fn get<'a, R: Resource>(
    &'a self,
    id: &'a R::Id,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + 'a;

  /// Create a record and return it as persisted.
  fn create<'a, R: Resource>(
    &'a self,
    payload: &'a R::Create,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + 'a;

  /// Update the record `id` and return it as persisted.
  fn update<'a, R: Resource>(
    &'a self,
    id: &'a R::Id,
    payload: &'a R::Update,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + 'a;
}

// ─── Navigation ──────────────────────────────────────────────────────────────

/// Side-effecting navigation, performed by whoever acts on a gate decision.
pub trait Navigator {
  fn redirect_to(&mut self, path: &str, query: &[(&str, &str)]);
}
