//! The `Resource` trait: what a record type must declare to be fetched,
//! created and updated through a [`ResourceApi`](crate::api::ResourceApi).

use std::{fmt, hash::Hash};

use serde::{Serialize, de::DeserializeOwned};
use strum::{Display, IntoStaticStr};

/// Remote collections exposed by the marketplace API.
///
/// The kebab-case form is the collection's URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceKind {
  Contractors,
  ServiceRequests,
  Reviews,
}

impl ResourceKind {
  /// URL segment for this collection, e.g. `service-requests`.
  pub fn segment(&self) -> &'static str { self.into() }
}

/// A record type held in a remote collection.
pub trait Resource:
  Clone + fmt::Debug + Send + Sync + DeserializeOwned + 'static
{
  /// Server-assigned identifier; unique within the collection.
  type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

  /// Query parameters accepted by the list endpoint.
  type Filter: Serialize
    + Clone
    + Default
    + PartialEq
    + fmt::Debug
    + Send
    + Sync
    + 'static;

  /// Body of a create request.
  type Create: Serialize + fmt::Debug + Send + Sync;

  /// Body of an update request.
  type Update: Serialize + fmt::Debug + Send + Sync;

  const KIND: ResourceKind;

  fn id(&self) -> &Self::Id;
}
