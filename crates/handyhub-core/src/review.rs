//! Reviews — customer ratings attached to a contractor.
//!
//! Creating a review changes the contractor's aggregate `rating` and
//! `review_count`, which only the server can recompute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::{Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
  pub review_id:     Uuid,
  pub contractor_id: Uuid,
  /// 1 to 5 stars.
  pub rating:        u8,
  pub comment:       Option<String>,
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewFilter {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contractor_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
  pub contractor_id: Uuid,
  pub rating:        u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment:       Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating:  Option<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
}

impl Resource for Review {
  type Create = NewReview;
  type Filter = ReviewFilter;
  type Id = Uuid;
  type Update = ReviewUpdate;

  const KIND: ResourceKind = ResourceKind::Reviews;

  fn id(&self) -> &Uuid { &self.review_id }
}
