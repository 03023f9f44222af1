//! Contractors — businesses offering services in one category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::{Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
  pub contractor_id: Uuid,
  pub business_name: String,
  /// Service category slug, e.g. `plumbing`.
  pub category:      String,
  pub location:      String,
  /// Mean review rating; computed by the server, `None` until reviewed.
  #[serde(default)]
  pub rating:        Option<f32>,
  #[serde(default)]
  pub review_count:  u32,
  pub created_at:    DateTime<Utc>,
}

/// Query parameters for `GET /contractors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractorFilter {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContractor {
  pub business_name: String,
  pub category:      String,
  pub location:      String,
}

/// Partial update; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractorUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub business_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location:      Option<String>,
}

impl Resource for Contractor {
  type Create = NewContractor;
  type Filter = ContractorFilter;
  type Id = Uuid;
  type Update = ContractorUpdate;

  const KIND: ResourceKind = ResourceKind::Contractors;

  fn id(&self) -> &Uuid { &self.contractor_id }
}
