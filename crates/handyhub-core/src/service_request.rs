//! Service requests — jobs posted by customers for contractors to pick up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::resource::{Resource, ResourceKind};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequestStatus {
  #[default]
  Open,
  Assigned,
  Completed,
  Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
  pub request_id:  Uuid,
  pub customer_id: Uuid,
  pub category:    String,
  pub description: String,
  pub location:    String,
  #[serde(default)]
  pub status:      RequestStatus,
  pub created_at:  DateTime<Utc>,
}

/// Query parameters for `GET /service-requests`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceRequestFilter {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:      Option<RequestStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewServiceRequest {
  pub category:    String,
  pub description: String,
  pub location:    String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceRequestUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:      Option<RequestStatus>,
}

impl Resource for ServiceRequest {
  type Create = NewServiceRequest;
  type Filter = ServiceRequestFilter;
  type Id = Uuid;
  type Update = ServiceRequestUpdate;

  const KIND: ResourceKind = ResourceKind::ServiceRequests;

  fn id(&self) -> &Uuid { &self.request_id }
}
