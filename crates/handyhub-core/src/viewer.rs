//! Viewer — the currently authenticated user as reported by the session
//! provider.
//!
//! A viewer is never cached by the core; each gate evaluation asks the
//! provider afresh.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// The role a viewer acts in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
  /// A customer who posts service requests and reviews contractors.
  User,
  Contractor,
  Admin,
}

/// Billing state of the viewer's subscription.
///
/// Only [`SubscriptionStatus::Active`] satisfies a subscription requirement;
/// every other value, including ones this client does not recognise, fails
/// closed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubscriptionStatus {
  Active,
  Trialing,
  PastDue,
  Canceled,
  #[default]
  Inactive,
  #[serde(other)]
  Unknown,
}

impl SubscriptionStatus {
  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

/// The currently signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
  pub user_id:             Uuid,
  pub display_name:        String,
  pub role:                Role,
  #[serde(default)]
  pub subscription_status: SubscriptionStatus,
}
