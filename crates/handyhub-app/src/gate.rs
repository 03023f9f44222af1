//! Access gate for navigation targets.
//!
//! The gate asks the [`SessionProvider`] for the current viewer and turns the
//! answer into a [`Decision`]. It never navigates and never fails: every
//! provider error resolves to a redirect to the login page (fail closed).
//! Acting on the decision is the caller's job, see [`Decision::follow`].

use std::{collections::BTreeSet, sync::Arc};

use handyhub_core::{
  api::{Navigator, SessionProvider},
  viewer::{Role, Viewer},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::routes::{Access, RouteTable};

// ─── Requirements ─────────────────────────────────────────────────────────────

/// What a protected page demands of its viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
  /// Acceptable roles; `None` admits any signed-in viewer.
  pub roles:                       Option<BTreeSet<Role>>,
  pub require_active_subscription: bool,
}

impl Requirements {
  /// Any signed-in viewer.
  pub fn signed_in() -> Self { Self::default() }

  pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
    Self {
      roles: Some(roles.into_iter().collect()),
      ..Self::default()
    }
  }

  pub fn with_active_subscription(mut self) -> Self {
    self.require_active_subscription = true;
    self
  }
}

// ─── Decision ─────────────────────────────────────────────────────────────────

/// Why a viewer was sent elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
  /// The session provider failed; treated as signed out.
  SessionError,
  NotAuthenticated,
  RoleNotPermitted,
  SubscriptionInactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
  pub to:        String,
  pub reason:    RedirectReason,
  /// Where to send the viewer after signing in.
  pub return_to: Option<String>,
  /// Name of the query parameter carrying `return_to`.
  pub param:     String,
}

impl Redirect {
  /// Query pairs to pass to [`Navigator::redirect_to`].
  pub fn query(&self) -> Vec<(&str, &str)> {
    self
      .return_to
      .as_deref()
      .map(|target| vec![(self.param.as_str(), target)])
      .unwrap_or_default()
  }
}

/// Terminal outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  Allow(Viewer),
  Redirect(Redirect),
}

impl Decision {
  pub fn is_allowed(&self) -> bool { matches!(self, Self::Allow(_)) }

  /// Navigate if this is a redirect; return the viewer if access is allowed.
  pub fn follow<N: Navigator>(&self, navigator: &mut N) -> Option<&Viewer> {
    match self {
      Self::Allow(viewer) => Some(viewer),
      Self::Redirect(redirect) => {
        navigator.redirect_to(&redirect.to, &redirect.query());
        None
      }
    }
  }
}

/// Rendering state of a guarded page.
///
/// `Checking` is initial; `Allowed` and `Redirecting` are terminal for one
/// evaluation. Nothing protected may be rendered while `Checking`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GateState {
  #[default]
  Checking,
  Allowed(Viewer),
  Redirecting(Redirect),
}

impl From<Decision> for GateState {
  fn from(decision: Decision) -> Self {
    match decision {
      Decision::Allow(viewer) => Self::Allowed(viewer),
      Decision::Redirect(redirect) => Self::Redirecting(redirect),
    }
  }
}

/// Result of [`AuthGate::guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
  /// The page is public; no session was consulted.
  Public,
  Checked(Decision),
}

// ─── Routes ───────────────────────────────────────────────────────────────────

/// Where the gate sends viewers it turns away.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GateRoutes {
  pub login:        String,
  pub unauthorized: String,
  pub subscription: String,
  /// Query parameter that carries the post-login return target.
  pub return_param: String,
}

impl Default for GateRoutes {
  fn default() -> Self {
    Self {
      login:        "/login".into(),
      unauthorized: "/unauthorized".into(),
      subscription: "/subscribe".into(),
      return_param: "redirect".into(),
    }
  }
}

// ─── Gate ─────────────────────────────────────────────────────────────────────

pub struct AuthGate<P> {
  provider: Arc<P>,
  routes:   GateRoutes,
  table:    RouteTable,
}

impl<P: SessionProvider> AuthGate<P> {
  pub fn new(provider: Arc<P>) -> Self {
    Self {
      provider,
      routes: GateRoutes::default(),
      table: RouteTable::default(),
    }
  }

  pub fn with_routes(mut self, routes: GateRoutes) -> Self {
    self.routes = routes;
    self
  }

  /// Decide whether the current viewer may open `target`.
  pub async fn evaluate(&self, target: &str, requirements: &Requirements) -> Decision {
    let viewer = match self.provider.current_viewer().await {
      Ok(Some(viewer)) => viewer,
      Ok(None) => {
        info!(path = target, "no viewer, redirecting to login");
        return self.to_login(target, RedirectReason::NotAuthenticated);
      }
      Err(e) => {
        warn!(path = target, error = %e, "session lookup failed, redirecting to login");
        return self.to_login(target, RedirectReason::SessionError);
      }
    };

    if let Some(roles) = &requirements.roles
      && !roles.contains(&viewer.role)
    {
      info!(path = target, role = %viewer.role, "role not permitted");
      return self.redirect(&self.routes.unauthorized, RedirectReason::RoleNotPermitted);
    }

    if requirements.require_active_subscription
      && !viewer.subscription_status.is_active()
    {
      info!(
        path = target,
        status = %viewer.subscription_status,
        "subscription not active"
      );
      return self.redirect(
        &self.routes.subscription,
        RedirectReason::SubscriptionInactive,
      );
    }

    Decision::Allow(viewer)
  }

  /// Evaluate `target` against the route table.
  pub async fn guard(&self, target: &str) -> Guard {
    match self.table.access(target) {
      Access::Public => Guard::Public,
      Access::Protected(requirements) => {
        Guard::Checked(self.evaluate(target, requirements).await)
      }
    }
  }

  fn to_login(&self, target: &str, reason: RedirectReason) -> Decision {
    Decision::Redirect(Redirect {
      to: self.routes.login.clone(),
      reason,
      return_to: Some(target.to_string()),
      param: self.routes.return_param.clone(),
    })
  }

  fn redirect(&self, to: &str, reason: RedirectReason) -> Decision {
    Decision::Redirect(Redirect {
      to: to.to_string(),
      reason,
      return_to: None,
      param: self.routes.return_param.clone(),
    })
  }
}
