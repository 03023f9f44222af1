//! Subcommand implementations.

use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result, ensure};
use handyhub_app::{
  AuthGate, ContractorsHook, GateRoutes, GateState, Guard, RedirectReason, Requirements,
  ServiceRequestsHook,
};
use handyhub_client::ApiClient;
use handyhub_core::{
  api::Navigator,
  contractor::{Contractor, ContractorFilter},
  review::NewReview,
  service_request::{
    NewServiceRequest, RequestStatus, ServiceRequest, ServiceRequestFilter,
    ServiceRequestUpdate,
  },
  viewer::Role,
};
use reqwest::Url;
use uuid::Uuid;

// ─── Navigation ───────────────────────────────────────────────────────────────

/// Records where a redirect would take the viewer instead of going there.
struct Printer {
  base:     Url,
  location: Option<String>,
}

impl Navigator for Printer {
  fn redirect_to(&mut self, path: &str, query: &[(&str, &str)]) {
    let mut url = self.base.clone();
    url.set_path(path);
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query);
    }
    self.location = Some(url.to_string());
  }
}

fn describe(reason: RedirectReason) -> &'static str {
  match reason {
    RedirectReason::SessionError => "session unavailable",
    RedirectReason::NotAuthenticated => "not signed in",
    RedirectReason::RoleNotPermitted => "role not permitted",
    RedirectReason::SubscriptionInactive => "subscription not active",
  }
}

// ─── check ────────────────────────────────────────────────────────────────────

/// One line describing `state`; `location` is where a redirect leads.
fn render(path: &str, state: &GateState, location: Option<&str>) -> String {
  match state {
    GateState::Checking => format!("{path}: checking…"),
    GateState::Allowed(viewer) => format!(
      "{path}: allowed for {} ({}, subscription {})",
      viewer.display_name, viewer.role, viewer.subscription_status
    ),
    GateState::Redirecting(redirect) => format!(
      "{path}: redirect to {} ({})",
      location.unwrap_or(redirect.to.as_str()),
      describe(redirect.reason)
    ),
  }
}

/// Evaluate the gate for `path`. Exits with status 2 on a redirect.
pub async fn check(
  api: Arc<ApiClient>,
  base_url: &str,
  routes: GateRoutes,
  path: &str,
  roles: Vec<Role>,
  subscription: bool,
) -> Result<ExitCode> {
  let base = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;
  let gate = AuthGate::new(api).with_routes(routes);

  eprintln!("{}", render(path, &GateState::Checking, None));
  let decision = if roles.is_empty() && !subscription {
    match gate.guard(path).await {
      Guard::Public => {
        println!("{path}: public");
        return Ok(ExitCode::SUCCESS);
      }
      Guard::Checked(decision) => decision,
    }
  } else {
    let requirements = if roles.is_empty() {
      Requirements::signed_in()
    } else {
      Requirements::roles(roles)
    };
    let requirements = if subscription {
      requirements.with_active_subscription()
    } else {
      requirements
    };
    gate.evaluate(path, &requirements).await
  };

  let mut printer = Printer { base, location: None };
  decision.follow(&mut printer);
  let allowed = decision.is_allowed();
  let state = GateState::from(decision);
  println!("{}", render(path, &state, printer.location.as_deref()));

  Ok(if allowed { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

// ─── contractors / review ─────────────────────────────────────────────────────

fn print_contractor(c: &Contractor) {
  let rating = c
    .rating
    .map(|r| format!("{r:.1} ({} reviews)", c.review_count))
    .unwrap_or_else(|| "unrated".into());
  println!(
    "{}  {:<28} {:<14} {:<16} {rating}",
    c.contractor_id, c.business_name, c.category, c.location
  );
}

pub async fn contractors(api: Arc<ApiClient>, filter: ContractorFilter) -> Result<()> {
  let hook = ContractorsHook::new(api);
  hook.set_filters(filter).await;
  if let Some(e) = hook.error() {
    return Err(e).context("loading contractors");
  }

  let items = hook.items();
  if items.is_empty() {
    println!("No contractors found.");
  }
  items.iter().for_each(print_contractor);
  Ok(())
}

pub async fn review(
  api: Arc<ApiClient>,
  contractor_id: Uuid,
  rating: u8,
  comment: Option<String>,
) -> Result<()> {
  let hook = ContractorsHook::new(api);
  hook.load(ContractorFilter::default()).await;
  if let Some(e) = hook.error() {
    return Err(e).context("loading contractors");
  }

  let review = hook
    .add_review(&NewReview { contractor_id, rating, comment })
    .await
    .context("posting review")?;
  println!("Recorded review {}.", review.review_id);

  match hook.get(&contractor_id) {
    Some(c) => print_contractor(&c),
    None => println!("Contractor {contractor_id} is not listed."),
  }
  Ok(())
}

// ─── requests ─────────────────────────────────────────────────────────────────

fn print_request(r: &ServiceRequest) {
  println!(
    "{}  {:<10} {:<14} {:<16} {}",
    r.request_id, r.status, r.category, r.location, r.description
  );
}

pub async fn list_requests(api: Arc<ApiClient>, filter: ServiceRequestFilter) -> Result<()> {
  let hook = ServiceRequestsHook::new(api);
  hook.set_filters(filter).await;
  if let Some(e) = hook.error() {
    return Err(e).context("loading service requests");
  }

  let items = hook.items();
  if items.is_empty() {
    println!("No service requests found.");
  }
  items.iter().for_each(print_request);
  Ok(())
}

pub async fn create_request(api: Arc<ApiClient>, request: NewServiceRequest) -> Result<()> {
  let hook = ServiceRequestsHook::new(api);
  let created = hook.create(&request).await.context("submitting request")?;
  print_request(&created);
  Ok(())
}

pub async fn update_request(
  api: Arc<ApiClient>,
  request_id: Uuid,
  status: Option<RequestStatus>,
  description: Option<String>,
) -> Result<()> {
  ensure!(
    status.is_some() || description.is_some(),
    "nothing to update: pass --status and/or --description"
  );
  let hook = ServiceRequestsHook::new(api);
  let updated = match (status, description) {
    (Some(status), None) => hook.set_status(request_id, status).await,
    (status, description) => {
      hook
        .update(&request_id, &ServiceRequestUpdate { description, status })
        .await
    }
  }
  .context("updating request")?;
  print_request(&updated);
  Ok(())
}
