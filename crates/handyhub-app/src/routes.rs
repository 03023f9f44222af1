//! Page declarations and the access each one requires.
//!
//! | Prefix | Access |
//! |--------|--------|
//! | `/`, `/services`, `/contractors` | public |
//! | `/dashboard`, `/requests` | any signed-in viewer |
//! | `/requests/new` | `user` or `admin` |
//! | `/leads` | `contractor` with an active subscription |
//! | `/admin` | `admin` |
//!
//! Lookup picks the longest declared prefix that matches on a path-segment
//! boundary; undeclared paths are protected (signed-in only).

use handyhub_core::viewer::Role;

use crate::gate::Requirements;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
  Public,
  Protected(Requirements),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
  routes:   Vec<(String, Access)>,
  fallback: Access,
}

impl RouteTable {
  /// A table with no declared pages; everything falls back to `fallback`.
  pub fn empty(fallback: Access) -> Self {
    Self { routes: Vec::new(), fallback }
  }

  pub fn route(mut self, prefix: impl Into<String>, access: Access) -> Self {
    let prefix = prefix.into();
    self.routes.retain(|(p, _)| *p != prefix);
    self.routes.push((prefix, access));
    self
  }

  /// Access required for `target`. Query string and fragment are ignored;
  /// the path is normalised before lookup.
  pub fn access(&self, target: &str) -> &Access {
    let path = normalize(
      target
        .split(['?', '#'])
        .next()
        .unwrap_or_default(),
    );

    self
      .routes
      .iter()
      .filter(|(prefix, _)| matches_prefix(&path, prefix))
      .max_by_key(|(prefix, _)| prefix.len())
      .map(|(_, access)| access)
      .unwrap_or(&self.fallback)
  }
}

impl Default for RouteTable {
  fn default() -> Self {
    let signed_in = Access::Protected(Requirements::signed_in());
    Self::empty(signed_in.clone())
      .route("/", Access::Public)
      .route("/services", Access::Public)
      .route("/contractors", Access::Public)
      .route("/dashboard", signed_in.clone())
      .route("/requests", signed_in)
      .route(
        "/requests/new",
        Access::Protected(Requirements::roles([Role::User, Role::Admin])),
      )
      .route(
        "/leads",
        Access::Protected(
          Requirements::roles([Role::Contractor]).with_active_subscription(),
        ),
      )
      .route("/admin", Access::Protected(Requirements::roles([Role::Admin])))
  }
}

/// Collapse repeated `/`, drop `.` segments and resolve `..`, so every
/// spelling of a page maps to the same table entry.
fn normalize(path: &str) -> String {
  let mut segments = Vec::new();
  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => {
        segments.pop();
      }
      s => segments.push(s),
    }
  }
  format!("/{}", segments.join("/"))
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
  if prefix == "/" {
    return path == "/";
  }
  match path.strip_prefix(prefix) {
    Some(rest) => rest.is_empty() || rest.starts_with('/'),
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn root_is_public_but_does_not_swallow_everything() {
    let table = RouteTable::default();
    assert_eq!(table.access("/"), &Access::Public);
    assert_eq!(
      table.access("/settings"),
      &Access::Protected(Requirements::signed_in())
    );
  }

  #[test]
  fn longest_prefix_wins() {
    let table = RouteTable::default();
    assert_eq!(
      table.access("/requests/42"),
      &Access::Protected(Requirements::signed_in())
    );
    assert_eq!(
      table.access("/requests/new?category=roofing"),
      &Access::Protected(Requirements::roles([Role::User, Role::Admin]))
    );
  }

  #[test]
  fn prefix_matches_whole_segments_only() {
    let table = RouteTable::default();
    assert_eq!(table.access("/contractors/plumbing#top"), &Access::Public);
    assert_eq!(
      table.access("/contractorsx"),
      &Access::Protected(Requirements::signed_in())
    );
  }

  #[test]
  fn equivalent_spellings_share_access() {
    let table = RouteTable::default();
    for (spelled, canonical) in [
      ("//leads", "/leads"),
      ("/./leads", "/leads"),
      ("///admin//users", "/admin/users"),
      ("/contractors/../admin", "/admin"),
      ("/requests//new?category=roofing", "/requests/new"),
      ("//", "/"),
    ] {
      assert_eq!(table.access(spelled), table.access(canonical), "{spelled}");
    }
    assert_eq!(
      table.access("//leads"),
      &Access::Protected(Requirements::roles([Role::Contractor]).with_active_subscription())
    );
  }

  #[test]
  fn parent_segments_cannot_climb_above_root() {
    let table = RouteTable::default();
    assert_eq!(table.access("/../../admin"), table.access("/admin"));
  }

  #[test]
  fn redeclaring_a_prefix_replaces_it() {
    let table = RouteTable::default().route("/admin", Access::Public);
    assert_eq!(table.access("/admin/users"), &Access::Public);
  }
}
