//! Access gating and collection hooks for the handyhub marketplace client.
//!
//! Both pieces are written against the collaborator traits in
//! [`handyhub_core::api`], injected at construction:
//!
//! - [`gate::AuthGate`] turns the current session into an allow/redirect
//!   [`gate::Decision`] for a navigation target.
//! - [`resource::ResourceHook`] keeps an in-memory copy of a remote
//!   collection in step with its own creates and updates.

pub mod contractors;
pub mod error;
pub mod gate;
pub mod resource;
pub mod routes;
pub mod service_requests;

pub use contractors::ContractorsHook;
pub use error::HookError;
pub use gate::{AuthGate, Decision, GateRoutes, GateState, Guard, Redirect, RedirectReason, Requirements};
pub use resource::{FetchState, ResourceHook};
pub use routes::{Access, RouteTable};
pub use service_requests::ServiceRequestsHook;

#[cfg(test)]
mod fake;
