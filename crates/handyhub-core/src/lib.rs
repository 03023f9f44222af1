//! Core types and collaborator traits for the handyhub marketplace client.
//!
//! This crate is deliberately free of HTTP dependencies. The access gate and
//! the resource hooks (`handyhub-app`) are written against the traits here;
//! `handyhub-client` provides the REST implementation.

pub mod api;
pub mod contractor;
pub mod resource;
pub mod review;
pub mod service_request;
pub mod viewer;

pub use resource::{Resource, ResourceKind};
pub use viewer::{Role, SubscriptionStatus, Viewer};
