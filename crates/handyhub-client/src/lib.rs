//! REST implementation of the handyhub collaborator traits.
//!
//! [`ApiClient`] implements both [`handyhub_core::api::ResourceApi`] and
//! [`handyhub_core::api::SessionProvider`] against the marketplace JSON API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | current viewer | `GET /api/session` (`401` → signed out) |
//! | list | `GET /api/{kind}?{filters}` |
//! | get | `GET /api/{kind}/{id}` |
//! | create | `POST /api/{kind}` |
//! | update | `PATCH /api/{kind}/{id}` |

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::ClientError;

#[cfg(test)]
mod tests;
