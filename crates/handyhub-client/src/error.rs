//! Error type for the HTTP client.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// The request never produced a response (connect, TLS, timeout).
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server answered with a non-success status. Displays as the server's
  /// own message when it sent one.
  #[error("{}", status_message(what, status, message))]
  Status {
    what:    String,
    status:  StatusCode,
    message: String,
  },

  #[error("decoding response to {what}: {source}")]
  Decode {
    what:   String,
    #[source]
    source: reqwest::Error,
  },
}

impl ClientError {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Transport(e) | Self::Decode { source: e, .. } => e.status(),
    }
  }
}

fn status_message(what: &str, status: &StatusCode, message: &str) -> String {
  let message = message.trim();
  if message.is_empty() {
    format!("{what} → {status}")
  } else {
    message.to_string()
  }
}
