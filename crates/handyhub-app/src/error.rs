//! Normalised errors surfaced by resource hooks.

use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

/// Shown when the underlying error has nothing useful to say.
pub const DEFAULT_MESSAGE: &str = "Something went wrong. Please try again.";

type Source = Arc<dyn StdError + Send + Sync + 'static>;

/// A hook failure with a human-readable message.
///
/// The original error is kept as [`std::error::Error::source`]. Cheap to
/// clone so it can live in hook state and be handed out in snapshots.
#[derive(Debug, Clone, Error)]
pub enum HookError {
  /// A list load failed; the previous collection is retained.
  #[error("{message}")]
  FetchFailed {
    message: String,
    #[source]
    source:  Option<Source>,
  },

  /// A create or update failed; the collection was not modified.
  #[error("{message}")]
  MutationFailed {
    message: String,
    #[source]
    source:  Option<Source>,
  },
}

impl HookError {
  pub fn fetch_failed<E>(err: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    let (message, source) = normalize(err);
    Self::FetchFailed { message, source }
  }

  pub fn mutation_failed<E>(err: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    let (message, source) = normalize(err);
    Self::MutationFailed { message, source }
  }

  pub fn message(&self) -> &str {
    match self {
      Self::FetchFailed { message, .. } | Self::MutationFailed { message, .. } => {
        message
      }
    }
  }
}

fn normalize<E>(err: E) -> (String, Option<Source>)
where
  E: StdError + Send + Sync + 'static,
{
  let message = err.to_string();
  let message = if message.trim().is_empty() {
    DEFAULT_MESSAGE.to_string()
  } else {
    message
  };
  (message, Some(Arc::new(err)))
}
