use thiserror::Error;

/// Failures surfaced by loaders, services and the composition root.
///
/// Services never interpret these, they only care whether one is present.
/// The description is what the error view shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0}")]
  Transport(String),
  #[error("No cached items available")]
  CacheMiss,
  #[error("Cache failure: {0}")]
  Cache(String),
  /// A controller or screen was wired without a required dependency.
  #[error("Configuration fault: {0}")]
  Configuration(String),
}

impl Error {
  pub fn is_fatal(&self) -> bool {
    matches!(self, Error::Configuration(_))
  }
}
