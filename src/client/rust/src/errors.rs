/* src/client/rust/src/errors.rs */

use std::error::Error;
use std::fmt;

use trellis_shared::{BoxError, TrellisError};

/// A failure raised while page code or its assets were being fetched,
/// typically a stale deployment. The host can recover by reloading.
#[derive(Debug)]
pub struct AssetFetchError {
  cause: BoxError,
}

impl AssetFetchError {
  pub fn new(cause: BoxError) -> Self {
    Self { cause }
  }

  pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
    self.cause.as_ref()
  }

  pub fn into_cause(self) -> BoxError {
    self.cause
  }
}

impl fmt::Display for AssetFetchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "failed to fetch page code: {}", self.cause)
  }
}

impl Error for AssetFetchError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(self.cause.as_ref())
  }
}

#[derive(Debug)]
pub enum ClientLoadError {
  /// Raised inside the concurrent load batch.
  FetchingAssets(AssetFetchError),
  /// Raised while merging the loaded exports.
  Config(TrellisError),
}

impl ClientLoadError {
  pub fn is_fetching_assets(&self) -> bool {
    matches!(self, Self::FetchingAssets(_))
  }
}

impl fmt::Display for ClientLoadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FetchingAssets(e) => fmt::Display::fmt(e, f),
      Self::Config(e) => fmt::Display::fmt(e, f),
    }
  }
}

impl Error for ClientLoadError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      Self::FetchingAssets(e) => Some(e),
      Self::Config(e) => Some(e),
    }
  }
}

impl From<AssetFetchError> for ClientLoadError {
  fn from(e: AssetFetchError) -> Self {
    Self::FetchingAssets(e)
  }
}

impl From<TrellisError> for ClientLoadError {
  fn from(e: TrellisError) -> Self {
    Self::Config(e)
  }
}

/// Whether `err`, or anything in its source chain, was raised while fetching
/// page code. `None` is never such an error.
pub fn is_error_fetching_static_assets(err: Option<&(dyn Error + 'static)>) -> bool {
  let mut current = err;
  while let Some(e) = current {
    if e.is::<AssetFetchError>() {
      return true;
    }
    current = e.source();
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug)]
  struct HostError(ClientLoadError);

  impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "navigation failed")
    }
  }

  impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
      Some(&self.0)
    }
  }

  fn fetch_error() -> AssetFetchError {
    AssetFetchError::new("chunk 404".into())
  }

  #[test]
  fn detects_tag_directly_and_through_wrappers() {
    let direct = fetch_error();
    assert!(is_error_fetching_static_assets(Some(&direct)));

    let wrapped = HostError(ClientLoadError::FetchingAssets(fetch_error()));
    assert!(is_error_fetching_static_assets(Some(&wrapped)));
  }

  #[test]
  fn other_errors_are_not_tagged() {
    let usage = ClientLoadError::Config(TrellisError::usage("bad export"));
    assert!(!is_error_fetching_static_assets(Some(&usage)));
    let io = std::io::Error::other("boom");
    assert!(!is_error_fetching_static_assets(Some(&io)));
    assert!(!is_error_fetching_static_assets(None));
  }

  #[test]
  fn cause_is_preserved() {
    let err = fetch_error();
    assert_eq!(err.cause().to_string(), "chunk 404");
    assert_eq!(err.to_string(), "failed to fetch page code: chunk 404");
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("chunk 404"));
  }
}
