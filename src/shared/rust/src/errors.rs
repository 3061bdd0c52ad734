/* src/shared/rust/src/errors.rs */

use std::fmt;

/// Distinguishes user misconfiguration from broken internal wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Wrong value type, invalid file path, illegal placement, conflicting overrides.
  Usage,
  /// An invariant that upstream wiring should have guaranteed did not hold.
  Bug,
}

#[derive(Debug)]
pub struct TrellisError {
  kind: ErrorKind,
  message: String,
}

impl TrellisError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self { kind, message: message.into() }
  }

  pub fn usage(msg: impl Into<String>) -> Self {
    Self::new(ErrorKind::Usage, msg)
  }

  pub fn bug(msg: impl Into<String>) -> Self {
    Self::new(ErrorKind::Bug, msg)
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn is_usage(&self) -> bool {
    self.kind == ErrorKind::Usage
  }

  pub fn is_bug(&self) -> bool {
    self.kind == ErrorKind::Bug
  }
}

impl fmt::Display for TrellisError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ErrorKind::Usage => write!(f, "[trellis][Wrong Usage] {}", self.message),
      ErrorKind::Bug => write!(f, "[trellis][Bug] {}", self.message),
    }
  }
}

impl std::error::Error for TrellisError {}

pub type Result<T, E = TrellisError> = std::result::Result<T, E>;
