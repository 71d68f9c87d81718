//! The external filesystem collaborator.
//!
//! ufs never reads or writes real file contents, and it never lists a
//! real directory by itself. When a view's terminal area is `BASE` the
//! core dispatches into this small capability instead. Treat the call as
//! a blocking boundary: the core has no cancellation surface of its own.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::Error;

/// A storage kind as seen from the external filesystem side of the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalKind {
  Directory,
  File,
}

/// One entry `collapse` asks the external filesystem to materialize
/// when collapsing into `BASE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeEntry {
  pub parent: Utf8PathBuf,
  pub name: String,
  pub kind: ExternalKind,
}

/// The capability the core delegates to whenever a view's terminal area
/// is `BASE`: existence checks, child listing, and materialization. The
/// core holds no filesystem handle of its own; everything it knows about
/// the outside world comes through here.
pub trait ExternalFs {
  /// The external fallback used when a storage path needs confirming
  /// against the real filesystem.
  fn exists(&self, path: &Utf8Path) -> bool;

  /// Called during BASE-tail iteration.
  fn list_children(&self, path: &Utf8Path) -> Vec<String>;

  /// Called during collapse into `BASE`.
  fn materialize(&mut self, entries: &[MaterializeEntry]) -> Result<(), Error>;
}

/// An `ExternalFs` with nothing behind it: `BASE` resolves and iterates
/// to nothing, and collapsing into it is a no-op. The default for
/// instances that never intend to touch a real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExternalFs;

impl ExternalFs for NullExternalFs {
  fn exists(&self, _path: &Utf8Path) -> bool {
    false
  }

  fn list_children(&self, _path: &Utf8Path) -> Vec<String> {
    Vec::new()
  }

  fn materialize(&mut self, _entries: &[MaterializeEntry]) -> Result<(), Error> {
    Ok(())
  }
}

/// Records every `materialize` payload instead of touching a disk, so
/// tests can assert on what would have been written without touching a
/// real disk.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct FakeExternalFs {
  pub children: std::collections::HashMap<Utf8PathBuf, Vec<String>>,
  pub materialized: Vec<MaterializeEntry>,
}

#[cfg(any(test, feature = "testing"))]
impl FakeExternalFs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_children(mut self, path: impl Into<Utf8PathBuf>, names: Vec<String>) -> Self {
    self.children.insert(path.into(), names);
    self
  }
}

#[cfg(any(test, feature = "testing"))]
impl ExternalFs for FakeExternalFs {
  fn exists(&self, path: &Utf8Path) -> bool {
    self.children.contains_key(path)
  }

  fn list_children(&self, path: &Utf8Path) -> Vec<String> {
    self.children.get(path).cloned().unwrap_or_default()
  }

  fn materialize(&mut self, entries: &[MaterializeEntry]) -> Result<(), Error> {
    self.materialized.extend_from_slice(entries);
    Ok(())
  }
}
