//! The ufs error taxonomy. Every distinct failure gets its own variant;
//! none are conflated.

/// A recoverable ufs failure. Every public `Ufs` method returns
/// `Result<_, Error>`; there is no partial mutation on failure, a
/// multi-step operation either completes in full or leaves state
/// untouched.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Null handle, null name, or a negative id where one must be
  /// non-negative.
  #[error("bad call")]
  BadCall,
  /// A namespace collision: the (parent, kind, name) or area name is
  /// already taken.
  #[error("already exists")]
  AlreadyExists,
  /// The target storage, area, or mapping is not present.
  #[error("does not exist")]
  DoesNotExist,
  /// The named parent directory is not present.
  #[error("parent does not exist")]
  ParentDoesNotExist,
  /// The parent id names a file, which cannot contain storage.
  #[error("parent can't be a file")]
  ParentCantBeFile,
  /// The directory still has children and cannot be removed.
  #[error("directory is not empty")]
  DirectoryIsNotEmpty,
  /// Dependency-tracker refusal: the target is referenced by an
  /// explicit mapping.
  #[error("exists in an explicit mapping")]
  ExistsInExplicitMapping,
  /// A reserved name (`ROOT` or `BASE`) was used where it is disallowed.
  #[error("illegal name")]
  IllegalName,
  /// A view referenced an area that is not present in the area registry.
  #[error("invalid area in view")]
  InvalidAreaInView,
  /// A view contained the same area more than once.
  #[error("view contains duplicate areas")]
  ViewContainsDuplicates,
  /// `BASE` appeared in a view somewhere other than the last position.
  #[error("BASE is not the last area in the view")]
  BaseIsNotLastArea,
  /// `probeMapping`'s negative result: well-formed, not a bug.
  #[error("mapping does not exist")]
  MappingDoesNotExist,
  /// The resolver walked the whole view without finding the storage.
  #[error("cannot resolve storage in view")]
  CannotResolveStorage,
  /// Any failure not covered by the variants above. Rust's global
  /// allocator aborts rather than returning a recoverable out-of-memory
  /// condition, so this has no reachable call site of its own; it
  /// exists to keep the taxonomy's shape complete.
  #[error("unknown error")]
  Unknown,
}

/// A `Copy` projection of [`Error`] plus the no-error outcome, modelling
/// the process-/instance-scoped status register: every `Ufs` operation,
/// successful ones included, updates it as a postcondition, independent
/// of the `Result` it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
  #[default]
  NoError,
  BadCall,
  AlreadyExists,
  DoesNotExist,
  ParentDoesNotExist,
  ParentCantBeFile,
  DirectoryIsNotEmpty,
  ExistsInExplicitMapping,
  IllegalName,
  InvalidAreaInView,
  ViewContainsDuplicates,
  BaseIsNotLastArea,
  MappingDoesNotExist,
  CannotResolveStorage,
  /// Distinct from `Unknown` upstream; no `Error` variant ever
  /// constructs this since Rust's allocator aborts on allocation
  /// failure rather than returning a recoverable error, but the status
  /// register keeps the code as its own value rather than folding it
  /// into `Unknown`.
  OutOfMemory,
  Unknown,
}

impl From<Error> for Status {
  fn from(err: Error) -> Self {
    match err {
      Error::BadCall => Status::BadCall,
      Error::AlreadyExists => Status::AlreadyExists,
      Error::DoesNotExist => Status::DoesNotExist,
      Error::ParentDoesNotExist => Status::ParentDoesNotExist,
      Error::ParentCantBeFile => Status::ParentCantBeFile,
      Error::DirectoryIsNotEmpty => Status::DirectoryIsNotEmpty,
      Error::ExistsInExplicitMapping => Status::ExistsInExplicitMapping,
      Error::IllegalName => Status::IllegalName,
      Error::InvalidAreaInView => Status::InvalidAreaInView,
      Error::ViewContainsDuplicates => Status::ViewContainsDuplicates,
      Error::BaseIsNotLastArea => Status::BaseIsNotLastArea,
      Error::MappingDoesNotExist => Status::MappingDoesNotExist,
      Error::CannotResolveStorage => Status::CannotResolveStorage,
      Error::Unknown => Status::Unknown,
    }
  }
}
