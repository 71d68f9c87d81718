//! `ufs`, the core of a union filesystem overlay.
//!
//! ufs does not read or write file contents. It maintains a logical
//! namespace of directories and files (*storage*), a parallel namespace
//! of named projections over that storage (*areas*), and an explicit
//! relation between the two (*mappings*). Clients query the model
//! through a *view*, an ordered, duplicate-free list of areas, and the
//! core answers two questions: which area shadows a given storage entry
//! first ([`Ufs::resolve_storage_in_view`]), and which storage entries
//! are visible under a directory through that view
//! ([`Ufs::iterate_dir_in_view`]). [`Ufs::collapse`] materializes a view
//! into its terminal area.
//!
//! Persistence, CLI surfaces, and the real external filesystem are
//! deliberately out of scope here. See [`external`] for the capability
//! boundary the core dispatches into whenever a view's terminal area is
//! the reserved `BASE` pseudo-area.

pub mod error;
pub mod external;
pub mod ids;
pub mod view;

mod collapse;
mod iterate;
mod mapping;
mod registry;
mod resolve;

use std::cell::Cell;

use camino::Utf8PathBuf;

pub use error::{Error, Status};
pub use ids::{AreaId, StorageId, BASE, ROOT};
pub use iterate::VisibleChild;
pub use mapping::MappingTable;
pub use view::{View, MAX_VIEW};

use external::{ExternalFs, NullExternalFs};
use registry::area::AreaRegistry;
use registry::storage::{StorageKind, StorageRegistry};

/// Result of [`Ufs::probe_mapping`]. Unlike the other operations,
/// `DoesNotExist` here is a well-formed answer rather than a bug: the
/// call still returns `Ok`, it just carries a negative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingProbe {
  Exists,
  DoesNotExist,
}

/// Instance-level configuration. The only knob exposed is the view
/// capacity (`UFS_VIEW_MAX_SIZE` upstream); [`Ufs::new`] uses
/// [`MAX_VIEW`], [`Ufs::with_external`] lets callers (notably tests
/// exercising small views) override it.
#[derive(Debug, Clone, Copy)]
pub struct UfsOptions {
  pub max_view: usize,
}

impl Default for UfsOptions {
  fn default() -> Self {
    Self { max_view: MAX_VIEW }
  }
}

/// A ufs instance: the logical namespace, the area namespace, the
/// mapping table, and the external filesystem collaborator, all owned
/// exclusively by this value. A view is never part of that state. It is
/// a borrowed parameter, re-validated on every call.
///
/// `Ufs` assumes a single writer; concurrent mutation from multiple
/// threads is not supported, though multiple readers between writes are
/// fine if the host serializes calls externally.
pub struct Ufs<E: ExternalFs = NullExternalFs> {
  options: UfsOptions,
  storage: StorageRegistry,
  areas: AreaRegistry,
  mapping: MappingTable,
  external: E,
  last_status: Cell<Status>,
}

impl Ufs<NullExternalFs> {
  /// Initializes a fresh instance with no external filesystem behind
  /// `BASE` and the default view capacity. `ROOT` and `BASE` are usable
  /// immediately, there is nothing further to set up for either.
  pub fn new() -> Self {
    Self::with_external(NullExternalFs, UfsOptions::default())
  }
}

impl Default for Ufs<NullExternalFs> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: ExternalFs> Ufs<E> {
  /// Initializes a fresh instance backed by the given external
  /// filesystem collaborator.
  pub fn with_external(external: E, options: UfsOptions) -> Self {
    Self {
      options,
      storage: StorageRegistry::new(),
      areas: AreaRegistry::new(),
      mapping: MappingTable::new(),
      external,
      last_status: Cell::new(Status::NoError),
    }
  }

  /// The process-/instance-scoped error indicator: every operation,
  /// success included, updates this as its last side effect.
  pub fn last_status(&self) -> Status {
    self.last_status.get()
  }

  fn finish<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
    self.last_status.set(match &result {
      Ok(_) => Status::NoError,
      Err(err) => Status::from(*err),
    });
    result
  }

  fn validate_view(&self, view: View<'_>) -> Result<(), Error> {
    view.validate(self.options.max_view, |area| self.areas.exists(area))
  }

  // ---- Storage Registry -----------------------------------

  pub fn add_directory(&mut self, parent: StorageId, name: &str) -> Result<StorageId, Error> {
    let result = self.storage.add_directory(parent, name);
    self.finish(result)
  }

  pub fn add_file(&mut self, parent: StorageId, name: &str) -> Result<StorageId, Error> {
    let result = self.storage.add_file(parent, name);
    self.finish(result)
  }

  pub fn get_directory(&self, parent: StorageId, name: &str) -> Result<StorageId, Error> {
    let result = self.storage.get(parent, name, StorageKind::Directory);
    self.finish(result)
  }

  pub fn get_file(&self, parent: StorageId, name: &str) -> Result<StorageId, Error> {
    let result = self.storage.get(parent, name, StorageKind::File);
    self.finish(result)
  }

  pub fn remove_directory(&mut self, id: StorageId) -> Result<(), Error> {
    let mapping = &self.mapping;
    let result = self
      .storage
      .remove_directory(id, |storage| mapping.storage_is_referenced(storage));
    self.finish(result)
  }

  pub fn remove_file(&mut self, id: StorageId) -> Result<(), Error> {
    let mapping = &self.mapping;
    let result = self.storage.remove_file(id, |storage| mapping.storage_is_referenced(storage));
    self.finish(result)
  }

  // ---- Area Registry ---------------------------------------

  pub fn add_area(&mut self, name: &str) -> Result<AreaId, Error> {
    let result = self.areas.add(name);
    self.finish(result)
  }

  pub fn get_area(&self, name: &str) -> Result<AreaId, Error> {
    let result = self.areas.get(name);
    self.finish(result)
  }

  pub fn remove_area(&mut self, id: AreaId) -> Result<(), Error> {
    let mapping = &self.mapping;
    let result = self.areas.remove(id, |area| mapping.area_is_referenced(area));
    self.finish(result)
  }

  // ---- Mapping Table ----------------------------------------

  fn check_mapping_endpoints(&self, area: AreaId, storage: StorageId) -> Result<(), Error> {
    if !self.areas.exists(area) || !self.storage.exists(storage) {
      return Err(Error::DoesNotExist);
    }
    Ok(())
  }

  pub fn add_mapping(&mut self, area: AreaId, storage: StorageId) -> Result<(), Error> {
    let result = self
      .check_mapping_endpoints(area, storage)
      .and_then(|()| self.mapping.add(area, storage));
    self.finish(result)
  }

  pub fn remove_mapping(&mut self, area: AreaId, storage: StorageId) -> Result<(), Error> {
    let result = self.mapping.remove(area, storage);
    self.finish(result)
  }

  pub fn probe_mapping(&self, area: AreaId, storage: StorageId) -> Result<MappingProbe, Error> {
    if let Err(err) = self.check_mapping_endpoints(area, storage) {
      return self.finish(Err(err));
    }

    if self.mapping.contains(area, storage) {
      self.last_status.set(Status::NoError);
      Ok(MappingProbe::Exists)
    } else {
      self.last_status.set(Status::MappingDoesNotExist);
      Ok(MappingProbe::DoesNotExist)
    }
  }

  // ---- Resolver ----------------------------------------------

  pub fn resolve_storage_in_view(&self, view: View<'_>, storage: StorageId) -> Result<AreaId, Error> {
    let result = self
      .validate_view(view)
      .and_then(|()| {
        if self.storage.exists(storage) {
          Ok(())
        } else {
          Err(Error::DoesNotExist)
        }
      })
      .and_then(|()| resolve::resolve(view, &self.mapping, storage));
    self.finish(result)
  }

  // ---- Directory Iterator -------------------------------------

  pub fn iterate_dir_in_view(
    &self,
    view: View<'_>,
    directory: StorageId,
    callback: impl FnMut(&VisibleChild, u64, u64) -> Result<(), Error>,
  ) -> Result<(), Error> {
    let result = self
      .validate_view(view)
      .and_then(|()| {
        if self.storage.is_directory(directory) {
          Ok(())
        } else {
          Err(Error::DoesNotExist)
        }
      })
      .and_then(|()| {
        let path = self.storage.path_of(directory);
        iterate::iterate(view, &self.storage, &self.mapping, &self.external, directory, &path, callback)
      });
    self.finish(result)
  }

  // ---- Collapse Engine -----------------------------------------

  pub fn collapse(&mut self, view: View<'_>) -> Result<(), Error> {
    let result = self
      .validate_view(view)
      .and_then(|()| collapse::collapse(view, &self.storage, &mut self.mapping, &mut self.external));
    self.finish(result)
  }

  /// The path a storage entry would have on the external filesystem,
  /// joining ancestor names up to `ROOT`. Exposed so callers building
  /// their own `ExternalFs` can correlate storage ids with paths the
  /// same way the core does internally.
  pub fn path_of(&self, id: StorageId) -> Utf8PathBuf {
    self.storage.path_of(id)
  }
}
