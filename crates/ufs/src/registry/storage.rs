//! The storage registry: the set of directories and files in ufs's
//! logical namespace.
//!
//! Names are unique only within `(parent, kind)`. Two files with the
//! same name under different directories are distinct, unrelated ids,
//! and a file and a directory may share a name under the same parent
//! since they occupy separate name scopes.

use std::collections::HashMap;

use camino::Utf8PathBuf;

use crate::error::Error;
use crate::ids::{IdAllocator, StorageId, ROOT};

/// The reserved directory name; disallowed for any storage entry.
pub const ROOT_NAME: &str = "ROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
  Directory,
  File,
}

#[derive(Debug, Clone)]
struct Entry {
  name: String,
  parent: StorageId,
  kind: StorageKind,
}

/// Directories and files, keyed by id, with a name index scoped to
/// `(parent, kind)` and a `directory -> children` reverse index: a
/// reverse index, not a table scan, is what keeps the directory
/// emptiness check on removal O(1).
#[derive(Debug, Default)]
pub struct StorageRegistry {
  entries: HashMap<StorageId, Entry>,
  by_name: HashMap<(StorageId, StorageKind, String), StorageId>,
  children: HashMap<StorageId, Vec<StorageId>>,
  alloc: IdAllocator,
}

impl StorageRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn exists(&self, id: StorageId) -> bool {
    id == ROOT || self.entries.contains_key(&id)
  }

  pub fn is_directory(&self, id: StorageId) -> bool {
    id == ROOT || matches!(self.entries.get(&id), Some(e) if e.kind == StorageKind::Directory)
  }

  pub fn is_file(&self, id: StorageId) -> bool {
    matches!(self.entries.get(&id), Some(e) if e.kind == StorageKind::File)
  }

  pub fn kind_of(&self, id: StorageId) -> Option<StorageKind> {
    if id == ROOT {
      return Some(StorageKind::Directory);
    }
    self.entries.get(&id).map(|e| e.kind)
  }

  pub fn name_of(&self, id: StorageId) -> Option<&str> {
    if id == ROOT {
      return Some(ROOT_NAME);
    }
    self.entries.get(&id).map(|e| e.name.as_str())
  }

  pub fn parent_of(&self, id: StorageId) -> Option<StorageId> {
    if id == ROOT {
      return None;
    }
    self.entries.get(&id).map(|e| e.parent)
  }

  /// The path to `id` built by walking parents up to `ROOT`, joining
  /// names along the way. Used to ask the external filesystem
  /// collaborator about the corresponding real-world path.
  pub fn path_of(&self, id: StorageId) -> Utf8PathBuf {
    let mut names = Vec::new();
    let mut current = id;

    while current != ROOT {
      let Some(entry) = self.entries.get(&current) else {
        break;
      };
      names.push(entry.name.clone());
      current = entry.parent;
    }

    names.reverse();
    names.into_iter().collect()
  }

  fn add(&mut self, parent: StorageId, name: &str, kind: StorageKind) -> Result<StorageId, Error> {
    if name.is_empty() {
      return Err(Error::BadCall);
    }
    if name == ROOT_NAME {
      return Err(Error::IllegalName);
    }
    if parent != ROOT {
      match self.entries.get(&parent) {
        None => return Err(Error::ParentDoesNotExist),
        Some(e) if e.kind == StorageKind::File => return Err(Error::ParentCantBeFile),
        Some(_) => {}
      }
    }

    let key = (parent, kind, name.to_owned());
    if self.by_name.contains_key(&key) {
      return Err(Error::AlreadyExists);
    }

    let id = StorageId(self.alloc.allocate());
    self.entries.insert(
      id,
      Entry {
        name: name.to_owned(),
        parent,
        kind,
      },
    );
    self.by_name.insert(key, id);
    self.children.entry(parent).or_default().push(id);

    log::debug!("storage: added {:?} {:?} under {:?} as {:?}", kind, name, parent, id);
    Ok(id)
  }

  pub fn add_directory(&mut self, parent: StorageId, name: &str) -> Result<StorageId, Error> {
    self.add(parent, name, StorageKind::Directory)
  }

  pub fn add_file(&mut self, parent: StorageId, name: &str) -> Result<StorageId, Error> {
    self.add(parent, name, StorageKind::File)
  }

  pub fn get(&self, parent: StorageId, name: &str, kind: StorageKind) -> Result<StorageId, Error> {
    if parent != ROOT && !self.entries.contains_key(&parent) {
      return Err(Error::ParentDoesNotExist);
    }
    self
      .by_name
      .get(&(parent, kind, name.to_owned()))
      .copied()
      .ok_or(Error::DoesNotExist)
  }

  /// Children of `dir`, files and directories alike. Both kinds count
  /// toward the "any child" emptiness rule.
  pub fn children_of(&self, dir: StorageId) -> &[StorageId] {
    self.children.get(&dir).map(Vec::as_slice).unwrap_or(&[])
  }

  fn detach(&mut self, id: StorageId) -> Entry {
    let entry = self.entries.remove(&id).expect("caller already checked existence");
    self
      .by_name
      .remove(&(entry.parent, entry.kind, entry.name.clone()));
    if let Some(siblings) = self.children.get_mut(&entry.parent) {
      siblings.retain(|&sibling| sibling != id);
    }
    self.children.remove(&id);
    entry
  }

  pub fn remove_directory(
    &mut self,
    id: StorageId,
    referenced_in_mapping: impl FnOnce(StorageId) -> bool,
  ) -> Result<(), Error> {
    match self.entries.get(&id) {
      None => return Err(Error::DoesNotExist),
      Some(e) if e.kind != StorageKind::Directory => return Err(Error::DoesNotExist),
      Some(_) => {}
    }
    if !self.children_of(id).is_empty() {
      return Err(Error::DirectoryIsNotEmpty);
    }
    if referenced_in_mapping(id) {
      return Err(Error::ExistsInExplicitMapping);
    }

    self.detach(id);
    log::debug!("storage: removed directory {:?}", id);
    Ok(())
  }

  pub fn remove_file(
    &mut self,
    id: StorageId,
    referenced_in_mapping: impl FnOnce(StorageId) -> bool,
  ) -> Result<(), Error> {
    match self.entries.get(&id) {
      None => return Err(Error::DoesNotExist),
      Some(e) if e.kind != StorageKind::File => return Err(Error::DoesNotExist),
      Some(_) => {}
    }
    if referenced_in_mapping(id) {
      return Err(Error::ExistsInExplicitMapping);
    }

    self.detach(id);
    log::debug!("storage: removed file {:?}", id);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn basic_add_get() {
    let mut reg = StorageRegistry::new();
    let d1 = reg.add_directory(ROOT, "d").unwrap();
    assert_eq!(reg.get(ROOT, "d", StorageKind::Directory).unwrap(), d1);
    let f1 = reg.add_file(d1, "f").unwrap();
    assert_eq!(reg.get(d1, "f", StorageKind::File).unwrap(), f1);
  }

  #[test]
  fn scope_uniqueness_across_different_parents() {
    let mut reg = StorageRegistry::new();
    let d1 = reg.add_directory(ROOT, "d1").unwrap();
    let d2 = reg.add_directory(ROOT, "d2").unwrap();
    let f1 = reg.add_file(d1, "f").unwrap();
    let f2 = reg.add_file(d2, "f").unwrap();
    assert_ne!(f1, f2);
  }

  #[test]
  fn parent_cant_be_file() {
    let mut reg = StorageRegistry::new();
    let x = reg.add_file(ROOT, "x").unwrap();
    assert_eq!(reg.add_directory(x, "y").unwrap_err(), Error::ParentCantBeFile);
  }

  #[test]
  fn reserved_root_name_rejected() {
    let mut reg = StorageRegistry::new();
    assert_eq!(reg.add_directory(ROOT, "ROOT").unwrap_err(), Error::IllegalName);
  }

  #[test]
  fn remove_then_readd_yields_fresh_id() {
    let mut reg = StorageRegistry::new();
    let d1 = reg.add_directory(ROOT, "d").unwrap();
    reg.remove_directory(d1, |_| false).unwrap();
    assert_eq!(reg.get(ROOT, "d", StorageKind::Directory).unwrap_err(), Error::DoesNotExist);
    let d2 = reg.add_directory(ROOT, "d").unwrap();
    assert_ne!(d1, d2);
  }

  #[test]
  fn directory_with_subdirectory_is_not_empty() {
    let mut reg = StorageRegistry::new();
    let d1 = reg.add_directory(ROOT, "d").unwrap();
    reg.add_directory(d1, "sub").unwrap();
    assert_eq!(reg.remove_directory(d1, |_| false).unwrap_err(), Error::DirectoryIsNotEmpty);
  }

  #[test]
  fn path_of_joins_ancestor_names() {
    let mut reg = StorageRegistry::new();
    let d1 = reg.add_directory(ROOT, "a").unwrap();
    let d2 = reg.add_directory(d1, "b").unwrap();
    let f1 = reg.add_file(d2, "c").unwrap();
    assert_eq!(reg.path_of(f1), Utf8PathBuf::from("a/b/c"));
  }
}
