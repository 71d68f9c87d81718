//! The directory iterator: the deduplicated union of children visible
//! under a directory through a view.
//!
//! Order is unspecified. The semantics are a set union, not an ordered
//! union. The total entry count must be known before the first callback
//! invocation, so the visible set is always materialized in full before
//! any callback runs.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::Error;
use crate::external::ExternalFs;
use crate::ids::{StorageId, BASE};
use crate::mapping::MappingTable;
use crate::registry::storage::StorageRegistry;
use crate::view::View;

/// One entry visible under a directory through a view: either a storage
/// entry already known to the registry, or a name the external
/// filesystem collaborator reports under a `BASE`-tailed view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VisibleChild {
  Storage(StorageId),
  External(String),
}

pub(crate) fn iterate(
  view: View<'_>,
  storage: &StorageRegistry,
  mapping: &MappingTable,
  external: &dyn ExternalFs,
  directory: StorageId,
  directory_path: &Utf8Path,
  mut callback: impl FnMut(&VisibleChild, u64, u64) -> Result<(), Error>,
) -> Result<(), Error> {
  let children = storage.children_of(directory);
  let mut visible: Vec<StorageId> = Vec::new();
  let mut seen: HashSet<StorageId> = HashSet::new();

  for &area in view.areas() {
    if area == BASE {
      for &child in children {
        if mapping.is_implicitly_mapped_to_base(child) && seen.insert(child) {
          visible.push(child);
        }
      }
    } else {
      for &child in children {
        if mapping.contains(area, child) && seen.insert(child) {
          visible.push(child);
        }
      }
    }
  }

  let mut external_names: Vec<String> = Vec::new();
  if view.terminal() == Some(BASE) {
    let known_names: HashSet<&str> = visible.iter().filter_map(|&id| storage.name_of(id)).collect();
    for name in external.list_children(directory_path) {
      if !known_names.contains(name.as_str()) {
        external_names.push(name);
      }
    }
  }

  let entries: Vec<VisibleChild> = visible
    .into_iter()
    .map(VisibleChild::Storage)
    .chain(external_names.into_iter().map(VisibleChild::External))
    .collect();

  let total = entries.len() as u64;

  for (index, entry) in entries.iter().enumerate() {
    callback(entry, index as u64, total)?;
  }

  Ok(())
}
