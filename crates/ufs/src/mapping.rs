//! The explicit `(area, storage)` mapping relation and the dependency
//! tracker built on top of it.
//!
//! ```text
//!                                    area ----
//!                                             \
//!                    directory ----> file ----> explicit mapping
//!                              \             /
//!                               -------------
//! ```
//!
//! An edge `(A, B)` means `A` cannot be removed while it still depends
//! on something in `B`. Explicit mappings have no dependents of their
//! own and can always be removed freely. Implicit mappings (a storage
//! entry that appears in no explicit mapping is logically mapped to
//! `BASE`) place no removal constraint at all, because they are a
//! query-time rule rather than stored state.

use std::collections::{HashMap, HashSet};

use crate::error::Error;
use crate::ids::{AreaId, StorageId, BASE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Pair {
  area: AreaId,
  storage: StorageId,
}

/// The set of explicit `(area, storage)` pairs, with reverse indices
/// keyed by area and by storage so that dependency refusals and
/// resolution/iteration lookups are O(1) rather than table scans.
#[derive(Debug, Default)]
pub struct MappingTable {
  pairs: HashSet<Pair>,
  by_area: HashMap<AreaId, HashSet<StorageId>>,
  by_storage: HashMap<StorageId, HashSet<AreaId>>,
}

impl MappingTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, area: AreaId, storage: StorageId) -> Result<(), Error> {
    if area == BASE {
      return Err(Error::BadCall);
    }

    let pair = Pair { area, storage };
    if !self.pairs.insert(pair) {
      return Err(Error::AlreadyExists);
    }

    self.by_area.entry(area).or_default().insert(storage);
    self.by_storage.entry(storage).or_default().insert(area);

    log::debug!("mapping: added ({:?}, {:?})", area, storage);
    Ok(())
  }

  pub fn remove(&mut self, area: AreaId, storage: StorageId) -> Result<(), Error> {
    let pair = Pair { area, storage };
    if !self.pairs.remove(&pair) {
      return Err(Error::MappingDoesNotExist);
    }

    if let Some(set) = self.by_area.get_mut(&area) {
      set.remove(&storage);
    }
    if let Some(set) = self.by_storage.get_mut(&storage) {
      set.remove(&area);
    }

    log::debug!("mapping: removed ({:?}, {:?})", area, storage);
    Ok(())
  }

  pub fn contains(&self, area: AreaId, storage: StorageId) -> bool {
    self.pairs.contains(&Pair { area, storage })
  }

  /// Whether `storage` appears in any explicit mapping; the dependency
  /// tracker's refusal predicate for directory/file removal.
  pub fn storage_is_referenced(&self, storage: StorageId) -> bool {
    self.by_storage.get(&storage).is_some_and(|areas| !areas.is_empty())
  }

  /// Whether `area` appears in any explicit mapping; the dependency
  /// tracker's refusal predicate for area removal.
  pub fn area_is_referenced(&self, area: AreaId) -> bool {
    self.by_area.get(&area).is_some_and(|storages| !storages.is_empty())
  }

  /// The implicit-mapping-to-`BASE` predicate: true when `storage`
  /// appears in no explicit mapping at all. Never materialized as a
  /// stored record.
  pub fn is_implicitly_mapped_to_base(&self, storage: StorageId) -> bool {
    !self.storage_is_referenced(storage)
  }

  /// Storage ids `area` explicitly maps, for iteration/collapse.
  pub fn storages_of(&self, area: AreaId) -> impl Iterator<Item = StorageId> + '_ {
    self.by_area.get(&area).into_iter().flatten().copied()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn add_then_probe_round_trips() {
    let mut table = MappingTable::new();
    let a = AreaId(1);
    let s = StorageId(1);
    table.add(a, s).unwrap();
    assert!(table.contains(a, s));
  }

  #[test]
  fn remove_is_not_idempotent() {
    let mut table = MappingTable::new();
    let a = AreaId(1);
    let s = StorageId(1);
    table.add(a, s).unwrap();
    table.remove(a, s).unwrap();
    assert_eq!(table.remove(a, s).unwrap_err(), Error::MappingDoesNotExist);
  }

  #[test]
  fn base_cannot_appear_as_an_area() {
    let mut table = MappingTable::new();
    assert_eq!(table.add(BASE, StorageId(1)).unwrap_err(), Error::BadCall);
  }

  #[test]
  fn unreferenced_storage_is_implicitly_base() {
    let mut table = MappingTable::new();
    let s = StorageId(7);
    assert!(table.is_implicitly_mapped_to_base(s));
    table.add(AreaId(1), s).unwrap();
    assert!(!table.is_implicitly_mapped_to_base(s));
  }

  #[test]
  fn duplicate_add_rejected() {
    let mut table = MappingTable::new();
    let a = AreaId(1);
    let s = StorageId(1);
    table.add(a, s).unwrap();
    assert_eq!(table.add(a, s).unwrap_err(), Error::AlreadyExists);
  }
}
