//! The collapse engine: promote or materialize a view's mappings into
//! its terminal area.

use crate::error::Error;
use crate::external::{ExternalFs, ExternalKind, MaterializeEntry};
use crate::ids::{AreaId, BASE};
use crate::mapping::MappingTable;
use crate::registry::storage::{StorageKind, StorageRegistry};
use crate::view::View;

pub(crate) fn collapse(
  view: View<'_>,
  storage: &StorageRegistry,
  mapping: &mut MappingTable,
  external: &mut dyn ExternalFs,
) -> Result<(), Error> {
  let terminal = view.terminal().ok_or(Error::BadCall)?;
  let preceding = view.preceding();

  if terminal == BASE {
    collapse_into_base(preceding, storage, mapping, external)
  } else {
    collapse_into_area(preceding, terminal, mapping)
  }
}

fn collapse_into_base(
  preceding: &[AreaId],
  storage: &StorageRegistry,
  mapping: &mut MappingTable,
  external: &mut dyn ExternalFs,
) -> Result<(), Error> {
  let mut entries = Vec::new();
  let mut consumed = Vec::new();

  for &area in preceding {
    for storage_id in mapping.storages_of(area).collect::<Vec<_>>() {
      let Some(parent) = storage.parent_of(storage_id) else {
        continue;
      };
      let Some(name) = storage.name_of(storage_id) else {
        continue;
      };
      let kind = match storage.kind_of(storage_id) {
        Some(StorageKind::Directory) => ExternalKind::Directory,
        Some(StorageKind::File) | None => ExternalKind::File,
      };

      entries.push(MaterializeEntry {
        parent: storage.path_of(parent),
        name: name.to_owned(),
        kind,
      });
      consumed.push((area, storage_id));
    }
  }

  external.materialize(&entries)?;

  // The mappings are consumed: once materialized, the union is
  // observable through `[BASE, ...]` alone.
  for (area, storage_id) in consumed {
    mapping.remove(area, storage_id).ok();
  }

  log::info!("collapse: materialized {} entries into BASE", entries.len());
  Ok(())
}

fn collapse_into_area(preceding: &[AreaId], terminal: AreaId, mapping: &mut MappingTable) -> Result<(), Error> {
  for &area in preceding {
    for storage_id in mapping.storages_of(area).collect::<Vec<_>>() {
      match mapping.add(terminal, storage_id) {
        Ok(()) | Err(Error::AlreadyExists) => {}
        Err(other) => return Err(other),
      }
    }
  }

  // Preceding mappings are promoted, not removed; empty them with
  // `remove_mapping`.
  log::info!("collapse: promoted mappings into {:?}", terminal);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::external::{FakeExternalFs, NullExternalFs};
  use crate::ids::ROOT;

  #[test]
  fn collapse_into_area_promotes_without_removing_preceding() {
    let mut storage = StorageRegistry::new();
    let f = storage.add_file(ROOT, "f").unwrap();

    let mut mapping = MappingTable::new();
    let a = AreaId(1);
    let t = AreaId(2);
    mapping.add(a, f).unwrap();

    let mut external = NullExternalFs;
    let view = View::new(&[a, t]);
    collapse(view, &storage, &mut mapping, &mut external).unwrap();

    assert!(mapping.contains(t, f));
    assert!(mapping.contains(a, f));
  }

  #[test]
  fn collapse_into_base_materializes_and_consumes() {
    let mut storage = StorageRegistry::new();
    let f = storage.add_file(ROOT, "f").unwrap();

    let mut mapping = MappingTable::new();
    let a = AreaId(1);
    mapping.add(a, f).unwrap();

    let mut external = FakeExternalFs::new();
    let view = View::new(&[a, BASE]);
    collapse(view, &storage, &mut mapping, &mut external).unwrap();

    assert_eq!(external.materialized.len(), 1);
    assert_eq!(external.materialized[0].name, "f");
    assert!(!mapping.contains(a, f));
  }
}
