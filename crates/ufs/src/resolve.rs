//! The resolver: "which area in a view is the first to project this
//! storage?"

use crate::error::Error;
use crate::ids::{AreaId, StorageId, BASE};
use crate::mapping::MappingTable;
use crate::view::View;

/// Walks `view` front-to-back looking for the first area that projects
/// `storage`, either explicitly or (for `BASE`) implicitly. The order of
/// the view is the tie-break: whichever area gets there first wins.
pub(crate) fn resolve(view: View<'_>, mapping: &MappingTable, storage: StorageId) -> Result<AreaId, Error> {
  for &area in view.areas() {
    if area == BASE {
      log::trace!("resolve: {:?} falls through to BASE", storage);
      return Ok(BASE);
    }
    if mapping.contains(area, storage) {
      log::trace!("resolve: {:?} resolved to {:?}", storage, area);
      return Ok(area);
    }
  }

  Err(Error::CannotResolveStorage)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_to_explicit_mapping_before_base() {
    let mut mapping = MappingTable::new();
    let a1 = AreaId(1);
    let a2 = AreaId(2);
    let s = StorageId(1);
    mapping.add(a2, s).unwrap();

    let view = View::new(&[a1, a2, BASE]);
    assert_eq!(resolve(view, &mapping, s).unwrap(), a2);
  }

  #[test]
  fn falls_through_to_base_when_unmapped() {
    let mapping = MappingTable::new();
    let a1 = AreaId(1);
    let s = StorageId(1);

    let view = View::new(&[a1, BASE]);
    assert_eq!(resolve(view, &mapping, s).unwrap(), BASE);
  }

  #[test]
  fn fails_without_base_or_a_mapping() {
    let mapping = MappingTable::new();
    let a1 = AreaId(1);
    let s = StorageId(1);

    let view = View::new(&[a1]);
    assert_eq!(resolve(view, &mapping, s).unwrap_err(), Error::CannotResolveStorage);
  }
}
