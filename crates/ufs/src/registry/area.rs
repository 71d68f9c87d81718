//! The area registry: named projections over storage. `BASE` is
//! reserved and never gets a row here; it is a pseudo-area recognised
//! purely by its identifier, `AreaId(0)`.

use std::collections::HashMap;

use crate::error::Error;
use crate::ids::{AreaId, IdAllocator};

/// The reserved area name; disallowed for any added area.
pub const BASE_NAME: &str = "BASE";

#[derive(Debug, Default)]
pub struct AreaRegistry {
  names: HashMap<String, AreaId>,
  ids: HashMap<AreaId, String>,
  alloc: IdAllocator,
}

impl AreaRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn exists(&self, id: AreaId) -> bool {
    self.ids.contains_key(&id)
  }

  pub fn add(&mut self, name: &str) -> Result<AreaId, Error> {
    if name.is_empty() {
      return Err(Error::BadCall);
    }
    if name == BASE_NAME {
      return Err(Error::IllegalName);
    }
    if self.names.contains_key(name) {
      return Err(Error::AlreadyExists);
    }

    let id = AreaId(self.alloc.allocate());
    self.names.insert(name.to_owned(), id);
    self.ids.insert(id, name.to_owned());

    log::debug!("area: added {:?} as {:?}", name, id);
    Ok(id)
  }

  pub fn get(&self, name: &str) -> Result<AreaId, Error> {
    self.names.get(name).copied().ok_or(Error::DoesNotExist)
  }

  pub fn remove(
    &mut self,
    id: AreaId,
    referenced_in_mapping: impl FnOnce(AreaId) -> bool,
  ) -> Result<(), Error> {
    if !self.ids.contains_key(&id) {
      return Err(Error::DoesNotExist);
    }
    if referenced_in_mapping(id) {
      return Err(Error::ExistsInExplicitMapping);
    }

    let name = self.ids.remove(&id).expect("checked above");
    self.names.remove(&name);

    log::debug!("area: removed {:?}", id);
    Ok(())
  }
}
