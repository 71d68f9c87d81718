//! Client-supplied views: ordered, duplicate-free sequences of areas
//! used to resolve or enumerate storage.
//!
//! A view is a borrowed, immutable parameter. ufs reads and validates it
//! on every use and never stores a copy across calls. Caching a
//! canonical form would only invite a view to go stale the moment one of
//! its areas is removed.

use std::collections::HashSet;

use crate::error::Error;
use crate::ids::{AreaId, BASE};

/// Default cap on how many areas a view may carry, mirroring
/// `UFS_VIEW_MAX_SIZE` from the system this core was distilled from.
/// [`crate::UfsOptions`] can override it per instance.
pub const MAX_VIEW: usize = 4096;

/// An ordered, duplicate-free sequence of areas. The left-most area
/// wins when resolving storage.
///
/// The wire format this mirrors is a fixed-capacity array terminated by
/// a sentinel; a Rust slice already carries its own length, so there is
/// no terminator to parse here. `View::new` takes exactly the areas a
/// caller intends, BASE included if the view is meant to shadow the
/// external filesystem.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
  areas: &'a [AreaId],
}

impl<'a> View<'a> {
  /// Wraps a slice of area ids as a view. Validity is checked lazily,
  /// on first use by the core. Constructing a `View` never fails.
  pub fn new(areas: &'a [AreaId]) -> Self {
    Self { areas }
  }

  /// The empty view: valid, resolves nothing, iterates to an empty
  /// union.
  pub fn empty() -> Self {
    Self { areas: &[] }
  }

  /// The areas in this view, in order.
  pub fn areas(&self) -> &'a [AreaId] {
    self.areas
  }

  pub fn is_empty(&self) -> bool {
    self.areas.is_empty()
  }

  /// The last area in the view (the collapse terminal), if any.
  pub fn terminal(&self) -> Option<AreaId> {
    self.areas.last().copied()
  }

  /// Every area preceding the terminal, i.e. the view with its last
  /// area removed.
  pub fn preceding(&self) -> &'a [AreaId] {
    match self.areas.split_last() {
      Some((_, rest)) => rest,
      None => &[],
    }
  }

  /// Validates this view: size, duplicates, BASE position, then area
  /// existence, in that order.
  pub(crate) fn validate(
    &self,
    max_view: usize,
    area_exists: impl Fn(AreaId) -> bool,
  ) -> Result<(), Error> {
    if self.areas.len() > max_view {
      return Err(Error::BadCall);
    }

    let mut seen = HashSet::with_capacity(self.areas.len());
    for &area in self.areas {
      if !seen.insert(area) {
        return Err(Error::ViewContainsDuplicates);
      }
    }

    if let Some(pos) = self.areas.iter().position(|&a| a == BASE) {
      if pos != self.areas.len() - 1 {
        return Err(Error::BaseIsNotLastArea);
      }
    }

    for &area in self.areas {
      if area != BASE && !area_exists(area) {
        return Err(Error::InvalidAreaInView);
      }
    }

    Ok(())
  }
}

impl<'a> From<&'a [AreaId]> for View<'a> {
  fn from(areas: &'a [AreaId]) -> Self {
    Self::new(areas)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn exists(known: &[AreaId]) -> impl Fn(AreaId) -> bool + '_ {
    move |id| known.contains(&id)
  }

  #[test]
  fn empty_view_is_valid() {
    let view = View::empty();
    assert!(view.validate(MAX_VIEW, exists(&[])).is_ok());
  }

  #[test]
  fn rejects_duplicates() {
    let a = AreaId(1);
    let view = View::new(&[a, a]);
    assert_eq!(
      view.validate(MAX_VIEW, exists(&[a])).unwrap_err(),
      Error::ViewContainsDuplicates
    );
  }

  #[test]
  fn rejects_base_not_last() {
    let a = AreaId(1);
    let view = View::new(&[BASE, a]);
    assert_eq!(
      view.validate(MAX_VIEW, exists(&[a])).unwrap_err(),
      Error::BaseIsNotLastArea
    );
  }

  #[test]
  fn base_last_is_fine() {
    let a = AreaId(1);
    let view = View::new(&[a, BASE]);
    assert!(view.validate(MAX_VIEW, exists(&[a])).is_ok());
  }

  #[test]
  fn rejects_unknown_area() {
    let a = AreaId(1);
    let view = View::new(&[a]);
    assert_eq!(
      view.validate(MAX_VIEW, exists(&[])).unwrap_err(),
      Error::InvalidAreaInView
    );
  }

  #[test]
  fn preceding_excludes_terminal() {
    let a = AreaId(1);
    let b = AreaId(2);
    let view = View::new(&[a, b]);
    assert_eq!(view.terminal(), Some(b));
    assert_eq!(view.preceding(), &[a]);
  }
}
