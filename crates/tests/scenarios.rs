use std::collections::HashSet;

use ufs::{Error, MappingProbe, Ufs, View, AreaId, BASE, ROOT};

#[test]
fn basic_add_get() {
  let mut ufs = Ufs::new();
  let d1 = ufs.add_directory(ROOT, "d").unwrap();
  assert_eq!(ufs.get_directory(ROOT, "d").unwrap(), d1);
  let f1 = ufs.add_file(d1, "f").unwrap();
  assert_eq!(ufs.get_file(d1, "f").unwrap(), f1);
}

#[test]
fn scope_uniqueness() {
  let mut ufs = Ufs::new();
  let d1 = ufs.add_directory(ROOT, "d1").unwrap();
  let d2 = ufs.add_directory(ROOT, "d2").unwrap();
  let f1 = ufs.add_file(d1, "f").unwrap();
  let f2 = ufs.add_file(d2, "f").unwrap();
  assert_ne!(f1, f2);
}

#[test]
fn removal_dependency_refusal() {
  let mut ufs = Ufs::new();
  let a1 = ufs.add_area("a").unwrap();
  let d1 = ufs.add_directory(ROOT, "d").unwrap();
  ufs.add_mapping(a1, d1).unwrap();

  assert_eq!(ufs.remove_directory(d1).unwrap_err(), Error::ExistsInExplicitMapping);
  assert_eq!(ufs.remove_area(a1).unwrap_err(), Error::ExistsInExplicitMapping);

  ufs.remove_mapping(a1, d1).unwrap();

  ufs.remove_directory(d1).unwrap();
  ufs.remove_area(a1).unwrap();
}

#[test]
fn view_resolution() {
  let mut ufs = Ufs::new();
  let a1 = ufs.add_area("a").unwrap();
  let a2 = ufs.add_area("b").unwrap();
  let d1 = ufs.add_directory(ROOT, "d").unwrap();
  let f1 = ufs.add_file(d1, "f").unwrap();
  ufs.add_mapping(a2, f1).unwrap();

  let view = View::new(&[a1, a2, BASE]);
  assert_eq!(ufs.resolve_storage_in_view(view, f1).unwrap(), a2);

  let view = View::new(&[a1, BASE]);
  assert_eq!(ufs.resolve_storage_in_view(view, f1).unwrap(), BASE);

  let view = View::new(&[a1]);
  assert_eq!(
    ufs.resolve_storage_in_view(view, f1).unwrap_err(),
    Error::CannotResolveStorage
  );
}

#[test]
fn view_validation() {
  let mut ufs = Ufs::new();
  let a1 = ufs.add_area("a").unwrap();
  let f1 = ufs.add_file(ROOT, "f").unwrap();

  let view = View::new(&[a1, a1]);
  assert_eq!(
    ufs.resolve_storage_in_view(view, f1).unwrap_err(),
    Error::ViewContainsDuplicates
  );

  let view = View::new(&[BASE, a1]);
  assert_eq!(
    ufs.resolve_storage_in_view(view, f1).unwrap_err(),
    Error::BaseIsNotLastArea
  );

  let unknown = AreaId(9999);
  let view = View::new(&[unknown]);
  assert_eq!(
    ufs.resolve_storage_in_view(view, f1).unwrap_err(),
    Error::InvalidAreaInView
  );
}

#[test]
fn directory_iteration_union() {
  let mut ufs = Ufs::new();
  let a = ufs.add_area("a").unwrap();
  let b = ufs.add_area("b").unwrap();
  let d = ufs.add_directory(ROOT, "d").unwrap();
  let f1 = ufs.add_file(d, "f1").unwrap();
  let f2 = ufs.add_file(d, "f2").unwrap();
  let f3 = ufs.add_file(d, "f3").unwrap();
  ufs.add_mapping(a, f1).unwrap();
  ufs.add_mapping(b, f2).unwrap();

  let mut seen = HashSet::new();
  let view = View::new(&[a, b]);
  ufs
    .iterate_dir_in_view(view, d, |entry, _, _| {
      if let ufs::VisibleChild::Storage(id) = entry {
        seen.insert(*id);
      }
      Ok(())
    })
    .unwrap();
  assert_eq!(seen, HashSet::from([f1, f2]));

  let mut seen = HashSet::new();
  let view = View::new(&[a, b, BASE]);
  ufs
    .iterate_dir_in_view(view, d, |entry, _, _| {
      if let ufs::VisibleChild::Storage(id) = entry {
        seen.insert(*id);
      }
      Ok(())
    })
    .unwrap();
  assert_eq!(seen, HashSet::from([f1, f2, f3]));
}

#[test]
fn reserved_name_rejection() {
  let mut ufs = Ufs::new();
  assert_eq!(ufs.add_area("BASE").unwrap_err(), Error::IllegalName);
  assert_eq!(ufs.add_directory(ROOT, "ROOT").unwrap_err(), Error::IllegalName);
}

#[test]
fn parent_must_not_be_a_file() {
  let mut ufs = Ufs::new();
  let x = ufs.add_file(ROOT, "x").unwrap();
  assert_eq!(ufs.add_directory(x, "y").unwrap_err(), Error::ParentCantBeFile);
}

#[test]
fn probe_mapping_round_trip() {
  let mut ufs = Ufs::new();
  let a = ufs.add_area("a").unwrap();
  let s = ufs.add_directory(ROOT, "d").unwrap();

  ufs.add_mapping(a, s).unwrap();
  assert_eq!(ufs.probe_mapping(a, s).unwrap(), MappingProbe::Exists);

  ufs.remove_mapping(a, s).unwrap();
  assert_eq!(ufs.probe_mapping(a, s).unwrap(), MappingProbe::DoesNotExist);
  assert_eq!(ufs.remove_mapping(a, s).unwrap_err(), Error::MappingDoesNotExist);
}
