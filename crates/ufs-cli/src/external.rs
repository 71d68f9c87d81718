//! A real-filesystem-backed [`ufs::external::ExternalFs`] for demo
//! purposes: `BASE` is the directory the CLI was pointed at.

use camino::{Utf8Path, Utf8PathBuf};
use ufs::external::{ExternalFs, ExternalKind, MaterializeEntry};
use ufs::Error;
use walkdir::WalkDir;

pub struct RealExternalFs {
  root: Utf8PathBuf,
}

impl RealExternalFs {
  pub fn new(root: Utf8PathBuf) -> Self {
    Self { root }
  }

  fn full_path(&self, path: &Utf8Path) -> Utf8PathBuf {
    self.root.join(path)
  }
}

impl ExternalFs for RealExternalFs {
  fn exists(&self, path: &Utf8Path) -> bool {
    self.full_path(path).as_std_path().exists()
  }

  fn list_children(&self, path: &Utf8Path) -> Vec<String> {
    WalkDir::new(self.full_path(path))
      .min_depth(1)
      .max_depth(1)
      .into_iter()
      .filter_map(|entry| entry.ok())
      .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
      .collect()
  }

  fn materialize(&mut self, entries: &[MaterializeEntry]) -> Result<(), Error> {
    for entry in entries {
      let target = self.full_path(&entry.parent).join(&entry.name);
      log::info!("materialize: writing {:?} ({:?})", target, entry.kind);
      match entry.kind {
        ExternalKind::Directory => {
          std::fs::create_dir_all(target.as_std_path()).map_err(|_| Error::Unknown)?;
        }
        ExternalKind::File => {
          std::fs::File::create(target.as_std_path()).map_err(|_| Error::Unknown)?;
        }
      }
    }
    Ok(())
  }
}
