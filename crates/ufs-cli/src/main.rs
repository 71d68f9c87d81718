mod cli;
mod external;

use camino::Utf8PathBuf;
use ufs::{Error, Ufs, UfsOptions, View, BASE, ROOT};
use walkdir::WalkDir;

fn main() -> Result<(), Error> {
  pretty_env_logger::init();

  let cli = cli::parse();

  match cli.command {
    cli::Command::Inspect { directory } => inspect(directory)?,
  }

  Ok(())
}

fn inspect(directory: std::path::PathBuf) -> Result<(), Error> {
  let root = Utf8PathBuf::from_path_buf(directory).map_err(|_| Error::BadCall)?;

  let mut ufs = Ufs::with_external(external::RealExternalFs::new(root.clone()), UfsOptions::default());

  for entry in WalkDir::new(&root).min_depth(1).max_depth(1).into_iter().filter_map(|e| e.ok()) {
    let name = entry.file_name().to_string_lossy().into_owned();
    if entry.file_type().is_dir() {
      ufs.add_directory(ROOT, &name)?;
    } else {
      ufs.add_file(ROOT, &name)?;
    }
  }

  let view = View::new(&[BASE]);
  ufs.iterate_dir_in_view(view, ROOT, |entry, index, total| {
    println!("[{}/{}] {:?}", index + 1, total, entry);
    Ok(())
  })?;

  Ok(())
}
