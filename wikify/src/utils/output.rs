//! Mirroring of the working tree into the output directory.

use std::{fs, io, path::Path};

use log::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::WikifyError;

/// Files between two progress log lines.
const PROGRESS_INTERVAL: usize = 500;

/// Recursively mirror `work_dir` into `output_dir`, skipping hidden
/// subtrees.
///
/// Read-only attributes are cleared on copied files so the mirrored wiki
/// tree can be edited or regenerated in place. Returns the number of files
/// copied.
///
/// # Errors
///
/// Filesystem faults (unreadable source entries, unwritable destination)
/// are fatal; there is no partial-completion retry.
pub fn mirror_tree(
  work_dir: &Path,
  output_dir: &Path,
) -> Result<usize, WikifyError> {
  fs::create_dir_all(output_dir)?;

  // Canonical roots make the nested-output guard below reliable even when
  // the configured paths are relative.
  let source_root = fs::canonicalize(work_dir)?;
  let destination_root = fs::canonicalize(output_dir)?;
  let mut copied = 0_usize;

  for entry in WalkDir::new(&source_root)
    .min_depth(1)
    .into_iter()
    .filter_entry(|e| !is_hidden(e))
  {
    let entry = entry?;

    // Guard against an output directory nested inside the working tree.
    if entry.path().starts_with(&destination_root) {
      continue;
    }

    let rel = entry
      .path()
      .strip_prefix(&source_root)
      .map_err(|e| WikifyError::Io(io::Error::other(e)))?;
    let dest = destination_root.join(rel);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest)?;
      continue;
    }

    debug!("Copying {} -> {}", entry.path().display(), dest.display());
    fs::copy(entry.path(), &dest)?;

    let mut permissions = fs::metadata(&dest)?.permissions();
    if permissions.readonly() {
      #[allow(
        clippy::permissions_set_readonly_false,
        reason = "The mirrored tree must stay editable"
      )]
      permissions.set_readonly(false);
      fs::set_permissions(&dest, permissions)?;
    }

    copied += 1;
    if copied % PROGRESS_INTERVAL == 0 {
      info!("Copied {copied} files");
    }
  }

  info!("Copied {copied} files to {}", output_dir.display());
  Ok(copied)
}

fn is_hidden(entry: &DirEntry) -> bool {
  entry
    .file_name()
    .to_str()
    .is_some_and(|name| name.starts_with('.'))
}
