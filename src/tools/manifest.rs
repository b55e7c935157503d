//! Asset directory manifests.
//!
//! For every subdirectory of an asset tree, writes a JSON array with the
//! names of the plain files it contains, so a static host can list assets.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `<output>/<parent>/<dir>.json` for every subdirectory of `root`
/// whose name is not in `ignore`. Ignored directories are not descended.
///
/// Returns the written manifest paths, sorted by path components.
pub fn write_manifests<P, Q>(root: P, output: Q, ignore: &[&str]) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut written = Vec::new();
    walk(root.as_ref(), Path::new(""), output.as_ref(), ignore, &mut written)?;
    written.sort();
    Ok(written)
}

/// List plain files of `root/rel`, writing manifests for its subdirectories.
fn walk(root: &Path, rel: &Path, output: &Path, ignore: &[&str], written: &mut Vec<PathBuf>) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(root.join(rel))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if ignore.contains(&name.as_str()) {
                log::debug!("Skipping ignored directory {}", rel.join(&name).display());
                continue;
            }
            let listing = walk(root, &rel.join(&name), output, ignore, written)?;
            written.push(write_listing(&output.join(rel), &name, &listing)?);
        } else if file_type.is_file() {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

fn write_listing(dir: &Path, name: &str, files: &[String]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", name));
    fs::write(&path, serde_json::to_string(files)?)?;
    Ok(path)
}
