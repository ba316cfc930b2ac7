//! All-or-nothing replacement of the merged output artifact.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace `output` with `contents`.
///
/// The bytes land in a temporary file next to `output` first and are renamed
/// over it only once fully written, so a failure never leaves a torn file.
pub fn replace_contents(output: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(output).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("merged_list.txt");
        std::fs::write(&out, "old contents that are longer").unwrap();

        replace_contents(&out, b"new").unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"new");
        // No stray temporaries.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_fails_without_creating_anything() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("merged_list.txt");
        assert!(replace_contents(&out, b"x").is_err());
        assert!(!dir.path().join("missing").exists());
    }
}
