#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory standing in for one directory of HR CSV exports.
/// Cleans up automatically on drop.
pub struct ExportDir {
    temp_dir: TempDir,
}

impl ExportDir {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Root path of the export directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the directory and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create export file");
        file.write_all(contents.as_bytes())
            .expect("write export file contents");
        path
    }
}
