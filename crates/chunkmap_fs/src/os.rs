use std::{io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }
}
