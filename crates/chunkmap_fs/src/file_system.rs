use std::{io, path::Path};

/// Read access to the source files that back style modules.
pub trait FileSystem: Send + Sync {
  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn exists(&self, path: &Path) -> bool;
}
