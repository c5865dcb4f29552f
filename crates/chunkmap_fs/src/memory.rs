use std::{
  io::{self, Write},
  path::Path,
};

use vfs::{MemoryFS, VfsPath};

use crate::FileSystem;

/// In-memory file system, mostly useful for tests.
pub struct MemoryFileSystem {
  root: VfsPath,
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self { root: VfsPath::new(MemoryFS::new()) }
  }
}

impl MemoryFileSystem {
  pub fn new(files: &[(&str, &str)]) -> io::Result<Self> {
    let fs = Self::default();
    for (path, content) in files {
      fs.add_file(Path::new(path), content)?;
    }
    Ok(fs)
  }

  pub fn add_file(&self, path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      let parent = self.vfs_path(parent)?;
      if !parent.exists().map_err(io::Error::other)? {
        parent.create_dir_all().map_err(io::Error::other)?;
      }
    }
    let mut file = self.vfs_path(path)?.create_file().map_err(io::Error::other)?;
    file.write_all(content.as_bytes())
  }

  fn vfs_path(&self, path: &Path) -> io::Result<VfsPath> {
    let path = path.to_string_lossy().replace('\\', "/");
    let path = path.trim_start_matches('/');
    if path.is_empty() {
      return Ok(self.root.clone());
    }
    self.root.join(path).map_err(io::Error::other)
  }
}

impl FileSystem for MemoryFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let path = self.vfs_path(path)?;
    if !path.exists().map_err(io::Error::other)? {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.as_str()),
      ));
    }
    path.read_to_string().map_err(io::Error::other)
  }

  fn exists(&self, path: &Path) -> bool {
    self.vfs_path(path).and_then(|path| path.exists().map_err(io::Error::other)).unwrap_or(false)
  }
}

#[test]
fn test_memory_file_system() {
  let fs = MemoryFileSystem::new(&[("/src/app.css", "body {}")]).unwrap();
  assert_eq!(fs.read_to_string(Path::new("/src/app.css")).unwrap(), "body {}");
  assert!(fs.exists(Path::new("/src/app.css")));
  assert!(!fs.exists(Path::new("/src/other.css")));
  assert_eq!(
    fs.read_to_string(Path::new("/src/other.css")).unwrap_err().kind(),
    io::ErrorKind::NotFound
  );
}
