use std::fmt::Display;

use serde::Deserialize;

use crate::ChunkType;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Esm,
  Iife,
}

impl OutputFormat {
  /// Scripts of an esm build are loaded as modules, anything else as classic scripts.
  #[inline]
  pub fn chunk_type(self) -> ChunkType {
    match self {
      Self::Esm => ChunkType::Module,
      Self::Iife => ChunkType::Script,
    }
  }
}

impl Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Esm => write!(f, "esm"),
      Self::Iife => write!(f, "iife"),
    }
  }
}
