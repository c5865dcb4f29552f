use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
  Script,
  Module,
  Style,
}

impl ChunkType {
  #[inline]
  pub fn is_style(self) -> bool {
    matches!(self, Self::Style)
  }
}

impl Display for ChunkType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Script => write!(f, "script"),
      Self::Module => write!(f, "module"),
      Self::Style => write!(f, "style"),
    }
  }
}
