use serde::{Deserialize, Serialize};

use crate::ChunkType;

/// One file a page needs, as handed to the templating layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageResource {
  #[serde(rename = "type")]
  pub resource_type: ChunkType,
  pub file: String,
}

impl PageResource {
  pub fn new(resource_type: ChunkType, file: impl Into<String>) -> Self {
    Self { resource_type, file: file.into() }
  }
}
