use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::{ChunkType, ModuleId};

/// The raw, unresolved description of a chunk: dependencies are still referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkInternals {
  pub id: ArcStr,
  pub name: ArcStr,
  #[serde(rename = "type")]
  pub chunk_type: ChunkType,
  pub file_name: ArcStr,
  pub manifest: Vec<ModuleId>,
  #[serde(default)]
  pub dep_ids: Vec<ArcStr>,
  #[serde(default)]
  pub dynamic_dep_ids: Vec<ArcStr>,
}
