pub mod chunk_internals;
pub mod chunk_type;

use arcstr::ArcStr;
use chunkmap_utils::indexmap::FxIndexSet;

use crate::{ChunkIdx, ChunkInternals, ChunkType, ModuleId};

/// A resolved node of the chunk graph. Edges point into the arena owned by the graph, so cycles
/// between chunks are plain index cycles.
#[derive(Debug, Clone)]
pub struct Chunk {
  pub id: ArcStr,
  pub name: ArcStr,
  pub chunk_type: ChunkType,
  pub file_name: ArcStr,
  pub manifest: FxIndexSet<ModuleId>,
  pub deps: Vec<ChunkIdx>,
  pub dynamic_deps: Vec<ChunkIdx>,
}

impl Chunk {
  /// Creates the node without edges; they are filled in once dependencies are resolved.
  pub fn new(id: ArcStr, internals: &ChunkInternals) -> Self {
    Self {
      id,
      name: internals.name.clone(),
      chunk_type: internals.chunk_type,
      file_name: internals.file_name.clone(),
      manifest: internals.manifest.iter().cloned().collect(),
      deps: Vec::with_capacity(internals.dep_ids.len()),
      dynamic_deps: Vec::with_capacity(internals.dynamic_dep_ids.len()),
    }
  }

  pub fn contains_module(&self, module_id: &ModuleId) -> bool {
    self.manifest.contains(module_id)
  }
}
