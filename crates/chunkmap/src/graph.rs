use std::ops::Index;

use arcstr::ArcStr;
use chunkmap_common::{Chunk, ChunkIdx, ModuleId};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

/// The resolved chunk graph of one session. Every node is reachable by index and by id.
#[derive(Debug, Default)]
pub struct ChunkGraph {
  pub chunk_table: IndexVec<ChunkIdx, Chunk>,
  pub chunk_by_id: FxHashMap<ArcStr, ChunkIdx>,
}

impl ChunkGraph {
  pub fn new(chunk_table: IndexVec<ChunkIdx, Chunk>) -> Self {
    let chunk_by_id =
      chunk_table.iter_enumerated().map(|(idx, chunk)| (chunk.id.clone(), idx)).collect();
    Self { chunk_table, chunk_by_id }
  }

  pub fn get(&self, id: &str) -> Option<&Chunk> {
    self.chunk_by_id.get(id).map(|idx| &self.chunk_table[*idx])
  }

  pub fn idx_of(&self, id: &str) -> Option<ChunkIdx> {
    self.chunk_by_id.get(id).copied()
  }

  /// Finds the first chunk, in definition order, whose manifest lists `module_id`.
  pub fn chunk_owning(&self, module_id: &ModuleId) -> Option<ChunkIdx> {
    self
      .chunk_table
      .iter_enumerated()
      .find(|(_, chunk)| chunk.contains_module(module_id))
      .map(|(idx, _)| idx)
  }

  pub fn len(&self) -> usize {
    self.chunk_table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chunk_table.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
    self.chunk_table.iter()
  }
}

impl Index<ChunkIdx> for ChunkGraph {
  type Output = Chunk;

  fn index(&self, idx: ChunkIdx) -> &Self::Output {
    &self.chunk_table[idx]
  }
}
