pub mod chunk_source;

use std::cell::{Ref, RefCell};

use arcstr::ArcStr;
use chunkmap_common::{Chunk, ChunkIdx, ChunkInternals};
use chunkmap_error::{BuildResult, ResolveError};
use chunkmap_utils::indexmap::FxIndexSet;
use futures::{
  FutureExt,
  channel::oneshot,
  future::{LocalBoxFuture, Shared},
};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use crate::{ChunkGraph, walk::walk_dep_graph};

use self::chunk_source::ChunkSource;

enum ChunkSlot {
  /// Some caller is fetching the internals of this chunk. Concurrent callers wait on the
  /// receiver instead of starting a second resolution.
  Pending(Shared<oneshot::Receiver<ChunkIdx>>),
  Defined(ChunkIdx),
}

/// Turns raw chunks of a [`ChunkSource`] into a memoized, cycle tolerant chunk graph.
///
/// Every id resolves to exactly one node per resolver. A node is registered before its
/// dependencies are resolved, so a dependency cycle finds the already registered node instead of
/// recursing forever. Missing dependency ids are logged and left out of the graph.
///
/// Style modules imported by a chunk's modules that no statically reachable chunk carries are
/// handed to [`ChunkSource::chunks_from_modules`] and the resulting chunks become static
/// dependencies of the importing chunk.
pub struct ChunkResolver<S: ChunkSource> {
  source: S,
  chunk_table: RefCell<IndexVec<ChunkIdx, Chunk>>,
  cache: RefCell<FxHashMap<ArcStr, ChunkSlot>>,
}

impl<S: ChunkSource> ChunkResolver<S> {
  pub fn new(source: S) -> Self {
    Self { source, chunk_table: RefCell::default(), cache: RefCell::default() }
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  pub fn chunk_table(&self) -> Ref<'_, IndexVec<ChunkIdx, Chunk>> {
    self.chunk_table.borrow()
  }

  pub fn into_graph(self) -> ChunkGraph {
    ChunkGraph::new(self.chunk_table.into_inner())
  }

  /// Resolves `unit` if there is one. Resolving the same unit twice, sequentially or
  /// concurrently, yields the same node.
  pub async fn resolve_chunk(&self, unit: Option<S::Unit>) -> BuildResult<Option<ChunkIdx>> {
    match unit {
      Some(unit) => self.resolve(unit).await.map(Some),
      None => Ok(None),
    }
  }

  pub fn resolve(&self, unit: S::Unit) -> LocalBoxFuture<'_, BuildResult<ChunkIdx>> {
    async move {
      let id = self.source.id(&unit);
      if let Some(idx) = self.lookup(&id).await? {
        return Ok(idx);
      }

      let (tx, rx) = oneshot::channel();
      self.cache.borrow_mut().insert(id.clone(), ChunkSlot::Pending(rx.shared()));
      let internals = match self.source.internals(&unit).await {
        Ok(internals) => internals,
        Err(err) => {
          // Dropping `tx` wakes up concurrent callers with an error.
          self.cache.borrow_mut().remove(&id);
          return Err(err);
        }
      };

      let idx = self.register_chunk(id, &internals);
      tx.send(idx).ok();
      self.link_chunk(idx, &internals).await?;
      self.promote_orphaned_modules(idx, &unit).await?;
      Ok(idx)
    }
    .boxed_local()
  }

  /// Defines a node from internals that did not come out of [`ChunkSource::internals`]. An id
  /// that is already known yields the existing node.
  fn define_chunk<'a>(
    &'a self,
    internals: ChunkInternals,
    owner: &'a S::Unit,
  ) -> LocalBoxFuture<'a, BuildResult<ChunkIdx>> {
    async move {
      if let Some(idx) = self.lookup(&internals.id).await? {
        tracing::debug!(id = %internals.id, "Chunk is already defined, reusing it");
        return Ok(idx);
      }

      let idx = self.register_chunk(internals.id.clone(), &internals);
      self.link_chunk(idx, &internals).await?;
      self.promote_orphaned_modules(idx, owner).await?;
      Ok(idx)
    }
    .boxed_local()
  }

  async fn lookup(&self, id: &str) -> BuildResult<Option<ChunkIdx>> {
    let pending = match self.cache.borrow().get(id) {
      None => return Ok(None),
      Some(ChunkSlot::Defined(idx)) => return Ok(Some(*idx)),
      Some(ChunkSlot::Pending(rx)) => rx.clone(),
    };
    match pending.await {
      Ok(idx) => Ok(Some(idx)),
      Err(_) => Err(ResolveError::AbandonedResolution { id: id.to_string() }.into()),
    }
  }

  fn register_chunk(&self, id: ArcStr, internals: &ChunkInternals) -> ChunkIdx {
    let idx = self.chunk_table.borrow_mut().push(Chunk::new(id.clone(), internals));
    self.cache.borrow_mut().insert(id, ChunkSlot::Defined(idx));
    idx
  }

  async fn resolve_dependency(&self, id: &str) -> BuildResult<Option<ChunkIdx>> {
    if let Some(idx) = self.lookup(id).await? {
      return Ok(Some(idx));
    }
    let unit = self.source.resolve_id(id).await;
    self.resolve_chunk(unit).await
  }

  async fn link_chunk(&self, idx: ChunkIdx, internals: &ChunkInternals) -> BuildResult<()> {
    for dep_id in &internals.dep_ids {
      match self.resolve_dependency(dep_id).await? {
        Some(dep) => self.chunk_table.borrow_mut()[idx].deps.push(dep),
        None => self.warn_missing_dependency(&internals.id, dep_id),
      }
    }
    for dep_id in &internals.dynamic_dep_ids {
      match self.resolve_dependency(dep_id).await? {
        Some(dep) => self.chunk_table.borrow_mut()[idx].dynamic_deps.push(dep),
        None => self.warn_missing_dependency(&internals.id, dep_id),
      }
    }
    Ok(())
  }

  fn warn_missing_dependency(&self, id: &str, dep_id: &str) {
    let known = self.cache.borrow().keys().map(ToString::to_string).collect::<Vec<_>>();
    tracing::warn!(
      chunk = id,
      missing = dep_id,
      ?known,
      "While defining chunk, needed missing dependency"
    );
  }

  async fn promote_orphaned_modules(&self, idx: ChunkIdx, owner: &S::Unit) -> BuildResult<()> {
    let manifest = self.chunk_table.borrow()[idx].manifest.iter().cloned().collect::<Vec<_>>();

    let mut orphaned = FxIndexSet::default();
    for module_id in &manifest {
      for imported_id in self.source.module_imports(module_id).await? {
        let covered_by = {
          let chunk_table = self.chunk_table.borrow();
          walk_dep_graph(&chunk_table, chunk_table[idx].deps.clone(), false)
            .find(|visit| visit.chunk.contains_module(&imported_id))
            .map(|visit| visit.chunk.id.clone())
        };
        match covered_by {
          Some(chunk_id) => {
            tracing::trace!(
              module = %module_id,
              import = %imported_id,
              chunk = %chunk_id,
              "Import is covered"
            );
          }
          None => {
            tracing::debug!(module = %module_id, import = %imported_id, "Import is orphaned");
            orphaned.insert(imported_id);
          }
        }
      }
    }

    if orphaned.is_empty() {
      return Ok(());
    }

    for internals in self.source.chunks_from_modules(owner, orphaned.into_iter().collect()).await? {
      let dep = self.define_chunk(internals, owner).await?;
      let mut chunk_table = self.chunk_table.borrow_mut();
      if dep != idx && !chunk_table[idx].deps.contains(&dep) {
        chunk_table[idx].deps.push(dep);
      }
    }
    Ok(())
  }
}
