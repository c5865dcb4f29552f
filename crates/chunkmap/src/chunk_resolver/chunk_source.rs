use std::future::Future;

use arcstr::ArcStr;
use chunkmap_common::{ChunkInternals, ModuleId};
use chunkmap_error::BuildResult;

/// Where the resolver gets raw chunks from.
///
/// `Unit` is whatever the source natively calls a chunk, e.g. a reference into the bundler
/// output. Ids returned by `id` must be stable: the resolver memoizes on them.
pub trait ChunkSource {
  type Unit: Clone;

  fn id(&self, unit: &Self::Unit) -> ArcStr;

  /// Maps a dependency id to a unit, or `None` when no such chunk exists.
  fn resolve_id(&self, id: &str) -> impl Future<Output = Option<Self::Unit>>;

  fn internals(&self, unit: &Self::Unit) -> impl Future<Output = BuildResult<ChunkInternals>>;

  /// Imports of a module that are not represented by chunk edges, stylesheets for instance.
  fn module_imports(&self, module_id: &ModuleId) -> impl Future<Output = BuildResult<Vec<ModuleId>>>;

  /// Builds chunks for modules that no reachable chunk covers, on behalf of `owner`.
  fn chunks_from_modules(
    &self,
    owner: &Self::Unit,
    module_ids: Vec<ModuleId>,
  ) -> impl Future<Output = BuildResult<Vec<ChunkInternals>>>;
}
