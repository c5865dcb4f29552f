use chunkmap_common::{ChunkIdx, PageResource, RouteComponent};
use chunkmap_error::BuildResult;
use chunkmap_utils::{dedupe::dedupe, indexmap::FxIndexMap};

use crate::ChunkGraph;

/// Maps chunks to prefixed resource records, dropping duplicates.
pub fn chunk_resources(
  graph: &ChunkGraph,
  chunks: impl IntoIterator<Item = ChunkIdx>,
  resource_prefix: &str,
) -> BuildResult<Vec<PageResource>> {
  let resources = chunks.into_iter().map(|idx| {
    let chunk = &graph[idx];
    PageResource::new(chunk.chunk_type, format!("{resource_prefix}{}", chunk.file_name))
  });
  Ok(dedupe(resources)?)
}

/// Resources of the entry point: the entry chunk itself followed by what `transitive_deps`
/// selects for it.
pub fn main_resource_dependencies(
  graph: &ChunkGraph,
  entry_point: ChunkIdx,
  transitive_deps: impl Fn(ChunkIdx) -> BuildResult<Vec<ChunkIdx>>,
  resource_prefix: &str,
) -> BuildResult<Vec<PageResource>> {
  let chunks = std::iter::once(entry_point).chain(transitive_deps(entry_point)?);
  chunk_resources(graph, chunks, resource_prefix)
}

/// Resources of every route component, keyed by the component's file.
pub fn route_resource_dependencies(
  graph: &ChunkGraph,
  routes: &[RouteComponent],
  mut resolve_component: impl FnMut(&RouteComponent) -> BuildResult<ChunkIdx>,
  transitive_deps: impl Fn(ChunkIdx) -> BuildResult<Vec<ChunkIdx>>,
  resource_prefix: &str,
) -> BuildResult<FxIndexMap<String, Vec<PageResource>>> {
  let mut resources = FxIndexMap::default();
  for route in routes {
    let chunk = resolve_component(route)?;
    let chunks = std::iter::once(chunk).chain(transitive_deps(chunk)?);
    resources.insert(route.file.clone(), chunk_resources(graph, chunks, resource_prefix)?);
  }
  Ok(resources)
}

#[cfg(test)]
mod tests {
  use arcstr::ArcStr;
  use chunkmap_common::{Chunk, ChunkIdx, ChunkInternals, ChunkType, PageResource, RouteComponent};
  use chunkmap_error::ResolveError;
  use oxc_index::IndexVec;

  use super::{main_resource_dependencies, route_resource_dependencies};
  use crate::ChunkGraph;

  fn graph() -> ChunkGraph {
    let chunks = [
      ("main.js", ChunkType::Module),
      ("b.js", ChunkType::Module),
      ("b.css", ChunkType::Style),
    ]
    .into_iter()
    .map(|(id, chunk_type)| {
      let internals = ChunkInternals {
        id: ArcStr::from(id),
        name: ArcStr::from(id),
        chunk_type,
        file_name: ArcStr::from(id),
        manifest: vec![],
        dep_ids: vec![],
        dynamic_dep_ids: vec![],
      };
      Chunk::new(ArcStr::from(id), &internals)
    })
    .collect::<IndexVec<ChunkIdx, Chunk>>();
    ChunkGraph::new(chunks)
  }

  #[test]
  fn main_resources_are_prefixed_and_deduplicated() {
    let graph = graph();
    let entry = graph.idx_of("main.js").unwrap();
    let resources = main_resource_dependencies(
      &graph,
      entry,
      |idx| Ok(vec![idx, graph.idx_of("b.js").unwrap(), graph.idx_of("b.css").unwrap()]),
      "cdn/",
    )
    .unwrap();

    assert_eq!(resources.len(), 3);
    for file in ["cdn/main.js", "cdn/b.js", "cdn/b.css"] {
      assert!(resources.iter().any(|resource| resource.file == file), "missing {file}");
    }
    assert!(resources.contains(&PageResource::new(ChunkType::Style, "cdn/b.css")));
  }

  #[test]
  fn unresolvable_route_aborts() {
    let graph = graph();
    let routes = [RouteComponent { name: "about".to_string(), file: "about.svelte".to_string() }];
    let err = route_resource_dependencies(
      &graph,
      &routes,
      |route| Err(ResolveError::RouteWithoutOwner { route: route.file.clone() }.into()),
      |_| Ok(vec![]),
      "",
    )
    .unwrap_err();
    assert!(matches!(err.resolve_error(), Some(ResolveError::RouteWithoutOwner { .. })));
  }

  #[test]
  fn routes_are_keyed_by_file() {
    let graph = graph();
    let routes = [RouteComponent { name: "b".to_string(), file: "b.svelte".to_string() }];
    let resources = route_resource_dependencies(
      &graph,
      &routes,
      |_| Ok(graph.idx_of("b.js").unwrap()),
      |_| Ok(vec![graph.idx_of("b.css").unwrap()]),
      "",
    )
    .unwrap();
    assert_eq!(
      resources["b.svelte"],
      [PageResource::new(ChunkType::Style, "b.css"), PageResource::new(ChunkType::Module, "b.js")]
    );
  }
}
