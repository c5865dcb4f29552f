use chunkmap_common::{Chunk, ChunkIdx};
use oxc_index::IndexVec;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy)]
pub struct DepGraphVisit<'g> {
  pub idx: ChunkIdx,
  pub chunk: &'g Chunk,
  /// Whether the chunk was reached through at least one dynamic edge on this path.
  pub dynamic: bool,
}

/// How the walker treats a dynamic edge, decided per target chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicEdge {
  Skip,
  /// The target and everything below it are reported as dynamic.
  Dynamic,
  /// The edge is walked as if it were a static one.
  Static,
}

struct Frame<'g> {
  pending: std::slice::Iter<'g, ChunkIdx>,
  /// Set for the dynamic dependencies of a chunk.
  dynamic_edges: bool,
  dynamic: bool,
}

/// Lazy depth-first traversal of the chunk graph.
///
/// A chunk is yielded at most once per reachability kind: once when first reached statically and
/// once when first reached dynamically. Static dependencies of a chunk are exhausted before its
/// dynamic ones, and everything below a dynamic edge is reported as dynamic.
pub struct DepGraphWalker<'g, F = fn(&Chunk) -> DynamicEdge> {
  chunk_table: &'g IndexVec<ChunkIdx, Chunk>,
  roots: std::vec::IntoIter<ChunkIdx>,
  stack: Vec<Frame<'g>>,
  dynamic_edge: F,
  seen_static: FxHashSet<ChunkIdx>,
  seen_dynamic: FxHashSet<ChunkIdx>,
}

pub fn walk_dep_graph(
  chunk_table: &IndexVec<ChunkIdx, Chunk>,
  roots: Vec<ChunkIdx>,
  include_dynamic: bool,
) -> DepGraphWalker<'_> {
  let dynamic_edge: fn(&Chunk) -> DynamicEdge =
    if include_dynamic { |_| DynamicEdge::Dynamic } else { |_| DynamicEdge::Skip };
  walk_dep_graph_with(chunk_table, roots, dynamic_edge)
}

/// Like [`walk_dep_graph`], with `dynamic_edge` deciding for every dynamic edge whether it is
/// skipped, walked as dynamic or walked as static.
pub fn walk_dep_graph_with<F>(
  chunk_table: &IndexVec<ChunkIdx, Chunk>,
  roots: Vec<ChunkIdx>,
  dynamic_edge: F,
) -> DepGraphWalker<'_, F>
where
  F: FnMut(&Chunk) -> DynamicEdge,
{
  DepGraphWalker {
    chunk_table,
    roots: roots.into_iter(),
    stack: Vec::new(),
    dynamic_edge,
    seen_static: FxHashSet::default(),
    seen_dynamic: FxHashSet::default(),
  }
}

impl<'g, F> DepGraphWalker<'g, F>
where
  F: FnMut(&Chunk) -> DynamicEdge,
{
  fn visit(&mut self, idx: ChunkIdx, dynamic: bool) -> Option<DepGraphVisit<'g>> {
    let seen = if dynamic { &mut self.seen_dynamic } else { &mut self.seen_static };
    if !seen.insert(idx) {
      return None;
    }

    let chunk = &self.chunk_table[idx];
    if !chunk.dynamic_deps.is_empty() {
      self.stack.push(Frame { pending: chunk.dynamic_deps.iter(), dynamic_edges: true, dynamic });
    }
    // Pushed last so static dependencies are walked first.
    if !chunk.deps.is_empty() {
      self.stack.push(Frame { pending: chunk.deps.iter(), dynamic_edges: false, dynamic });
    }
    Some(DepGraphVisit { idx, chunk, dynamic })
  }
}

impl<'g, F> Iterator for DepGraphWalker<'g, F>
where
  F: FnMut(&Chunk) -> DynamicEdge,
{
  type Item = DepGraphVisit<'g>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let (idx, dynamic) = match self.stack.last_mut() {
        Some(frame) => match frame.pending.next() {
          Some(&idx) if frame.dynamic_edges => {
            match (self.dynamic_edge)(&self.chunk_table[idx]) {
              DynamicEdge::Skip => continue,
              DynamicEdge::Dynamic => (idx, true),
              DynamicEdge::Static => (idx, frame.dynamic),
            }
          }
          Some(&idx) => (idx, frame.dynamic),
          None => {
            self.stack.pop();
            continue;
          }
        },
        None => (self.roots.next()?, false),
      };
      if let Some(visit) = self.visit(idx, dynamic) {
        return Some(visit);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use arcstr::ArcStr;
  use chunkmap_common::{Chunk, ChunkIdx, ChunkInternals, ChunkType};
  use oxc_index::IndexVec;

  use super::{DynamicEdge, walk_dep_graph, walk_dep_graph_with};

  fn table(edges: &[(&str, &[usize], &[usize])]) -> IndexVec<ChunkIdx, Chunk> {
    edges
      .iter()
      .map(|(id, deps, dynamic_deps)| {
        let internals = ChunkInternals {
          id: ArcStr::from(*id),
          name: ArcStr::from(*id),
          chunk_type: ChunkType::Module,
          file_name: ArcStr::from(*id),
          manifest: vec![],
          dep_ids: vec![],
          dynamic_dep_ids: vec![],
        };
        let mut chunk = Chunk::new(ArcStr::from(*id), &internals);
        chunk.deps = deps.iter().map(|idx| ChunkIdx::from_usize(*idx)).collect();
        chunk.dynamic_deps = dynamic_deps.iter().map(|idx| ChunkIdx::from_usize(*idx)).collect();
        chunk
      })
      .collect()
  }

  fn visits(
    chunks: &IndexVec<ChunkIdx, Chunk>,
    root: usize,
    include_dynamic: bool,
  ) -> Vec<(String, bool)> {
    walk_dep_graph(chunks, vec![ChunkIdx::from_usize(root)], include_dynamic)
      .map(|visit| (visit.chunk.id.to_string(), visit.dynamic))
      .collect()
  }

  #[test]
  fn static_walk_is_depth_first() {
    // a -> b -> d, a -> c -> d
    let chunks = table(&[("a", &[1, 2], &[]), ("b", &[3], &[]), ("c", &[3], &[]), ("d", &[], &[])]);
    assert_eq!(
      visits(&chunks, 0, false),
      [("a".into(), false), ("b".into(), false), ("d".into(), false), ("c".into(), false)]
    );
  }

  #[test]
  fn dynamic_edges_are_skipped_unless_requested() {
    // a -> b, a ~> c -> d
    let chunks = table(&[("a", &[1], &[2]), ("b", &[], &[]), ("c", &[3], &[]), ("d", &[], &[])]);
    assert_eq!(visits(&chunks, 0, false), [("a".into(), false), ("b".into(), false)]);
    assert_eq!(
      visits(&chunks, 0, true),
      [("a".into(), false), ("b".into(), false), ("c".into(), true), ("d".into(), true)]
    );
  }

  #[test]
  fn chunk_can_be_seen_statically_and_dynamically() {
    // a ~> b, a -> c -> b
    let chunks = table(&[("a", &[2], &[1]), ("b", &[], &[]), ("c", &[1], &[])]);
    assert_eq!(
      visits(&chunks, 0, true),
      [("a".into(), false), ("c".into(), false), ("b".into(), false), ("b".into(), true)]
    );
  }

  #[test]
  fn cycles_terminate() {
    let chunks = table(&[("a", &[1], &[]), ("b", &[0], &[1])]);
    assert_eq!(
      visits(&chunks, 0, true),
      [("a".into(), false), ("b".into(), false), ("b".into(), true), ("a".into(), true)]
    );
  }

  #[test]
  fn walking_is_lazy_and_restartable() {
    let chunks = table(&[("a", &[1], &[]), ("b", &[], &[])]);
    let mut walker = walk_dep_graph(&chunks, vec![ChunkIdx::from_usize(0)], false);
    assert_eq!(walker.next().map(|visit| visit.chunk.id.to_string()), Some("a".to_string()));
    drop(walker);
    assert_eq!(visits(&chunks, 0, false).len(), 2);
  }

  #[test]
  fn dynamic_edges_can_be_walked_as_static() {
    // a ~> b -> c, a ~> d -> e
    let chunks = table(&[
      ("a", &[], &[1, 3]),
      ("b", &[2], &[]),
      ("c", &[], &[]),
      ("d", &[4], &[]),
      ("e", &[], &[]),
    ]);
    let visits = walk_dep_graph_with(&chunks, vec![ChunkIdx::from_usize(0)], |target| {
      if target.id.as_str() == "b" { DynamicEdge::Static } else { DynamicEdge::Dynamic }
    })
    .map(|visit| (visit.chunk.id.to_string(), visit.dynamic))
    .collect::<Vec<_>>();
    assert_eq!(
      visits,
      [
        ("a".into(), false),
        ("b".into(), false),
        ("c".into(), false),
        ("d".into(), true),
        ("e".into(), true)
      ]
    );
  }
}
