use chunkmap_common::PageResource;
use chunkmap_utils::indexmap::FxIndexMap;
use itertools::Itertools;

use crate::ChunkGraph;

fn quote(value: &str) -> String {
  serde_json::Value::from(value).to_string()
}

fn route_label(route: &str) -> String {
  quote(&format!("/{}", route.replacen(".svelte", "", 1)))
}

/// Renders routes and the static edges of `graph` as a Graphviz digraph.
pub fn render_dot(routes: &FxIndexMap<String, Vec<PageResource>>, graph: &ChunkGraph) -> String {
  let nodes =
    format!("{{ rank = min; {} }};", routes.keys().map(|route| route_label(route)).join("; "));

  let mut edges = vec![];
  for route in routes.keys().sorted() {
    for resource in &routes[route] {
      edges.push(format!("  {} -> {};", route_label(route), quote(&resource.file)));
    }
  }
  for chunk in graph.iter() {
    for dep in &chunk.deps {
      edges.push(format!("  {} -> {};", quote(&chunk.file_name), quote(&graph[*dep].file_name)));
    }
  }

  format!(
    r##"strict digraph {{
  ordering=out;
  rankdir=LR;
  splines=true;
  overlap=false;
  nodesep=0.16;
  ranksep=0.18;
  fontname="Helvetica-bold";
  fontsize=9;
  style="rounded,bold,filled";
  fillcolor="#ffffff";
  compound=true;

  node [shape=box, style="rounded,filled", height=0.2, color=black, fillcolor="#ffffcc", fontcolor=black, fontname=Helvetica, fontsize=9];
  edge [arrowhead=normal, arrowsize=0.6, penwidth=2.0, color="#00000033", fontname=Helvetica, fontsize=9]

{nodes}
{}
}}"##,
    edges.join("\n")
  )
}

#[cfg(test)]
mod tests {
  use arcstr::ArcStr;
  use chunkmap_common::{Chunk, ChunkIdx, ChunkInternals, ChunkType, PageResource};
  use chunkmap_utils::indexmap::FxIndexMap;
  use oxc_index::IndexVec;

  use super::render_dot;
  use crate::ChunkGraph;

  #[test]
  fn test_render_dot() {
    let mut chunks = ["index.js", "shared.js"]
      .into_iter()
      .map(|id| {
        let internals = ChunkInternals {
          id: ArcStr::from(id),
          name: ArcStr::from(id),
          chunk_type: ChunkType::Module,
          file_name: ArcStr::from(id),
          manifest: vec![],
          dep_ids: vec![],
          dynamic_dep_ids: vec![],
        };
        Chunk::new(ArcStr::from(id), &internals)
      })
      .collect::<IndexVec<ChunkIdx, Chunk>>();
    chunks[ChunkIdx::from_usize(0)].deps.push(ChunkIdx::from_usize(1));
    let graph = ChunkGraph::new(chunks);

    let mut routes = FxIndexMap::default();
    routes.insert("index.svelte".to_string(), vec![PageResource::new(ChunkType::Module, "index.js")]);
    routes.insert("about.svelte".to_string(), vec![]);

    let dot = render_dot(&routes, &graph);
    assert!(dot.starts_with("strict digraph {\n"));
    assert!(dot.contains("{ rank = min; \"/index\"; \"/about\" };"));
    assert!(dot.contains("  \"/index\" -> \"index.js\";\n  \"index.js\" -> \"shared.js\";\n}"));
  }
}
