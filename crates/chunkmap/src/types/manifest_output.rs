use chunkmap_common::{ClientResourceSet, CompileError, OutputAsset};

use crate::{ChunkGraph, ChunkSummary, render_dot};

#[derive(Debug, Default)]
pub struct ManifestOutput {
  pub resources: ClientResourceSet,
  pub assets: Vec<OutputAsset>,
  pub chunks: Vec<ChunkSummary>,
  pub warnings: Vec<CompileError>,
  /// The graph resolved for route resources, including synthesized style chunks.
  pub chunk_graph: ChunkGraph,
}

impl ManifestOutput {
  pub fn render_dot(&self) -> String {
    render_dot(&self.resources.routes, &self.chunk_graph)
  }

  pub fn summary(&self, cwd: &std::path::Path) -> String {
    crate::summarize(&self.warnings, &self.chunks, cwd)
  }
}
