mod bundle_chunk_source;
mod chunk_resolver;
mod graph;
mod manifest_compiler;
mod resources;
mod types;
mod utils;
mod walk;

pub use crate::{
  bundle_chunk_source::{BundleChunkSource, DynamicImportFilter},
  chunk_resolver::{ChunkResolver, chunk_source::ChunkSource},
  graph::ChunkGraph,
  manifest_compiler::ManifestCompiler,
  resources::{chunk_resources, main_resource_dependencies, route_resource_dependencies},
  types::{
    chunk_summary::ChunkSummary, emitted_assets::EmittedAssets, manifest_output::ManifestOutput,
  },
  utils::{render_dot::render_dot, summarize::summarize},
  walk::{DepGraphVisit, DepGraphWalker, DynamicEdge, walk_dep_graph, walk_dep_graph_with},
};
pub use chunkmap_common::*;
pub use chunkmap_error::{BuildError, BuildResult, ResolveError};
pub use chunkmap_fs::{FileSystem, OsFileSystem};
