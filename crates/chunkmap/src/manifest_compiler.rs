use std::cell::RefCell;

use chunkmap_common::{
  ChunkIdx, ClientResourceSet, ManifestData, ManifestOptions, NormalizedManifestOptions, OutputBundle,
};
use chunkmap_ecmascript::discover_unconditional_imports;
use chunkmap_error::{BuildResult, ResolveError};
use chunkmap_fs::{FileSystem, OsFileSystem};
use futures::future::try_join_all;
use rustc_hash::FxHashSet;

use crate::{
  BundleChunkSource, ChunkGraph, ChunkResolver, ChunkSummary, DynamicImportFilter, EmittedAssets,
  ManifestOutput, main_resource_dependencies, route_resource_dependencies,
  utils::{
    entry_point::{entry_point_module_id, entry_point_output_chunk, route_module_id},
    normalize_options::normalize_options,
  },
  walk::{DynamicEdge, walk_dep_graph_with},
};

/// Turns a bundler output into the resource manifest of the client: which files the entry point
/// and every route component need, and which style assets had to be synthesized for them.
pub struct ManifestCompiler {
  pub(crate) fs: Box<dyn FileSystem>,
  pub(crate) options: NormalizedManifestOptions,
}

impl ManifestCompiler {
  pub fn new(options: ManifestOptions) -> Self {
    Self::with_file_system(options, OsFileSystem)
  }

  pub fn with_file_system(options: ManifestOptions, fs: impl FileSystem + 'static) -> Self {
    Self { fs: Box::new(fs), options: normalize_options(options) }
  }

  pub fn options(&self) -> &NormalizedManifestOptions {
    &self.options
  }

  pub async fn compile(
    &self,
    bundle: &OutputBundle,
    manifest_data: &ManifestData,
  ) -> BuildResult<ManifestOutput> {
    let entry_point = entry_point_module_id(&self.options)?;
    let entry_chunk = entry_point_output_chunk(bundle, &entry_point)?;
    tracing::debug!(entry_point = %entry_point, chunk = %entry_chunk.file_name, "Found entry chunk");

    let route_module_ids = manifest_data
      .components
      .iter()
      .map(|component| route_module_id(&self.options, &manifest_data.routes_dir, &component.file))
      .collect::<FxHashSet<_>>();
    let emitted = RefCell::new(EmittedAssets::default());

    let route_resolver = ChunkResolver::new(BundleChunkSource::new(
      bundle,
      &self.options,
      &*self.fs,
      DynamicImportFilter::All,
      &emitted,
    ));
    try_join_all(bundle.chunks().map(|chunk| route_resolver.resolve(chunk))).await?;

    let entry_resolver = ChunkResolver::new(BundleChunkSource::new(
      bundle,
      &self.options,
      &*self.fs,
      DynamicImportFilter::Essential { route_module_ids: &route_module_ids },
      &emitted,
    ));
    let entry_idx = entry_resolver.resolve(entry_chunk).await?;

    let entry_graph = entry_resolver.into_graph();
    let route_graph = route_resolver.into_graph();
    let resource_prefix = &self.options.resource_prefix;

    let main = main_resource_dependencies(
      &entry_graph,
      entry_idx,
      |idx| transitive_resource_deps(&entry_graph, bundle, idx),
      resource_prefix,
    )?;
    let routes = route_resource_dependencies(
      &route_graph,
      &manifest_data.components,
      |component| {
        let module_id = route_module_id(&self.options, &manifest_data.routes_dir, &component.file);
        route_graph
          .chunk_owning(&module_id)
          .ok_or_else(|| ResolveError::RouteWithoutOwner { route: component.file.clone() }.into())
      },
      |idx| transitive_resource_deps(&route_graph, bundle, idx),
      resource_prefix,
    )?;

    let (assets, style_chunks) = emitted.into_inner().into_parts();
    let output = ManifestOutput {
      resources: ClientResourceSet { main, routes },
      assets,
      chunks: bundle.chunks().map(ChunkSummary::from_output_chunk).chain(style_chunks).collect(),
      warnings: bundle.warnings.clone(),
      chunk_graph: route_graph,
    };
    tracing::info!(
      main = output.resources.main.len(),
      routes = output.resources.routes.len(),
      assets = output.assets.len(),
      "Compiled client manifest"
    );
    tracing::debug!("\n{}", output.summary(&self.options.cwd));
    Ok(output)
  }
}

/// Everything reachable from `idx` that a page must load up front: stylesheets, static
/// dependencies, and dynamic dependencies that the chunk's code imports unconditionally.
fn transitive_resource_deps(
  graph: &ChunkGraph,
  bundle: &OutputBundle,
  idx: ChunkIdx,
) -> BuildResult<Vec<ChunkIdx>> {
  let root = &graph[idx];
  let eager = match bundle.get_chunk(&root.id) {
    Some(chunk) => discover_unconditional_imports(&chunk.code)?
      .iter()
      .filter_map(|specifier| resolve_chunk_specifier(&root.file_name, specifier))
      .collect::<FxHashSet<_>>(),
    None => FxHashSet::default(),
  };

  Ok(
    walk_dep_graph_with(&graph.chunk_table, vec![idx], |target| {
      if eager.contains(target.id.as_str()) { DynamicEdge::Static } else { DynamicEdge::Dynamic }
    })
    .filter(|visit| visit.chunk.chunk_type.is_style() || !visit.dynamic)
    .map(|visit| visit.idx)
    .collect(),
  )
}

/// Maps a `./` specifier found in the code of `importer` to the file name of the chunk it
/// points to. Anything else is not a chunk of this bundle.
fn resolve_chunk_specifier(importer: &str, specifier: &str) -> Option<String> {
  let relative = specifier.strip_prefix("./")?;
  match importer.rfind('/') {
    Some(pos) => Some(format!("{}/{relative}", &importer[..pos])),
    None => Some(relative.to_string()),
  }
}

#[test]
fn test_resolve_chunk_specifier() {
  assert_eq!(resolve_chunk_specifier("main.js", "./chunk.js"), Some("chunk.js".to_string()));
  assert_eq!(
    resolve_chunk_specifier("client/main.js", "./chunk.js"),
    Some("client/chunk.js".to_string())
  );
  assert_eq!(resolve_chunk_specifier("main.js", "https://cdn/x.js"), None);
}
