use std::{cell::RefCell, future::Future, path::Path};

use arcstr::ArcStr;
use chunkmap_common::{
  ChunkInternals, ChunkType, ModuleId, NormalizedManifestOptions, OutputBundle, OutputChunk,
};
use chunkmap_error::BuildResult;
use chunkmap_fs::FileSystem;
use chunkmap_sourcemap::{SourceFragment, concat_fragments, emit_code_and_sourcemap, extract_sourcemap};
use rustc_hash::FxHashSet;

use crate::{ChunkSource, ChunkSummary, EmittedAssets};

/// Which dynamic imports of a bundler chunk become dynamic edges.
#[derive(Debug, Clone, Copy)]
pub enum DynamicImportFilter<'a> {
  All,
  /// Keeps imports of chunks that are missing from the bundle, or that carry a module which a
  /// module of the importer imports dynamically. Route modules are excluded, the router loads
  /// them on its own.
  Essential { route_module_ids: &'a FxHashSet<ModuleId> },
}

/// Serves the chunks of a bundler output. Style modules are read through `fs` and emitted as
/// assets into `emitted`.
pub struct BundleChunkSource<'a> {
  bundle: &'a OutputBundle,
  options: &'a NormalizedManifestOptions,
  fs: &'a dyn FileSystem,
  dynamic_imports: DynamicImportFilter<'a>,
  emitted: &'a RefCell<EmittedAssets>,
}

impl<'a> BundleChunkSource<'a> {
  pub fn new(
    bundle: &'a OutputBundle,
    options: &'a NormalizedManifestOptions,
    fs: &'a dyn FileSystem,
    dynamic_imports: DynamicImportFilter<'a>,
    emitted: &'a RefCell<EmittedAssets>,
  ) -> Self {
    Self { bundle, options, fs, dynamic_imports, emitted }
  }

  fn dynamic_dep_ids(&self, chunk: &OutputChunk) -> Vec<ArcStr> {
    match self.dynamic_imports {
      DynamicImportFilter::All => chunk.dynamic_imports.clone(),
      DynamicImportFilter::Essential { route_module_ids } => {
        let essential_modules = chunk
          .modules
          .keys()
          .filter_map(|id| self.bundle.module_info(id))
          .flat_map(|info| &info.dynamically_imported_ids)
          .filter(|id| !route_module_ids.contains(*id))
          .collect::<FxHashSet<_>>();

        chunk
          .dynamic_imports
          .iter()
          .filter(|file_name| match self.bundle.get_chunk(file_name) {
            Some(target) => target.modules.keys().any(|id| essential_modules.contains(id)),
            None => true,
          })
          .cloned()
          .collect()
      }
    }
  }

  fn read_style_module(&self, module_id: &ModuleId) -> BuildResult<SourceFragment> {
    let path = Path::new(module_id.as_str());
    if !self.fs.exists(path) {
      return Err(anyhow::anyhow!("Style module {module_id} does not exist").into());
    }
    let raw = self
      .fs
      .read_to_string(path)
      .map_err(|err| anyhow::anyhow!("Failed to read style module {module_id}: {err}"))?;
    extract_sourcemap(&raw, module_id)
  }
}

impl<'a> ChunkSource for BundleChunkSource<'a> {
  type Unit = &'a OutputChunk;

  fn id(&self, unit: &&'a OutputChunk) -> ArcStr {
    unit.file_name.clone()
  }

  fn resolve_id(&self, id: &str) -> impl Future<Output = Option<&'a OutputChunk>> {
    std::future::ready(self.bundle.get_chunk(id))
  }

  fn internals(&self, unit: &&'a OutputChunk) -> impl Future<Output = BuildResult<ChunkInternals>> {
    let chunk = *unit;
    std::future::ready(Ok(ChunkInternals {
      id: chunk.file_name.clone(),
      name: chunk.name.clone(),
      chunk_type: self.options.format.chunk_type(),
      file_name: chunk.file_name.clone(),
      manifest: chunk.modules.keys().cloned().collect(),
      dep_ids: chunk.imports.clone(),
      dynamic_dep_ids: self.dynamic_dep_ids(chunk),
    }))
  }

  fn module_imports(
    &self,
    module_id: &ModuleId,
  ) -> impl Future<Output = BuildResult<Vec<ModuleId>>> {
    let imports = self.bundle.module_info(module_id).map_or_else(Vec::new, |info| {
      info
        .imported_ids
        .iter()
        .chain(&info.dynamically_imported_ids)
        .filter(|id| id.ends_with(".css"))
        .cloned()
        .collect()
    });
    std::future::ready(Ok(imports))
  }

  async fn chunks_from_modules(
    &self,
    owner: &&'a OutputChunk,
    module_ids: Vec<ModuleId>,
  ) -> BuildResult<Vec<ChunkInternals>> {
    let name = format!("{}.css", owner.name);

    let mut modules = Vec::with_capacity(module_ids.len());
    let merged = concat_fragments(&module_ids, |module_id| {
      let fragment = self.read_style_module(module_id);
      if let Ok(fragment) = &fragment {
        modules.push((module_id.clone(), fragment.code.len()));
      }
      std::future::ready(fragment)
    })
    .await?;

    let options = self.options;
    let mut emitted = self.emitted.borrow_mut();
    let mut length = 0;
    let file_name = emit_code_and_sourcemap(
      options.sourcemap,
      &options.sourcemap_url_prefix,
      &name,
      merged,
      |asset_name, content| {
        if asset_name == name {
          length = content.len();
        }
        emitted.emit_asset(&options.asset_filenames, asset_name, content)
      },
    );
    emitted.add_summary(ChunkSummary { file_name: file_name.clone(), length, modules });
    tracing::debug!(owner = %owner.file_name, file = %file_name, "Emitted style chunk");

    let file_name = ArcStr::from(file_name);
    Ok(vec![ChunkInternals {
      id: file_name.clone(),
      name: name.into(),
      chunk_type: ChunkType::Style,
      file_name,
      manifest: module_ids,
      dep_ids: vec![],
      dynamic_dep_ids: vec![],
    }])
  }
}
