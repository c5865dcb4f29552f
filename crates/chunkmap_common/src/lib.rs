mod chunk;
mod manifest_options;
mod types;

pub use crate::{
  chunk::{Chunk, chunk_internals::ChunkInternals, chunk_type::ChunkType},
  manifest_options::{
    ManifestOptions, filename_template::FilenameTemplate,
    normalized_manifest_options::NormalizedManifestOptions, output_format::OutputFormat,
  },
  types::{
    client_resource_set::ClientResourceSet,
    compile_error::CompileError,
    manifest_data::{ManifestData, RouteComponent},
    module_id::ModuleId,
    module_info::ModuleInfo,
    output_asset::OutputAsset,
    output_bundle::OutputBundle,
    output_chunk::{OutputChunk, RenderedModule},
    page_resource::PageResource,
    raw_idx::ChunkIdx,
  },
};
pub use chunkmap_sourcemap::SourceMapType;
