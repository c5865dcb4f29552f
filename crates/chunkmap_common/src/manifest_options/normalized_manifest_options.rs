use std::path::PathBuf;

use chunkmap_sourcemap::SourceMapType;

use crate::{FilenameTemplate, OutputFormat};

#[derive(Debug)]
pub struct NormalizedManifestOptions {
  // --- Input
  pub entry_point: Option<String>,
  pub cwd: PathBuf,
  pub format: OutputFormat,

  // --- Output
  pub asset_filenames: FilenameTemplate,
  pub resource_prefix: String,
  pub sourcemap: Option<SourceMapType>,
  pub sourcemap_url_prefix: String,
}
