pub mod filename_template;
pub mod normalized_manifest_options;
pub mod output_format;

use std::path::PathBuf;

use chunkmap_sourcemap::SourceMapType;
use serde::Deserialize;

use crate::OutputFormat;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestOptions {
  // --- Input
  pub entry_point: Option<String>,
  pub cwd: Option<PathBuf>,
  pub format: Option<OutputFormat>,

  // --- Output
  pub asset_filenames: Option<String>,
  pub resource_prefix: Option<String>,
  pub sourcemap: Option<SourceMapType>,
  pub sourcemap_url_prefix: Option<String>,
}
