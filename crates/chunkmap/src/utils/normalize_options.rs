use chunkmap_common::{FilenameTemplate, ManifestOptions, NormalizedManifestOptions};

pub fn normalize_options(raw_options: ManifestOptions) -> NormalizedManifestOptions {
  NormalizedManifestOptions {
    entry_point: raw_options.entry_point,
    cwd: raw_options
      .cwd
      .or_else(|| std::env::current_dir().ok())
      .unwrap_or_default(),
    format: raw_options.format.unwrap_or_default(),
    asset_filenames: FilenameTemplate::new(
      raw_options.asset_filenames.unwrap_or_else(|| "assets/[name]-[hash][extname]".to_string()),
    ),
    resource_prefix: raw_options.resource_prefix.unwrap_or_default(),
    sourcemap: raw_options.sourcemap,
    sourcemap_url_prefix: raw_options.sourcemap_url_prefix.unwrap_or_default(),
  }
}

#[test]
fn test_defaults() {
  let options = normalize_options(ManifestOptions {
    cwd: Some("/app".into()),
    ..Default::default()
  });
  assert_eq!(options.cwd, std::path::Path::new("/app"));
  assert_eq!(options.format, chunkmap_common::OutputFormat::Esm);
  assert_eq!(options.asset_filenames.template(), "assets/[name]-[hash][extname]");
  assert_eq!(options.resource_prefix, "");
  assert!(options.sourcemap.is_none());
}
