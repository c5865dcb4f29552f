use std::path::Path;

use chunkmap_common::{ModuleId, NormalizedManifestOptions, OutputBundle, OutputChunk};
use chunkmap_error::{BuildResult, ResolveError};
use sugar_path::SugarPath;

/// The module id of the configured entry point: `.js` is appended unless the name already has a
/// script extension, and relative names are resolved against `cwd`.
pub fn entry_point_module_id(options: &NormalizedManifestOptions) -> BuildResult<ModuleId> {
  let Some(entry_point) = options.entry_point.as_deref() else {
    return Err(ResolveError::MissingEntryPoint.into());
  };

  let has_script_extension = Path::new(entry_point)
    .extension()
    .is_some_and(|ext| matches!(ext.to_str(), Some("js" | "mjs" | "cjs")));
  let file = if has_script_extension { entry_point.to_string() } else { format!("{entry_point}.js") };

  let path = options.cwd.join(file).normalize();
  Ok(ModuleId::new(path.as_path().to_slash_lossy().into_owned()))
}

pub fn entry_point_output_chunk<'a>(
  bundle: &'a OutputBundle,
  entry_point: &ModuleId,
) -> BuildResult<&'a OutputChunk> {
  match bundle.chunks().find(|chunk| chunk.contains_module(entry_point)) {
    Some(chunk) => Ok(chunk),
    None => Err(
      ResolveError::NoChunkForEntryPoint {
        entry_point: entry_point.to_string(),
        modules: bundle
          .chunks()
          .map(|chunk| chunk.modules.keys().map(ToString::to_string).collect())
          .collect(),
      }
      .into(),
    ),
  }
}

/// Module id of a route component, `file` being relative to `routes_dir`.
pub fn route_module_id(
  options: &NormalizedManifestOptions,
  routes_dir: &str,
  file: &str,
) -> ModuleId {
  let path = options.cwd.join(routes_dir).join(file).normalize();
  ModuleId::new(path.as_path().to_slash_lossy().into_owned())
}

#[cfg(test)]
mod tests {
  use chunkmap_common::{ManifestOptions, ModuleId, OutputBundle, OutputChunk, RenderedModule};
  use chunkmap_error::ResolveError;

  use super::{entry_point_module_id, entry_point_output_chunk, route_module_id};
  use crate::utils::normalize_options::normalize_options;

  fn options(entry_point: Option<&str>) -> chunkmap_common::NormalizedManifestOptions {
    normalize_options(ManifestOptions {
      entry_point: entry_point.map(ToString::to_string),
      cwd: Some("/app".into()),
      ..Default::default()
    })
  }

  #[test]
  fn script_extension_is_appended() {
    let module_id = |entry_point| entry_point_module_id(&options(Some(entry_point))).unwrap();
    assert_eq!(module_id("src/main").as_str(), "/app/src/main.js");
    assert_eq!(module_id("src/main.mjs").as_str(), "/app/src/main.mjs");
    assert_eq!(module_id("/abs/main.js").as_str(), "/abs/main.js");
  }

  #[test]
  fn missing_entry_point() {
    let err = entry_point_module_id(&options(None)).unwrap_err();
    assert!(matches!(err.resolve_error(), Some(ResolveError::MissingEntryPoint)));
  }

  #[test]
  fn entry_point_without_chunk() {
    let bundle = OutputBundle::new(
      vec![OutputChunk {
        file_name: "main.js".into(),
        name: "main".into(),
        code: String::new(),
        is_entry: true,
        modules: [(ModuleId::from("/app/src/other.js"), RenderedModule::default())]
          .into_iter()
          .collect(),
        imports: vec![],
        dynamic_imports: vec![],
      }],
      vec![],
    );
    let err = entry_point_output_chunk(&bundle, &ModuleId::from("/app/src/main.js")).unwrap_err();
    match err.resolve_error() {
      Some(ResolveError::NoChunkForEntryPoint { entry_point, modules }) => {
        assert_eq!(entry_point, "/app/src/main.js");
        assert_eq!(modules, &[vec!["/app/src/other.js".to_string()]]);
      }
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn route_ids_are_normalized() {
    assert_eq!(
      route_module_id(&options(None), "src/routes", "./blog/[slug].svelte").as_str(),
      "/app/src/routes/blog/[slug].svelte"
    );
  }
}
