use arcstr::ArcStr;
use chunkmap_utils::indexmap::FxIndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{CompileError, ModuleId, ModuleInfo, OutputChunk};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutputBundle {
  chunks: Vec<OutputChunk>,
  #[serde(default)]
  modules: Vec<ModuleInfo>,
  #[serde(default)]
  warnings: Vec<CompileError>,
}

/// Everything the bundler emitted for one build, keyed for lookups by chunk file name and by
/// module id.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "RawOutputBundle")]
pub struct OutputBundle {
  chunks: FxIndexMap<ArcStr, OutputChunk>,
  modules: FxHashMap<ModuleId, ModuleInfo>,
  pub warnings: Vec<CompileError>,
}

impl From<RawOutputBundle> for OutputBundle {
  fn from(raw: RawOutputBundle) -> Self {
    let mut bundle = Self::new(raw.chunks, raw.modules);
    bundle.warnings = raw.warnings;
    bundle
  }
}

impl OutputBundle {
  pub fn new(chunks: Vec<OutputChunk>, modules: Vec<ModuleInfo>) -> Self {
    Self {
      chunks: chunks.into_iter().map(|chunk| (chunk.file_name.clone(), chunk)).collect(),
      modules: modules.into_iter().map(|info| (info.id.clone(), info)).collect(),
      warnings: Vec::new(),
    }
  }

  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }

  pub fn chunks(&self) -> impl Iterator<Item = &OutputChunk> {
    self.chunks.values()
  }

  pub fn get_chunk(&self, file_name: &str) -> Option<&OutputChunk> {
    self.chunks.get(file_name)
  }

  pub fn module_info(&self, module_id: &ModuleId) -> Option<&ModuleInfo> {
    self.modules.get(module_id)
  }
}

#[test]
fn test_deserialize_bundle() {
  let bundle = OutputBundle::from_json(
    r#"{
      "chunks": [
        {
          "file_name": "main.js",
          "name": "main",
          "code": "import('./page.js')",
          "is_entry": true,
          "modules": { "/src/main.js": { "rendered_length": 19 } },
          "dynamic_imports": ["page.js"]
        }
      ],
      "modules": [{ "id": "/src/main.js", "imported_ids": ["/src/main.css"] }]
    }"#,
  )
  .unwrap();

  let chunk = bundle.get_chunk("main.js").unwrap();
  assert!(chunk.is_entry);
  assert!(chunk.contains_module(&ModuleId::from("/src/main.js")));
  assert_eq!(chunk.dynamic_imports, [ArcStr::from("page.js")]);
  let info = bundle.module_info(&ModuleId::from("/src/main.js")).unwrap();
  assert!(info.imported_ids.contains(&ModuleId::from("/src/main.css")));
  assert!(info.dynamically_imported_ids.is_empty());
}

#[test]
fn test_reject_unknown_fields() {
  let err = OutputBundle::from_json(
    r#"{ "chunks": [{ "file_name": "a.js", "name": "a", "modules": {}, "kind": "chunk" }] }"#,
  );
  assert!(err.is_err());
}
