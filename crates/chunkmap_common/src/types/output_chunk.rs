use arcstr::ArcStr;
use chunkmap_utils::indexmap::FxIndexMap;
use serde::Deserialize;

use crate::ModuleId;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderedModule {
  pub rendered_length: u32,
}

/// A chunk emitted by the bundler. `imports` and `dynamic_imports` are file names of other
/// chunks of the same bundle.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputChunk {
  pub file_name: ArcStr,
  pub name: ArcStr,
  #[serde(default)]
  pub code: String,
  #[serde(default)]
  pub is_entry: bool,
  pub modules: FxIndexMap<ModuleId, RenderedModule>,
  #[serde(default)]
  pub imports: Vec<ArcStr>,
  #[serde(default)]
  pub dynamic_imports: Vec<ArcStr>,
}

impl OutputChunk {
  pub fn contains_module(&self, module_id: &ModuleId) -> bool {
    self.modules.contains_key(module_id)
  }
}
