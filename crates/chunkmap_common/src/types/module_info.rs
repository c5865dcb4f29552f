use chunkmap_utils::indexmap::FxIndexSet;
use serde::Deserialize;

use crate::ModuleId;

/// What the bundler knows about the imports of a single module, including imports that did not
/// become chunk level edges (stylesheets, for instance).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleInfo {
  pub id: ModuleId,
  #[serde(default)]
  pub imported_ids: FxIndexSet<ModuleId>,
  #[serde(default)]
  pub dynamically_imported_ids: FxIndexSet<ModuleId>,
}

impl ModuleInfo {
  pub fn new(
    id: impl Into<ModuleId>,
    imported_ids: impl IntoIterator<Item = ModuleId>,
    dynamically_imported_ids: impl IntoIterator<Item = ModuleId>,
  ) -> Self {
    Self {
      id: id.into(),
      imported_ids: imported_ids.into_iter().collect(),
      dynamically_imported_ids: dynamically_imported_ids.into_iter().collect(),
    }
  }
}
