use chunkmap_utils::indexmap::FxIndexMap;
use serde::Serialize;

use crate::PageResource;

/// Resources of the entry point and of every route component, keyed by component file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ClientResourceSet {
  pub main: Vec<PageResource>,
  pub routes: FxIndexMap<String, Vec<PageResource>>,
}
