use chunkmap_common::{FilenameTemplate, OutputAsset};
use chunkmap_utils::{indexmap::FxIndexMap, xxhash::xxhash_base64_url};

use crate::ChunkSummary;

/// Assets produced while resolving, shared by every session of one compilation. Emitting the
/// same content under the same name twice yields a single asset.
#[derive(Debug, Default)]
pub struct EmittedAssets {
  assets: FxIndexMap<String, OutputAsset>,
  summaries: FxIndexMap<String, ChunkSummary>,
}

impl EmittedAssets {
  /// Emits `content` under a file name rendered from `template` and returns that file name.
  pub fn emit_asset(&mut self, template: &FilenameTemplate, name: &str, content: String) -> String {
    let hash = xxhash_base64_url(content.as_bytes());
    let (stem, extname) = match name.rfind('.') {
      Some(pos) if pos > 0 => name.split_at(pos),
      _ => (name, ""),
    };
    let file_name = template.render(stem, &hash[..8], extname);
    self
      .assets
      .entry(file_name.clone())
      .or_insert_with(|| OutputAsset { file_name: file_name.clone(), content });
    file_name
  }

  pub fn add_summary(&mut self, summary: ChunkSummary) {
    self.summaries.entry(summary.file_name.clone()).or_insert(summary);
  }

  pub fn assets(&self) -> impl Iterator<Item = &OutputAsset> {
    self.assets.values()
  }

  pub fn into_parts(self) -> (Vec<OutputAsset>, Vec<ChunkSummary>) {
    (self.assets.into_values().collect(), self.summaries.into_values().collect())
  }
}

#[test]
fn test_emit_asset() {
  let template = FilenameTemplate::new("assets/[name]-[hash][extname]".to_string());
  let mut emitted = EmittedAssets::default();

  let first = emitted.emit_asset(&template, "main.css", "a{}".to_string());
  let second = emitted.emit_asset(&template, "main.css", "a{}".to_string());
  let other = emitted.emit_asset(&template, "main.css", "b{}".to_string());

  assert!(first.starts_with("assets/main-"));
  assert!(first.ends_with(".css"));
  assert_eq!(first, second);
  assert_ne!(first, other);
  assert_eq!(emitted.assets().count(), 2);
}
