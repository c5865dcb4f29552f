#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
  pub file_name: String,
  pub content: String,
}

impl OutputAsset {
  pub fn file_name(&self) -> &str {
    &self.file_name
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.content.as_bytes()
  }
}
