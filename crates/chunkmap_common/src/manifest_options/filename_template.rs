#[derive(Debug, Clone)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// Fills `[name]`, `[hash]`, `[extname]` (with the leading dot) and `[ext]` (without it).
  pub fn render(&self, name: &str, hash: &str, extname: &str) -> String {
    self
      .template
      .replace("[name]", name)
      .replace("[hash]", hash)
      .replace("[extname]", extname)
      .replace("[ext]", extname.trim_start_matches('.'))
  }
}

#[test]
fn test_render() {
  let template = FilenameTemplate::new("assets/[name]-[hash][extname]".to_string());
  assert_eq!(template.render("main", "abc", ".css"), "assets/main-abc.css");

  let template = FilenameTemplate::new("[name].[ext]".to_string());
  assert_eq!(template.render("main.css", "abc", ".map"), "main.css.map");
}
