use serde::Deserialize;

/// A page component that gets its own resource set, `file` being relative to `routes_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteComponent {
  pub name: String,
  pub file: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestData {
  pub routes_dir: String,
  #[serde(default)]
  pub components: Vec<RouteComponent>,
}
