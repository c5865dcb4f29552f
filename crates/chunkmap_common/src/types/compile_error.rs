use serde::{Deserialize, Serialize};

/// A warning or error reported by the bundler, carried through to the build summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileError {
  #[serde(default)]
  pub file: Option<String>,
  pub message: String,
}
