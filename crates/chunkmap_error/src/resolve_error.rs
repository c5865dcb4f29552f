use thiserror::Error;

/// Structural inconsistencies between the bundler output and what the manifest needs. Each of
/// these aborts the session.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("No entry point was configured")]
  MissingEntryPoint,
  #[error("No chunk for entry point {entry_point}, chunks contain: {modules:?}")]
  NoChunkForEntryPoint { entry_point: String, modules: Vec<Vec<String>> },
  #[error("Could not find chunk that owns route {route}")]
  RouteWithoutOwner { route: String },
  #[error("Found multiple sourcemaps in single file ({module_id})")]
  MultipleSourcemaps { module_id: String },
  #[error("No content available for chunk")]
  NoFragments,
  #[error("Resolution of chunk {id} was abandoned before it was defined")]
  AbandonedResolution { id: String },
  #[error("Invalid sourcemap in {module_id}: {reason}")]
  InvalidSourcemap { module_id: String, reason: String },
}
