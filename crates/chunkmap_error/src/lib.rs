mod resolve_error;

use std::{
  fmt::Display,
  ops::{Deref, DerefMut},
};

pub use crate::resolve_error::ResolveError;

/// All fatal errors collected while producing a manifest. A session that ends with a
/// `BuildError` emits nothing.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Finds the first structural error of the session, if any.
  pub fn resolve_error(&self) -> Option<&ResolveError> {
    self.0.iter().find_map(|err| err.downcast_ref::<ResolveError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, err) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{err:#}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<ResolveError> for BuildError {
  fn from(error: ResolveError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_resolve_error_is_recoverable_from_build_error() {
  let err = BuildError::from(ResolveError::RouteWithoutOwner { route: "about.svelte".into() });
  assert!(matches!(err.resolve_error(), Some(ResolveError::RouteWithoutOwner { .. })));
  assert_eq!(err.to_string(), "Could not find chunk that owns route about.svelte");
}
