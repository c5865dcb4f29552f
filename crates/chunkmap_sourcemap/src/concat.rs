use std::future::Future;

use chunkmap_error::{BuildResult, ResolveError};
use oxc_sourcemap::SourceMap;

use crate::{SourceFragment, SourceJoiner};

#[derive(Debug)]
pub struct MergedFragment {
  pub code: String,
  pub map: SourceMap,
}

/// Resolves every item to a fragment, in order, and merges them into a single fragment.
pub async fn concat_fragments<I, F, Fut>(items: I, mut resolve: F) -> BuildResult<MergedFragment>
where
  I: IntoIterator,
  F: FnMut(I::Item) -> Fut,
  Fut: Future<Output = BuildResult<SourceFragment>>,
{
  let mut joiner = SourceJoiner::default();
  for item in items {
    joiner.append_fragment(resolve(item).await?);
  }

  if joiner.is_empty() {
    return Err(ResolveError::NoFragments.into());
  }

  let (code, map) = joiner.join();
  Ok(MergedFragment { code, map })
}
