use std::sync::LazyLock;

use base64_simd::STANDARD;
use chunkmap_error::{BuildResult, ResolveError};
use oxc_sourcemap::SourceMap;
use regex::Regex;

pub const INLINE_SOURCEMAP_HEADER: &str = "data:application/json;charset=utf-8;base64,";

static SOURCEMAP_COMMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"/\*#\s+sourceMappingURL=(\S+?)\s*\*/").unwrap());

/// A piece of code with its optional sourcemap, consumed once by the joiner.
#[derive(Debug)]
pub struct SourceFragment {
  pub code: String,
  pub map: Option<SourceMap>,
}

impl SourceFragment {
  pub fn new(code: impl Into<String>, map: Option<SourceMap>) -> Self {
    Self { code: code.into(), map }
  }
}

/// Strips the `sourceMappingURL` comment from `raw` and decodes it when it is an inline data
/// url. References to external map files are dropped.
pub fn extract_sourcemap(raw: &str, module_id: &str) -> BuildResult<SourceFragment> {
  let mut raw_map = None;
  for captures in SOURCEMAP_COMMENT_RE.captures_iter(raw) {
    if raw_map.is_some() {
      Err(ResolveError::MultipleSourcemaps { module_id: module_id.to_string() })?;
    }
    raw_map = captures.get(1).map(|url| url.as_str());
  }

  let code = SOURCEMAP_COMMENT_RE.replace_all(raw, "").trim().to_string();
  let map = match raw_map.and_then(|url| url.strip_prefix(INLINE_SOURCEMAP_HEADER)) {
    Some(data) => Some(decode_inline_sourcemap(data, module_id)?),
    None => None,
  };

  Ok(SourceFragment { code, map })
}

fn decode_inline_sourcemap(data: &str, module_id: &str) -> BuildResult<SourceMap> {
  let invalid = |reason: String| ResolveError::InvalidSourcemap {
    module_id: module_id.to_string(),
    reason,
  };

  let bytes = STANDARD.decode_to_vec(data).map_err(|err| invalid(format!("{err:?}")))?;
  let json = String::from_utf8(bytes).map_err(|err| invalid(err.to_string()))?;
  Ok(SourceMap::from_json_string(&json).map_err(|err| invalid(format!("{err:?}")))?)
}
