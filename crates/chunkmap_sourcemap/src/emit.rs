use base64_simd::STANDARD;
use serde::Deserialize;

use crate::{INLINE_SOURCEMAP_HEADER, MergedFragment};

/// Where the merged sourcemap of an emitted asset goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapType {
  /// A sibling `<file>.map` asset, referenced from a trailing comment.
  File,
  /// A base64 data url in the trailing comment.
  Inline,
}

/// Emits `output` (and its map, depending on `sourcemap`) through `emit`, which receives a
/// desired name and the content and returns the final file name. Returns the file name of the
/// emitted code.
pub fn emit_code_and_sourcemap(
  sourcemap: Option<SourceMapType>,
  sourcemap_url_prefix: &str,
  output_file_name: &str,
  output: MergedFragment,
  mut emit: impl FnMut(&str, String) -> String,
) -> String {
  let MergedFragment { mut code, mut map } = output;
  map.set_file(output_file_name);

  match sourcemap {
    Some(SourceMapType::File) => {
      let sourcemap_path = emit(&format!("{output_file_name}.map"), map.to_json_string());
      code.push_str(&format!("\n/*# sourceMappingURL={sourcemap_url_prefix}{sourcemap_path} */"));
    }
    Some(SourceMapType::Inline) => {
      let base64 = STANDARD.encode_to_string(map.to_json_string());
      code.push_str(&format!("\n/*# sourceMappingURL={INLINE_SOURCEMAP_HEADER}{base64} */"));
    }
    None => {}
  }

  emit(output_file_name, code)
}

#[cfg(test)]
mod tests {
  use oxc_sourcemap::SourceMap;

  use super::{SourceMapType, emit_code_and_sourcemap};
  use crate::{INLINE_SOURCEMAP_HEADER, MergedFragment, extract_sourcemap};

  fn merged() -> MergedFragment {
    let map = SourceMap::from_json_string(
      r#"{"version":3,"sources":["a.css"],"sourcesContent":["a{}"],"names":[],"mappings":"AAAA"}"#,
    )
    .unwrap();
    MergedFragment { code: "a{}".to_string(), map }
  }

  #[test]
  fn without_sourcemap() {
    let mut emitted = vec![];
    let file = emit_code_and_sourcemap(None, "", "main.css", merged(), |name, content| {
      emitted.push((name.to_string(), content));
      format!("assets/{name}")
    });
    assert_eq!(file, "assets/main.css");
    assert_eq!(emitted, [("main.css".to_string(), "a{}".to_string())]);
  }

  #[test]
  fn file_sourcemap() {
    let mut emitted = vec![];
    let file =
      emit_code_and_sourcemap(Some(SourceMapType::File), "/static/", "main.css", merged(), |name, content| {
        emitted.push((name.to_string(), content));
        name.to_string()
      });
    assert_eq!(file, "main.css");
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].0, "main.css.map");
    assert!(emitted[0].1.contains(r#""file":"main.css""#));
    assert_eq!(emitted[1].1, "a{}\n/*# sourceMappingURL=/static/main.css.map */");
  }

  #[test]
  fn inline_sourcemap_round_trips_through_extraction() {
    let mut code = String::new();
    emit_code_and_sourcemap(Some(SourceMapType::Inline), "", "main.css", merged(), |name, content| {
      code = content;
      name.to_string()
    });
    assert!(code.contains(INLINE_SOURCEMAP_HEADER));

    let fragment = extract_sourcemap(&code, "main.css").unwrap();
    assert_eq!(fragment.code, "a{}");
    assert_eq!(
      fragment.map.unwrap().get_sources().map(ToString::to_string).collect::<Vec<_>>(),
      ["a.css"]
    );
  }
}
