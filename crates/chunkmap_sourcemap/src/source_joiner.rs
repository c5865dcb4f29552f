use oxc_sourcemap::{ConcatSourceMapBuilder, SourceMap};

use crate::{SourceFragment, lines_count};

/// Joins fragments with `\n` and stitches their sourcemaps into one.
///
/// Source and name indices of each map are shifted by the number of sources and names the
/// previous maps contributed, and generated lines by the lines of code emitted before it.
#[derive(Default)]
pub struct SourceJoiner {
  inner: Vec<SourceFragment>,
}

impl SourceJoiner {
  pub fn append_fragment(&mut self, fragment: SourceFragment) {
    self.inner.push(fragment);
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  pub fn join(&self) -> (String, SourceMap) {
    let size_hint = self.inner.iter().map(|fragment| fragment.code.len()).sum::<usize>()
      + /* one '\n' between each pair of fragments */ self.inner.len().saturating_sub(1);
    let mut code = String::with_capacity(size_hint);
    let mut map_builder = ConcatSourceMapBuilder::default();
    let mut line_offset = 0;

    for (index, fragment) in self.inner.iter().enumerate() {
      if index > 0 {
        code.push('\n');
      }
      code.push_str(&fragment.code);

      if let Some(map) = &fragment.map {
        map_builder.add_sourcemap(map, line_offset);
      }
      line_offset += lines_count(&fragment.code) + 1;
    }

    (code, map_builder.into_sourcemap())
  }
}

#[test]
fn test_join_code() {
  let mut joiner = SourceJoiner::default();
  joiner.append_fragment(SourceFragment::new("a {}\nb {}", None));
  joiner.append_fragment(SourceFragment::new("c {}", None));
  let (code, map) = joiner.join();
  assert_eq!(code, "a {}\nb {}\nc {}");
  assert_eq!(map.get_tokens().count(), 0);
}

#[test]
fn test_join_offsets_lines_sources_and_names() {
  let map = |source: &str, name: &str| {
    SourceMap::from_json_string(&format!(
      r#"{{"version":3,"sources":["{source}"],"sourcesContent":["{name} {{}}"],"names":["{name}"],"mappings":"AAAAA"}}"#
    ))
    .unwrap()
  };

  let mut joiner = SourceJoiner::default();
  joiner.append_fragment(SourceFragment::new("a {}\n", Some(map("a.css", "a"))));
  joiner.append_fragment(SourceFragment::new("no map", None));
  joiner.append_fragment(SourceFragment::new("x {}", Some(map("b.css", "x"))));
  let (code, map) = joiner.join();

  assert_eq!(code, "a {}\n\nno map\nx {}");
  assert_eq!(map.get_sources().map(ToString::to_string).collect::<Vec<_>>(), ["a.css", "b.css"]);
  assert_eq!(map.get_names().map(ToString::to_string).collect::<Vec<_>>(), ["a", "x"]);

  let tokens = map
    .get_tokens()
    .map(|token| (token.get_dst_line(), token.get_source_id(), token.get_name_id()))
    .collect::<Vec<_>>();
  assert_eq!(tokens, [(0, Some(0), Some(0)), (3, Some(1), Some(1))]);
}
