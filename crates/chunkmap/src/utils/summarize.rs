use std::path::Path;

use chunkmap_common::CompileError;
use itertools::Itertools;
use sugar_path::SugarPath;

use crate::ChunkSummary;

const SIZE_LABEL_WIDTH: usize = 10;

/// Renders a human readable report: warnings first, then every file sorted by name with its
/// modules, largest first.
pub fn summarize(warnings: &[CompileError], chunks: &[ChunkSummary], cwd: &Path) -> String {
  let warnings = warnings
    .iter()
    .map(|warning| match &warning.file {
      Some(file) => format!("> {file}\n{}", warning.message),
      None => format!("> {}", warning.message),
    })
    .join("\n");

  let chunks = chunks
    .iter()
    .sorted_by(|a, b| a.file_name.cmp(&b.file_name))
    .map(|chunk| summarize_chunk(chunk, cwd))
    .join("\n");

  if warnings.is_empty() { chunks } else { format!("{warnings}\n\n{chunks}") }
}

fn summarize_chunk(chunk: &ChunkSummary, cwd: &Path) -> String {
  let mut lines =
    vec![format!("{:>SIZE_LABEL_WIDTH$} {}", pretty_bytes(chunk.length), chunk.file_name)];

  let deps = chunk
    .modules
    .iter()
    .filter(|(_, size)| *size > 0)
    .sorted_by(|a, b| b.1.cmp(&a.1))
    .map(|(id, size)| {
      (Path::new(id.as_str()).relative(cwd).as_path().to_slash_lossy().into_owned(), *size)
    })
    .collect::<Vec<_>>();
  let total = deps.iter().map(|(_, size)| size).sum::<usize>();

  for (i, (file, size)) in deps.iter().enumerate() {
    let gutter = if i == deps.len() - 1 { '└' } else { '│' };
    let mut line = format!("{:SIZE_LABEL_WIDTH$} {gutter} {file}", "");
    if deps.len() > 1 {
      line.push_str(&format!(" ({:.1}%)", percentage(*size, total)));
    }
    lines.push(line);
  }

  lines.join("\n")
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, total: usize) -> f64 {
  100.0 * part as f64 / total as f64
}

/// Formats a byte count with three significant digits and decimal units.
#[allow(clippy::cast_precision_loss)]
fn pretty_bytes(bytes: usize) -> String {
  const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];
  if bytes < 1000 {
    return format!("{bytes} B");
  }

  let mut value = bytes as f64;
  let mut unit = 0;
  while value >= 1000.0 && unit < UNITS.len() - 1 {
    value /= 1000.0;
    unit += 1;
  }

  let decimals = if value >= 100.0 {
    0
  } else if value >= 10.0 {
    1
  } else {
    2
  };
  let formatted = format!("{value:.decimals$}");
  let formatted =
    if formatted.contains('.') { formatted.trim_end_matches('0').trim_end_matches('.') } else { &formatted };
  format!("{formatted} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use chunkmap_common::{CompileError, ModuleId};

  use super::{pretty_bytes, summarize};
  use crate::ChunkSummary;

  #[test]
  fn test_pretty_bytes() {
    assert_eq!(pretty_bytes(0), "0 B");
    assert_eq!(pretty_bytes(999), "999 B");
    assert_eq!(pretty_bytes(1000), "1 kB");
    assert_eq!(pretty_bytes(1500), "1.5 kB");
    assert_eq!(pretty_bytes(12_345), "12.3 kB");
    assert_eq!(pretty_bytes(150_000), "150 kB");
    assert_eq!(pretty_bytes(2_500_000), "2.5 MB");
  }

  #[test]
  fn test_summarize() {
    let chunks = [
      ChunkSummary {
        file_name: "main.js".to_string(),
        length: 1500,
        modules: vec![
          (ModuleId::from("/app/src/a.js"), 250),
          (ModuleId::from("/app/src/empty.js"), 0),
          (ModuleId::from("/app/src/b.js"), 750),
        ],
      },
      ChunkSummary {
        file_name: "assets/main-abc.css".to_string(),
        length: 12,
        modules: vec![(ModuleId::from("/app/src/main.css"), 12)],
      },
    ];
    let warnings =
      [CompileError { file: Some("src/a.js".to_string()), message: "unused import".to_string() }];

    let summary = summarize(&warnings, &chunks, Path::new("/app"));
    assert_eq!(
      summary,
      [
        "> src/a.js",
        "unused import",
        "",
        "      12 B assets/main-abc.css",
        "           └ src/main.css",
        "    1.5 kB main.js",
        "           │ src/b.js (75.0%)",
        "           └ src/a.js (25.0%)",
      ]
      .join("\n")
    );
  }

  #[test]
  fn no_warnings_no_leading_block() {
    let chunks = [ChunkSummary { file_name: "a.js".to_string(), length: 1, modules: vec![] }];
    assert_eq!(summarize(&[], &chunks, Path::new("/")), "       1 B a.js");
  }
}
