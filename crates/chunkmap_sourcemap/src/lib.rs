mod concat;
mod emit;
mod fragment;
mod lines_count;
mod source_joiner;

pub use crate::{
  concat::{MergedFragment, concat_fragments},
  emit::{SourceMapType, emit_code_and_sourcemap},
  fragment::{INLINE_SOURCEMAP_HEADER, SourceFragment, extract_sourcemap},
  lines_count::lines_count,
  source_joiner::SourceJoiner,
};
pub use oxc_sourcemap::{ConcatSourceMapBuilder, SourceMap};
