use chunkmap_common::{ModuleId, OutputChunk};

/// Size information of one emitted file, as printed by [`crate::summarize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSummary {
  pub file_name: String,
  pub length: usize,
  pub modules: Vec<(ModuleId, usize)>,
}

impl ChunkSummary {
  pub fn from_output_chunk(chunk: &OutputChunk) -> Self {
    Self {
      file_name: chunk.file_name.to_string(),
      length: chunk.code.len(),
      modules: chunk
        .modules
        .iter()
        .map(|(id, module)| (id.clone(), module.rendered_length as usize))
        .collect(),
    }
  }
}
