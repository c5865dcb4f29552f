pub mod chunk_summary;
pub mod emitted_assets;
pub mod manifest_output;
