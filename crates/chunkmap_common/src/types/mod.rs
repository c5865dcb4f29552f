pub mod client_resource_set;
pub mod compile_error;
pub mod manifest_data;
pub mod module_id;
pub mod module_info;
pub mod output_asset;
pub mod output_bundle;
pub mod output_chunk;
pub mod page_resource;
pub mod raw_idx;
