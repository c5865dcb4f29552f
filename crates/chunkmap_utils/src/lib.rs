pub mod dedupe;
pub mod indexmap;
pub mod xxhash;
