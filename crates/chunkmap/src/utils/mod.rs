pub mod entry_point;
pub mod normalize_options;
pub mod render_dot;
pub mod summarize;
