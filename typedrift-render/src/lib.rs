//! Rendering helpers: generated conversion functions and human-readable markdown.

mod conversion;
mod markdown;

pub use conversion::{Conversion, DroppedField, conversion_file_name, generate_conversion, generate_conversion_report};
pub use markdown::{render_comparison_md, render_pairs_md};
