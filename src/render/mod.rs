//! Rendering module for converting layout documents to output formats.

mod docx;
mod json;
mod options;
mod output;
mod package;
mod result;
mod text;

pub use docx::{to_docx, write_docx, write_docx_file, DocxWriter};
pub use json::{render_json, to_json, JsonFormat};
pub use options::RenderOptions;
pub(crate) use output::write_output;
pub use package::PackageCompression;
pub use result::LayoutStats;
pub use text::to_text;
