//! Built-in renderers for DOCX, JSON and plain text.

use crate::error::Result;
use crate::model::LayoutDocument;
use crate::render::{render_json, to_text, DocxWriter, RenderOptions};
use std::io::Write;

use super::{DocumentRenderer, OutputFormat};

/// DOCX renderer.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    _private: (),
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for DocxRenderer {
    fn name(&self) -> &str {
        "docx"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn mime_type(&self) -> &'static str {
        OutputFormat::Docx.mime_type()
    }

    fn render_to(
        &self,
        doc: &LayoutDocument,
        options: &RenderOptions,
        writer: &mut dyn Write,
    ) -> Result<()> {
        DocxWriter::new(options.clone()).write(doc, writer)?;
        Ok(())
    }
}

/// JSON renderer.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    _private: (),
}

impl JsonRenderer {
    /// Create a new JSON renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        OutputFormat::Json.mime_type()
    }

    fn render_to(
        &self,
        doc: &LayoutDocument,
        options: &RenderOptions,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let json = render_json(doc, options)?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Plain text renderer.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    _private: (),
}

impl TextRenderer {
    /// Create a new text renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn mime_type(&self) -> &'static str {
        OutputFormat::Text.mime_type()
    }

    fn render_to(
        &self,
        doc: &LayoutDocument,
        _options: &RenderOptions,
        writer: &mut dyn Write,
    ) -> Result<()> {
        writer.write_all(to_text(doc).as_bytes())?;
        Ok(())
    }
}
