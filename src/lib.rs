//! # ocr2docx
//!
//! Rebuild editable Word documents from positioned OCR output.
//!
//! A recognition provider returns the text lines of a scanned image together
//! with their pixel outlines. This library turns that list into a page sized
//! after the image and one paragraph per line, each indented and spaced so
//! it sits where it sat in the scan, and writes the result as DOCX, JSON or
//! plain text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocr2docx::Ocr2Docx;
//!
//! fn main() -> ocr2docx::Result<()> {
//!     // Reads the provider response saved as `scan.png.json`
//!     let result = Ocr2Docx::new().with_font("SimSun").open("scan.png")?;
//!     result.write_docx("scan.docx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pure layout engine**: pixel geometry to twentieths of a point
//! - **Provider responses**: positioned general recognition JSON
//! - **Multiple output formats**: DOCX, JSON, plain text
//! - **Parallel processing**: Uses Rayon for batch conversion

pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod recognition;
pub mod render;

// Re-export commonly used types
pub use convert::{
    BatchOutcome, ConvertJob, ConvertOptions, ConvertResult, Converter, DocumentRenderer,
    OutputFormat, RendererRegistry,
};
pub use detect::{detect_image_from_bytes, detect_image_from_path, is_supported_image, ImageInfo};
pub use error::{Error, Result};
pub use layout::{GapMode, LayoutEngine, LayoutOptions, OverlapSpacing};
pub use model::{
    BoundingBox, LayoutDocument, Metadata, Orientation, PageSpec, ParagraphPlacement, Point,
    Quadrilateral, Token, TokenSequence,
};
pub use recognition::{
    parse_general_response, GeneralResponse, RecognitionRequest, Recognizer,
    ResponseFileRecognizer,
};
pub use render::{JsonFormat, LayoutStats, RenderOptions};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Compute the page geometry for an image.
///
/// # Example
///
/// ```
/// use ocr2docx::compute_page_spec;
///
/// let page = compute_page_spec(1000, 600).unwrap();
/// assert_eq!((page.width_units, page.height_units), (20200, 13397));
/// ```
pub fn compute_page_spec(image_width: u32, image_height: u32) -> Result<PageSpec> {
    LayoutEngine::new().compute_page_spec(image_width, image_height)
}

/// Compute one paragraph placement per token with the default options.
pub fn compute_placements(
    tokens: &TokenSequence,
    image_height: u32,
) -> Result<Vec<ParagraphPlacement>> {
    LayoutEngine::new().compute_placements(tokens, image_height)
}

/// Lay out recognized tokens on a page with the default options.
pub fn layout(image_width: u32, image_height: u32, tokens: &TokenSequence) -> Result<LayoutDocument> {
    LayoutEngine::new().layout(image_width, image_height, tokens)
}

/// Lay out a provider response given as JSON text.
///
/// # Example
///
/// ```no_run
/// let json = std::fs::read_to_string("scan.png.json").unwrap();
/// let doc = ocr2docx::layout_response(1000, 600, &json).unwrap();
/// println!("{}", doc.plain_text());
/// ```
pub fn layout_response(image_width: u32, image_height: u32, json: &str) -> Result<LayoutDocument> {
    let response = parse_general_response(json)?;
    let mut doc = layout(image_width, image_height, &response.tokens())?;
    response.apply_to(&mut doc.metadata);
    Ok(doc)
}

/// Convert an image to DOCX next to it, reading the sidecar response.
///
/// Returns the path of the written document.
pub fn convert_file<P: AsRef<Path>>(image: P) -> Result<PathBuf> {
    let recognizer = Arc::new(ResponseFileRecognizer::new(RecognitionRequest::default()));
    Converter::new(recognizer, ConvertOptions::default()).convert_to_file(image.as_ref(), None)
}

/// Builder for converting scanned images.
///
/// # Example
///
/// ```no_run
/// use ocr2docx::Ocr2Docx;
///
/// let text = Ocr2Docx::new()
///     .with_response("responses/scan.json")
///     .collapse_overlaps()
///     .open("scan.png")?
///     .to_text();
/// # Ok::<(), ocr2docx::Error>(())
/// ```
pub struct Ocr2Docx {
    layout_options: LayoutOptions,
    render_options: RenderOptions,
    request: RecognitionRequest,
    response_path: Option<PathBuf>,
    recognizer: Option<Arc<dyn Recognizer>>,
}

impl Ocr2Docx {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            render_options: RenderOptions::default(),
            request: RecognitionRequest::default(),
            response_path: None,
            recognizer: None,
        }
    }

    /// Measure vertical gaps the legacy way.
    pub fn legacy_rescale(mut self) -> Self {
        self.layout_options = self.layout_options.legacy_rescale();
        self
    }

    /// Turn overlapping lines into zero spacing.
    pub fn collapse_overlaps(mut self) -> Self {
        self.layout_options = self.layout_options.collapse_overlaps();
        self
    }

    /// Set the font family.
    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_font(family);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set the recognition request options.
    pub fn with_request(mut self, request: RecognitionRequest) -> Self {
        self.request = request;
        self
    }

    /// Read the provider response from this file instead of the sidecar.
    pub fn with_response(mut self, path: impl Into<PathBuf>) -> Self {
        self.response_path = Some(path.into());
        self
    }

    /// Use a custom recognizer.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Recognize and lay out an image.
    pub fn open<P: AsRef<Path>>(self, image: P) -> Result<Ocr2DocxResult> {
        let recognizer = match self.recognizer {
            Some(recognizer) => recognizer,
            None => {
                let mut file = ResponseFileRecognizer::new(self.request);
                if let Some(path) = self.response_path {
                    file = file.with_response(path);
                }
                Arc::new(file)
            }
        };

        let options = ConvertOptions::new()
            .with_layout_options(self.layout_options)
            .with_render_options(self.render_options.clone());
        let document = Converter::new(recognizer, options).build_document(image.as_ref())?;

        Ok(Ocr2DocxResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Ocr2Docx {
    fn default() -> Self {
        Self::new()
    }
}

/// A laid-out image, ready to render.
pub struct Ocr2DocxResult {
    /// The layout document
    pub document: LayoutDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl Ocr2DocxResult {
    /// Convert to DOCX bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.render_options)
    }

    /// Write a DOCX file.
    pub fn write_docx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_docx_file(&self.document, &self.render_options, path)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Layout statistics.
    pub fn stats(&self) -> LayoutStats {
        LayoutStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }
}
