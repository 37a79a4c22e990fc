//! Conversion pipeline: image → recognition → layout → rendered output.
//!
//! Renderers are looked up by output extension in a [`RendererRegistry`],
//! so new output formats can be plugged in without touching the pipeline.
//!
//! # Example
//!
//! ```no_run
//! use ocr2docx::convert::{ConvertOptions, Converter};
//! use ocr2docx::recognition::{RecognitionRequest, ResponseFileRecognizer};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn main() -> ocr2docx::Result<()> {
//!     let recognizer = Arc::new(ResponseFileRecognizer::new(RecognitionRequest::default()));
//!     let converter = Converter::new(recognizer, ConvertOptions::default());
//!
//!     let output = converter.convert_to_file(Path::new("scan.png"), None)?;
//!     println!("wrote {}", output.display());
//!     Ok(())
//! }
//! ```

mod renderers;

pub use renderers::{DocxRenderer, JsonRenderer, TextRenderer};

use crate::detect::detect_image_from_path;
use crate::error::{Error, Result};
use crate::layout::{LayoutEngine, LayoutOptions};
use crate::model::LayoutDocument;
use crate::recognition::Recognizer;
use crate::render::{write_output, LayoutStats, RenderOptions};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Layout options
    pub layout: LayoutOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Word document
    #[default]
    Docx,

    /// JSON layout structure
    Json,

    /// Plain text
    Text,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Json => "application/json",
            OutputFormat::Text => "text/plain",
        }
    }

    /// Parse a format from an extension or name.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(OutputFormat::Docx),
            "json" => Some(OutputFormat::Json),
            "txt" | "text" => Some(OutputFormat::Text),
            _ => None,
        }
    }

    /// Default output path for an image: same location, format extension.
    pub fn output_path(&self, image: &Path) -> PathBuf {
        image.with_extension(self.extension())
    }
}

/// Result of converting one image.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered output
    pub content: Vec<u8>,

    /// The layout document the output was rendered from
    pub document: LayoutDocument,

    /// Layout statistics
    pub stats: LayoutStats,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Save the content to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_output(path.as_ref(), &self.content)
    }
}

/// Trait for output renderers.
///
/// Implement this trait to add a new output format.
pub trait DocumentRenderer: Send + Sync {
    /// Get the name of this renderer.
    fn name(&self) -> &str;

    /// Get the output extensions handled by this renderer.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Render a document into a writer.
    fn render_to(
        &self,
        doc: &LayoutDocument,
        options: &RenderOptions,
        writer: &mut dyn Write,
    ) -> Result<()>;

    /// Render a document into memory.
    fn render(&self, doc: &LayoutDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.render_to(doc, options, &mut buffer)?;
        Ok(buffer)
    }

    /// Render a document into a file.
    fn render_to_path(
        &self,
        doc: &LayoutDocument,
        options: &RenderOptions,
        path: &Path,
    ) -> Result<()> {
        let content = self.render(doc, options)?;
        write_output(path, &content)
    }

    /// Check if this renderer handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for output renderers.
///
/// Maps output extensions and renderer names to renderers.
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn DocumentRenderer>>,
    by_name: HashMap<String, Arc<dyn DocumentRenderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the DOCX, JSON and text renderers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxRenderer::new()));
        registry.register(Arc::new(JsonRenderer::new()));
        registry.register(Arc::new(TextRenderer::new()));
        registry
    }

    /// Register a renderer for all its extensions.
    pub fn register(&mut self, renderer: Arc<dyn DocumentRenderer>) {
        for ext in renderer.supported_extensions() {
            self.renderers.insert(ext.to_lowercase(), renderer.clone());
        }
        self.by_name.insert(renderer.name().to_lowercase(), renderer);
    }

    /// Get a renderer by output extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentRenderer>> {
        self.renderers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a renderer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentRenderer>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.renderers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.renderers.keys().map(|s| s.as_str()).collect()
    }

    /// Render to a file, picking the renderer from the path's extension.
    pub fn render_to_path(
        &self,
        doc: &LayoutDocument,
        options: &RenderOptions,
        path: &Path,
    ) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedOutput("output file has no extension".into()))?;

        let renderer = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedOutput(format!("no renderer for extension: {}", ext)))?;

        renderer.render_to_path(doc, options, path)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// One image to convert in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    /// Source image
    pub image: PathBuf,

    /// Output file (the format's default path next to the image when `None`)
    pub output: Option<PathBuf>,
}

impl ConvertJob {
    /// Create a job writing to the default output path.
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            output: None,
        }
    }

    /// Set the output file.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Outcome of one batch job.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Source image
    pub image: PathBuf,

    /// Written output file
    pub output: PathBuf,

    /// Layout statistics
    pub stats: LayoutStats,
}

/// Drives a recognizer, the layout engine and a renderer.
pub struct Converter {
    recognizer: Arc<dyn Recognizer>,
    engine: LayoutEngine,
    options: ConvertOptions,
    registry: RendererRegistry,
}

impl Converter {
    /// Create a converter with the default renderers.
    pub fn new(recognizer: Arc<dyn Recognizer>, options: ConvertOptions) -> Self {
        Self {
            recognizer,
            engine: LayoutEngine::with_options(options.layout.clone()),
            options,
            registry: RendererRegistry::with_defaults(),
        }
    }

    /// Replace the renderer registry.
    pub fn with_registry(mut self, registry: RendererRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get the recognizer.
    pub fn recognizer(&self) -> &dyn Recognizer {
        self.recognizer.as_ref()
    }

    /// Recognize an image and lay it out.
    pub fn build_document(&self, image: &Path) -> Result<LayoutDocument> {
        let info = detect_image_from_path(image)?;
        log::info!("Converting {} ({})", image.display(), info);

        let response = self.recognizer.recognize(image)?;
        let tokens = response.tokens();
        let mut doc = self.engine.layout(info.width, info.height, &tokens)?;

        let mut metadata = doc.metadata.clone().stamped();
        metadata.source = image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        metadata.title = self.options.render.title.clone();
        response.apply_to(&mut metadata);
        doc.metadata = metadata;

        Ok(doc)
    }

    /// Convert an image into the configured output format.
    pub fn convert(&self, image: &Path) -> Result<ConvertResult> {
        let document = self.build_document(image)?;
        self.render(document)
    }

    /// Convert an image and write the output.
    ///
    /// Returns the written path; `output` defaults to the format's path next
    /// to the image.
    pub fn convert_to_file(&self, image: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.options.format.output_path(image));
        let result = self.convert(image)?;
        result.save(&output)?;
        log::info!("Wrote {}", output.display());
        Ok(output)
    }

    /// Convert many images in parallel.
    ///
    /// Returns one result per job, in job order. A failing job does not stop
    /// the others.
    pub fn convert_batch(&self, jobs: &[ConvertJob]) -> Vec<Result<BatchOutcome>> {
        self.convert_batch_with(jobs, |_, _| {})
    }

    /// Convert many images in parallel, reporting each finished job.
    ///
    /// `on_done` runs on the worker thread as soon as a job finishes, so
    /// calls arrive in completion order; the returned list is in job order.
    pub fn convert_batch_with<F>(&self, jobs: &[ConvertJob], on_done: F) -> Vec<Result<BatchOutcome>>
    where
        F: Fn(&ConvertJob, &Result<BatchOutcome>) + Sync,
    {
        log::info!("Converting {} images", jobs.len());
        jobs.par_iter()
            .map(|job| {
                let outcome = self.run_job(job);
                if let Err(ref e) = outcome {
                    log::warn!("{}: {}", job.image.display(), e);
                }
                on_done(job, &outcome);
                outcome
            })
            .collect()
    }

    fn run_job(&self, job: &ConvertJob) -> Result<BatchOutcome> {
        let result = self.convert(&job.image)?;
        let output = job
            .output
            .clone()
            .unwrap_or_else(|| self.options.format.output_path(&job.image));
        result.save(&output)?;
        Ok(BatchOutcome {
            image: job.image.clone(),
            output,
            stats: result.stats,
        })
    }

    fn render(&self, document: LayoutDocument) -> Result<ConvertResult> {
        let ext = self.options.format.extension();
        let renderer = self
            .registry
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedOutput(format!("no renderer for extension: {}", ext)))?;

        let content = renderer.render(&document, &self.options.render)?;
        let stats = LayoutStats::from_document(&document);

        Ok(ConvertResult {
            content,
            document,
            stats,
            mime_type: renderer.mime_type(),
        })
    }
}
