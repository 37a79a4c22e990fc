//! ocr2docx CLI - rebuild Word documents from positioned OCR output

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use ocr2docx::{
    detect_image_from_path, ConvertJob, ConvertOptions, Converter, JsonFormat, LayoutOptions,
    LayoutStats, Ocr2Docx, OutputFormat, RecognitionRequest, RenderOptions,
    ResponseFileRecognizer,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

#[derive(Parser)]
#[command(name = "ocr2docx")]
#[command(version)]
#[command(about = "Rebuild Word documents from positioned OCR output", long_about = None)]
struct Cli {
    /// Input image
    #[arg(value_name = "IMAGE")]
    input: Option<PathBuf>,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Saved provider response (default: <IMAGE>.json)
    #[arg(short, long, value_name = "FILE")]
    response: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct LayoutArgs {
    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Font family for all text
    #[arg(long, env = "OCR2DOCX_FONT")]
    font: Option<String>,

    /// Measure line gaps the way the legacy converter did
    #[arg(long)]
    legacy_rescale: bool,

    /// Give overlapping lines zero spacing
    #[arg(long)]
    collapse_overlaps: bool,
}

impl LayoutArgs {
    fn layout_options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::new();
        if self.legacy_rescale {
            options = options.legacy_rescale();
        }
        if self.collapse_overlaps {
            options = options.collapse_overlaps();
        }
        options
    }

    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new();
        if let Some(ref font) = self.font {
            options = options.with_font(font);
        }
        if let Some(ref title) = self.title {
            options = options.with_title(title);
        }
        options
    }

    fn builder(&self, response: Option<&Path>) -> Ocr2Docx {
        let mut builder = Ocr2Docx::new();
        if self.legacy_rescale {
            builder = builder.legacy_rescale();
        }
        if self.collapse_overlaps {
            builder = builder.collapse_overlaps();
        }
        if let Some(ref font) = self.font {
            builder = builder.with_font(font);
        }
        if let Some(ref title) = self.title {
            builder = builder.with_title(title);
        }
        if let Some(path) = response {
            builder = builder.with_response(path);
        }
        builder
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to DOCX
    Convert {
        /// Input image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Output file (default: <IMAGE> with a .docx extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Saved provider response (default: <IMAGE>.json)
        #[arg(short, long, value_name = "FILE")]
        response: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Write the rebuilt layout as JSON
    Json {
        /// Input image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Saved provider response (default: <IMAGE>.json)
        #[arg(short, long, value_name = "FILE")]
        response: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Write the recognized lines as plain text
    Text {
        /// Input image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Saved provider response (default: <IMAGE>.json)
        #[arg(short, long, value_name = "FILE")]
        response: Option<PathBuf>,
    },

    /// Show image, page and layout information
    Info {
        /// Input image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Saved provider response (default: <IMAGE>.json)
        #[arg(short, long, value_name = "FILE")]
        response: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert every image in a directory
    Batch {
        /// Directory of images with their saved responses
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (default: next to each image)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            response,
            layout,
        }) => cmd_convert(&input, output.as_deref(), response.as_deref(), &layout),
        Some(Commands::Json {
            input,
            output,
            response,
            compact,
            layout,
        }) => cmd_json(&input, output.as_deref(), response.as_deref(), compact, &layout),
        Some(Commands::Text {
            input,
            output,
            response,
        }) => cmd_text(&input, output.as_deref(), response.as_deref()),
        Some(Commands::Info {
            input,
            response,
            layout,
        }) => cmd_info(&input, response.as_deref(), &layout),
        Some(Commands::Batch {
            input,
            output,
            layout,
        }) => cmd_batch(&input, output.as_deref(), &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    cli.output.as_deref(),
                    cli.response.as_deref(),
                    &cli.layout,
                )
            } else {
                println!("{}", "Usage: ocr2docx <IMAGE> [OUTPUT]".yellow());
                println!("       ocr2docx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    response: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| OutputFormat::Docx.output_path(input));

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Laying out recognized text...");
    let result = layout.builder(response).open(input)?;
    pb.inc(1);

    pb.set_message("Writing DOCX...");
    result.write_docx(&output)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "{} {} ({} paragraphs)",
        "Saved to".green(),
        output.display(),
        result.document().paragraph_count()
    );

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    response: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = layout.builder(response).open(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = result.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    response: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = LayoutArgs::default().builder(response).open(input)?;
    let text = result.to_text();

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn cmd_info(
    input: &Path,
    response: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = detect_image_from_path(input)?;
    let result = layout.builder(response).open(input)?;
    let doc = result.document();

    println!("{}", "Image Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), image.mime_type());
    println!("{}: {} x {} px", "Size".bold(), image.width, image.height);

    if let Some(log_id) = doc.metadata.log_id {
        println!("{}: {}", "Log ID".bold(), log_id);
    }
    if let Some(direction) = doc.metadata.direction {
        let label = if doc.metadata.is_rotated() {
            "rotated".yellow().to_string()
        } else {
            "upright".to_string()
        };
        println!("{}: {} ({})", "Direction".bold(), direction, label);
    }

    println!();
    println!("{}", "Page".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!(
        "{}: {} x {} twips ({:.1} x {:.1} pt)",
        "Size".bold(),
        doc.page.width_units,
        doc.page.height_units,
        doc.page.width_points(),
        doc.page.height_points()
    );
    println!("{}: {}", "Orientation".bold(), doc.page.orientation.as_str());

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    print_stats(&result.stats());

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let images = collect_images(input)?;
    if images.is_empty() {
        println!("{} {}", "No images found in".yellow(), input.display());
        return Ok(());
    }
    log::info!("Found {} images in {}", images.len(), input.display());

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let jobs: Vec<ConvertJob> = images
        .into_iter()
        .map(|image| match output {
            Some(dir) => {
                let target = OutputFormat::Docx.output_path(&image);
                let name = target.file_name().map(PathBuf::from).unwrap_or(target);
                ConvertJob::new(image).with_output(dir.join(name))
            }
            None => ConvertJob::new(image),
        })
        .collect();

    let recognizer = Arc::new(ResponseFileRecognizer::new(RecognitionRequest::default()));
    let options = ConvertOptions::new()
        .with_layout_options(layout.layout_options())
        .with_render_options(layout.render_options())
        .with_format(OutputFormat::Docx);
    let converter = Converter::new(recognizer, options);

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let results = converter.convert_batch_with(&jobs, |job, _| {
        if let Some(name) = job.image.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    let mut total = LayoutStats::new();
    let mut failed = 0;
    println!();
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(outcome) => {
                total.merge(&outcome.stats);
                println!("  {} {}", "✓".green(), outcome.output.display());
            }
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), job.image.display(), e);
            }
        }
    }

    println!();
    print_stats(&total);
    println!(
        "\n{} {} converted, {} failed",
        "Done!".green().bold(),
        results.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} of {} images failed", failed, results.len()).into());
    }
    Ok(())
}

fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_image {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

fn print_stats(stats: &LayoutStats) {
    if stats.document_count > 1 {
        println!("{}: {}", "Documents".bold(), stats.document_count);
    }
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Hanging".bold(), stats.hanging_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Max spacing".bold(), stats.max_spacing_before);
    if let (Some(min), Some(max)) = (stats.min_font_size, stats.max_font_size) {
        println!(
            "{}: {:.1} - {:.1} pt",
            "Font size".bold(),
            min / 2.0,
            max / 2.0
        );
    }
}

fn cmd_version() {
    println!("{} {}", "ocr2docx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rebuild Word documents from positioned OCR output");
    println!();
    println!("License: MIT");
}
