//! Contract with the text-recognition provider.
//!
//! The provider itself is an external service. This module defines what the
//! layout pipeline needs from it: a [`Recognizer`] that turns an image into a
//! [`GeneralResponse`], the request options the pipeline relies on, and an
//! offline recognizer that replays responses saved to disk.
//!
//! # Example
//!
//! ```no_run
//! use ocr2docx::recognition::{Recognizer, RecognitionRequest, ResponseFileRecognizer};
//! use std::path::Path;
//!
//! fn main() -> ocr2docx::Result<()> {
//!     let recognizer = ResponseFileRecognizer::new(RecognitionRequest::default());
//!     // reads scan.png.json
//!     let response = recognizer.recognize(Path::new("scan.png"))?;
//!     println!("{} lines", response.words_result.len());
//!     Ok(())
//! }
//! ```

mod file;
mod response;

pub use file::ResponseFileRecognizer;
pub use response::{parse_general_response, GeneralResponse, Location, ProviderError, WordsResult};

use crate::error::Result;
use std::path::Path;

/// Source of positioned recognition results for an image.
///
/// Implementations are shared across batch workers, so they must be
/// `Send + Sync`. Credentials and endpoints belong in the implementing type,
/// supplied when it is constructed.
pub trait Recognizer: Send + Sync {
    /// Name of this recognizer.
    fn name(&self) -> &str;

    /// Recognize the text lines of an image, in reading order.
    fn recognize(&self, image: &Path) -> Result<GeneralResponse>;
}

/// Text granularity requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// One result per line
    #[default]
    Big,
    /// One result per character
    Small,
}

impl Granularity {
    /// Provider parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Big => "big",
            Granularity::Small => "small",
        }
    }
}

/// Options sent with a recognition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    /// Result granularity
    pub granularity: Granularity,

    /// Ask the provider to detect image rotation
    pub detect_direction: bool,

    /// Ask for four-corner outlines of every line
    pub vertexes_location: bool,

    /// Ask for per-line confidence
    pub probability: bool,
}

impl RecognitionRequest {
    /// Create a request with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Enable or disable rotation detection.
    pub fn with_direction(mut self, detect: bool) -> Self {
        self.detect_direction = detect;
        self
    }

    /// Enable or disable four-corner outlines.
    pub fn with_vertexes(mut self, vertexes: bool) -> Self {
        self.vertexes_location = vertexes;
        self
    }

    /// Request parameters as the provider expects them.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("recognize_granularity", self.granularity.as_str().to_string()),
            ("detect_direction", self.detect_direction.to_string()),
            ("vertexes_location", self.vertexes_location.to_string()),
            ("probability", self.probability.to_string()),
        ]
    }
}

impl Default for RecognitionRequest {
    fn default() -> Self {
        Self {
            granularity: Granularity::Big,
            detect_direction: true,
            vertexes_location: true,
            probability: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = RecognitionRequest::default();
        assert_eq!(request.granularity, Granularity::Big);
        assert!(request.detect_direction);
        assert!(request.vertexes_location);
        assert!(!request.probability);
    }

    #[test]
    fn test_request_params() {
        let params = RecognitionRequest::new()
            .with_granularity(Granularity::Small)
            .with_direction(false)
            .to_params();
        assert!(params.contains(&("recognize_granularity", "small".to_string())));
        assert!(params.contains(&("detect_direction", "false".to_string())));
        assert!(params.contains(&("vertexes_location", "true".to_string())));
    }
}
