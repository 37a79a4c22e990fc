//! Recognizer replaying provider responses saved next to the images.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_general_response, GeneralResponse, RecognitionRequest, Recognizer};

/// Reads a saved provider response instead of calling the provider.
///
/// By default the response is looked up as a sidecar file: the image path
/// with `.json` appended (`scan.png` → `scan.png.json`).
#[derive(Debug, Clone)]
pub struct ResponseFileRecognizer {
    request: RecognitionRequest,
    response_path: Option<PathBuf>,
}

impl ResponseFileRecognizer {
    /// Create a recognizer using sidecar files.
    pub fn new(request: RecognitionRequest) -> Self {
        Self {
            request,
            response_path: None,
        }
    }

    /// Always read the response from the given file.
    pub fn with_response(mut self, path: impl Into<PathBuf>) -> Self {
        self.response_path = Some(path.into());
        self
    }

    /// Get the request options.
    pub fn request(&self) -> &RecognitionRequest {
        &self.request
    }

    /// Sidecar response path for an image.
    pub fn sidecar_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }

    fn response_for(&self, image: &Path) -> PathBuf {
        self.response_path
            .clone()
            .unwrap_or_else(|| Self::sidecar_path(image))
    }
}

impl Recognizer for ResponseFileRecognizer {
    fn name(&self) -> &str {
        "response-file"
    }

    fn recognize(&self, image: &Path) -> Result<GeneralResponse> {
        let path = self.response_for(image);
        log::debug!("Reading recognition response {}", path.display());

        let json = fs::read_to_string(&path).map_err(|e| {
            Error::Recognition(format!("cannot read response {}: {}", path.display(), e))
        })?;
        let mut response = parse_general_response(&json)?;

        if !self.request.vertexes_location {
            response.fill_missing_vertexes();
        }
        if !self.request.detect_direction {
            response.direction = None;
        }

        Ok(response)
    }
}
