//! Provider response records for positioned text recognition.

use crate::error::{Error, Result};
use crate::model::{BoundingBox, Metadata, Point, Quadrilateral, Token, TokenSequence};
use serde::{Deserialize, Serialize};

/// Response of the "accurate general recognition with positions" call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralResponse {
    /// Unique id of the provider call, for troubleshooting
    #[serde(default)]
    pub log_id: u64,

    /// Number of entries the provider claims to have returned
    #[serde(default)]
    pub words_result_num: usize,

    /// Image direction when direction detection was requested:
    /// -1 undefined, 0 upright, 1/2/3 rotated 90/180/270 degrees counter-clockwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<i32>,

    /// Recognized lines in reading order
    pub words_result: Vec<WordsResult>,
}

impl GeneralResponse {
    /// Convert the recognized lines into tokens, preserving order.
    pub fn tokens(&self) -> TokenSequence {
        self.words_result.iter().map(WordsResult::to_token).collect()
    }

    /// Consume the response into tokens.
    pub fn into_tokens(self) -> TokenSequence {
        self.words_result
            .into_iter()
            .map(WordsResult::into_token)
            .collect()
    }

    /// Use the location box as outline for lines that came without vertexes.
    pub fn fill_missing_vertexes(&mut self) {
        for entry in &mut self.words_result {
            if entry.vertexes_location.is_empty() {
                entry.vertexes_location = Quadrilateral::from_box(&entry.location.into())
                    .points()
                    .to_vec();
            }
        }
    }

    /// Copy provider facts into document metadata.
    pub fn apply_to(&self, metadata: &mut Metadata) {
        metadata.log_id = Some(self.log_id);
        metadata.direction = self.direction;
    }
}

/// One recognized line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordsResult {
    /// Recognized text
    pub words: String,

    /// Axis-aligned position (origin at the image top-left)
    pub location: Location,

    /// Four corners: top-left, top-right, bottom-right, bottom-left
    #[serde(default)]
    pub vertexes_location: Vec<Point>,

    /// Fine-grained outline, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finegrained_vertexes_location: Option<Vec<Point>>,

    /// Minimal fine-grained outline, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_finegrained_vertexes_location: Option<Vec<Point>>,
}

impl WordsResult {
    fn to_token(&self) -> Token {
        Token::new(
            self.words.clone(),
            self.location.into(),
            Quadrilateral::from_points(self.vertexes_location.clone()),
        )
    }

    fn into_token(self) -> Token {
        Token::new(
            self.words,
            self.location.into(),
            Quadrilateral::from_points(self.vertexes_location),
        )
    }
}

/// Provider position record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Top edge
    pub top: i32,
    /// Left edge
    pub left: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl From<Location> for BoundingBox {
    fn from(loc: Location) -> Self {
        BoundingBox::new(loc.left, loc.top, loc.width, loc.height)
    }
}

/// Error payload returned by the provider instead of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    /// Provider error code
    pub error_code: i64,
    /// Human-readable message
    #[serde(default)]
    pub error_msg: String,
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        Error::Provider {
            code: err.error_code,
            message: err.error_msg,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reply {
    Failure(ProviderError),
    Success(GeneralResponse),
}

/// Parse a provider reply, surfacing error payloads as [`Error::Provider`].
pub fn parse_general_response(json: &str) -> Result<GeneralResponse> {
    match serde_json::from_str::<Reply>(json) {
        Ok(Reply::Failure(err)) => Err(err.into()),
        Ok(Reply::Success(response)) => {
            check_response(&response);
            Ok(response)
        }
        Err(_) => {
            // untagged errors say nothing useful; re-run for the real message
            let response: GeneralResponse = serde_json::from_str(json)?;
            check_response(&response);
            Ok(response)
        }
    }
}

fn check_response(response: &GeneralResponse) {
    if response.words_result_num != response.words_result.len() {
        log::warn!(
            "Provider reported {} results but returned {} (log id {})",
            response.words_result_num,
            response.words_result.len(),
            response.log_id
        );
    }
    if let Some(direction) = response.direction.filter(|d| *d > 0) {
        log::warn!(
            "Provider reports the image rotated ({} x 90 degrees counter-clockwise); layout may be off",
            direction
        );
    }
}
