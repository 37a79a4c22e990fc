//! Recognized text fragments.

use super::{BoundingBox, Quadrilateral};
use serde::{Deserialize, Serialize};

/// One recognized text fragment with its pixel-space geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Recognized text
    pub text: String,

    /// Axis-aligned box around the fragment
    pub bounding_box: BoundingBox,

    /// Four-corner outline of the fragment
    pub quadrilateral: Quadrilateral,
}

impl Token {
    /// Create a new token.
    pub fn new(
        text: impl Into<String>,
        bounding_box: BoundingBox,
        quadrilateral: Quadrilateral,
    ) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            quadrilateral,
        }
    }

    /// Create a token whose outline is its bounding box.
    pub fn boxed(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        let quadrilateral = Quadrilateral::from_box(&bounding_box);
        Self::new(text, bounding_box, quadrilateral)
    }
}

/// Tokens in provider reading order.
///
/// Insertion order is significant and is never changed by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a token at the end of the reading order.
    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in reading order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// Tokens as a slice.
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    /// Concatenated token text, one token per line.
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
