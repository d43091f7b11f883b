//! Lookup results.

use serde::{Deserialize, Serialize};

use crate::error::GlossaError;

/// Outcome of a single lookup.
///
/// Serialized with an `exact_match` flag instead of an enum tag:
///
/// ```json
/// {"exact_match": true, "word": "python", "meaning": "...", "normalized_from": "pythons"}
/// {"exact_match": false, "suggestions": ["python", "pylon"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SearchResultRecord", try_from = "SearchResultRecord")]
pub enum SearchResult {
    /// The word, or a form of it, resolved to a definition.
    ExactMatch {
        word: String,
        meaning: String,
        /// The query as typed, when `word` differs from it.
        normalized_from: Option<String>,
    },
    /// Ranked alternatives; empty when nothing came close.
    Suggestions { suggestions: Vec<String> },
}

impl SearchResult {
    pub fn exact<W: Into<String>, M: Into<String>>(word: W, meaning: M) -> Self {
        SearchResult::ExactMatch {
            word: word.into(),
            meaning: meaning.into(),
            normalized_from: None,
        }
    }

    pub fn normalized<W, M, F>(word: W, meaning: M, from: F) -> Self
    where
        W: Into<String>,
        M: Into<String>,
        F: Into<String>,
    {
        SearchResult::ExactMatch {
            word: word.into(),
            meaning: meaning.into(),
            normalized_from: Some(from.into()),
        }
    }

    /// An empty suggestion list.
    pub fn none() -> Self {
        SearchResult::Suggestions {
            suggestions: Vec::new(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, SearchResult::ExactMatch { .. })
    }

    /// Get the matched word, if any.
    pub fn word(&self) -> Option<&str> {
        match self {
            SearchResult::ExactMatch { word, .. } => Some(word),
            SearchResult::Suggestions { .. } => None,
        }
    }

    /// Get the meaning, if any.
    pub fn meaning(&self) -> Option<&str> {
        match self {
            SearchResult::ExactMatch { meaning, .. } => Some(meaning),
            SearchResult::Suggestions { .. } => None,
        }
    }

    /// Get the suggestions; empty for an exact match.
    pub fn suggestions(&self) -> &[String] {
        match self {
            SearchResult::ExactMatch { .. } => &[],
            SearchResult::Suggestions { suggestions } => suggestions,
        }
    }
}

/// Flat serialized form of [`SearchResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchResultRecord {
    exact_match: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normalized_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<String>>,
}

impl From<SearchResult> for SearchResultRecord {
    fn from(result: SearchResult) -> Self {
        match result {
            SearchResult::ExactMatch {
                word,
                meaning,
                normalized_from,
            } => SearchResultRecord {
                exact_match: true,
                word: Some(word),
                meaning: Some(meaning),
                normalized_from,
                suggestions: None,
            },
            SearchResult::Suggestions { suggestions } => SearchResultRecord {
                exact_match: false,
                word: None,
                meaning: None,
                normalized_from: None,
                suggestions: Some(suggestions),
            },
        }
    }
}

impl TryFrom<SearchResultRecord> for SearchResult {
    type Error = GlossaError;

    fn try_from(record: SearchResultRecord) -> Result<Self, Self::Error> {
        if !record.exact_match {
            return Ok(SearchResult::Suggestions {
                suggestions: record.suggestions.unwrap_or_default(),
            });
        }
        match (record.word, record.meaning) {
            (Some(word), Some(meaning)) => Ok(SearchResult::ExactMatch {
                word,
                meaning,
                normalized_from: record.normalized_from,
            }),
            _ => Err(GlossaError::invalid_argument(
                "exact match requires both word and meaning",
            )),
        }
    }
}
