//! Data models
//!
//! Rust structs representing newspaper documents and database entities.
//! All models use ULID for IDs and chrono for timestamps. Wire format
//! is camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Entity ID wrapper (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Newspaper documents
// =============================================================================

/// An article illustration reference
///
/// `url` is either an external URL, the literal "placeholder" before
/// illustration, or an embedded `data:` URL after generation/compression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleImage {
    pub url: String,
    pub alt: String,
}

/// One article on a newspaper page
///
/// `page`/`position` locate the article in the two-page, five-slot
/// layout; position 2 of each page is the featured slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Short kebab-case slug
    pub id: String,
    pub headline: String,
    pub body_text: String,
    pub images: Vec<ArticleImage>,
    /// Border color token (e.g., "border-green-500")
    pub border_color: String,
    /// Headline color token (e.g., "text-green-700")
    pub headline_color: String,
    /// Page number (1 or 2)
    pub page: u8,
    /// Position within page (1-5)
    pub position: u8,
    #[serde(default)]
    pub featured: bool,
    /// Legacy row field (kept for backwards compatibility)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u8>,
    /// Legacy column span field (kept for backwards compatibility)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u8>,
}

/// A complete newspaper
///
/// Invariant: exactly ten articles, two featured, one featured per page
/// at position 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewspaperData {
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    pub articles: Vec<Article>,
}

/// A persisted newspaper snapshot
///
/// The embedded `NewspaperData` is stored whole (JSON document column),
/// never normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedNewspaper {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub grade_level: String,
    pub data: NewspaperData,
}

// =============================================================================
// Settings
// =============================================================================

/// Key-value settings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
}
