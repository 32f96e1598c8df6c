//! Request and response bodies
//!
//! Wire format is camelCase JSON throughout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{NewspaperData, SavedNewspaper};

/// POST /api/generate request body
///
/// Both fields are validated by the handler rather than by serde so a
/// missing field produces a 400 with a descriptive message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// POST /api/newspapers request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNewspaperRequest {
    pub grade_level: String,
    pub data: NewspaperData,
    /// Compress embedded images before persisting
    #[serde(default)]
    pub compress: bool,
}

/// One row of GET /api/newspapers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewspaperSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub grade_level: String,
    pub title: String,
    pub article_count: usize,
}

impl From<&SavedNewspaper> for NewspaperSummary {
    fn from(newspaper: &SavedNewspaper) -> Self {
        Self {
            id: newspaper.id.clone(),
            created_at: newspaper.created_at,
            grade_level: newspaper.grade_level.clone(),
            title: newspaper.data.title.clone(),
            article_count: newspaper.data.articles.len(),
        }
    }
}

/// GET /api/newspapers query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNewspapersQuery {
    #[serde(default)]
    pub grade_level: Option<String>,
}

/// PUT /api/settings/:key request body
#[derive(Debug, Deserialize)]
pub struct SetSettingRequest {
    pub value: String,
}

/// Settings response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: String,
}
