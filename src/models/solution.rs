//! Knowledge base models: categories, folders and articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::int_coded;
use crate::body::RequestBody;

int_coded! {
    /// Article publication state.
    ArticleStatus {
        /// Draft.
        Draft = 1,
        /// Published.
        Published = 2,
    }
}

int_coded! {
    /// Article kind.
    ArticleType {
        /// Permanent solution.
        Permanent = 1,
        /// Workaround.
        Workaround = 2,
    }
}

int_coded! {
    /// Who can see a folder.
    FolderVisibility {
        /// Everyone.
        AllUsers = 1,
        /// Logged-in users.
        LoggedInUsers = 2,
        /// Agents only.
        Agents = 3,
        /// Selected companies.
        SelectedCompanies = 4,
    }
}

/// A knowledge base category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionCategory {
    /// Category ID.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Portals the category shows in.
    #[serde(default)]
    pub visible_in_portals: Vec<i64>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A folder inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionFolder {
    /// Folder ID.
    pub id: i64,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Visibility.
    #[serde(default)]
    pub visibility: Option<FolderVisibility>,
    /// Parent category.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Companies allowed when visibility is `SelectedCompanies`.
    #[serde(default)]
    pub company_ids: Vec<i64>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A knowledge base article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionArticle {
    /// Article ID.
    pub id: i64,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// HTML body.
    #[serde(default)]
    pub description: Option<String>,
    /// Plain-text body.
    #[serde(default)]
    pub description_text: Option<String>,
    /// Publication state.
    #[serde(default)]
    pub status: Option<ArticleStatus>,
    /// Kind.
    #[serde(default, rename = "type")]
    pub article_type: Option<ArticleType>,
    /// Category.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Folder.
    #[serde(default)]
    pub folder_id: Option<i64>,
    /// Author.
    #[serde(default)]
    pub agent_id: Option<i64>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Helpful votes.
    #[serde(default)]
    pub thumbs_up: Option<i64>,
    /// Unhelpful votes.
    #[serde(default)]
    pub thumbs_down: Option<i64>,
    /// Views.
    #[serde(default)]
    pub hits: Option<i64>,
    /// SEO title, description and keywords.
    #[serde(default)]
    pub seo_data: Option<Value>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SolutionArticle {
    /// True once published.
    pub fn is_published(&self) -> bool {
        self.status == Some(ArticleStatus::Published)
    }
}

/// Body for creating or updating a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryRequest {
    /// Name; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Portals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_in_portals: Option<Vec<i64>>,
}

impl RequestBody for CategoryRequest {}

/// Body for creating or updating a folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderRequest {
    /// Name; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Visibility; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<FolderVisibility>,
    /// Companies for `SelectedCompanies`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_ids: Option<Vec<i64>>,
}

impl FolderRequest {
    /// A folder with a name and visibility.
    pub fn new(name: impl Into<String>, visibility: FolderVisibility) -> Self {
        Self {
            name: Some(name.into()),
            visibility: Some(visibility),
            ..Self::default()
        }
    }
}

impl RequestBody for FolderRequest {}

/// Body for creating or updating an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticleRequest {
    /// Title; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTML body; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Publication state; required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    /// Kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub article_type: Option<ArticleType>,
    /// Author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,
    /// Replaces the tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// SEO data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_data: Option<Value>,
}

impl ArticleRequest {
    /// A draft article.
    pub fn draft(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            status: Some(ArticleStatus::Draft),
            ..Self::default()
        }
    }
}

impl RequestBody for ArticleRequest {}
