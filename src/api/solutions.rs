//! Knowledge base API (`/api/v2/solutions`).
//!
//! The knowledge base is a three-level tree: categories hold folders, folders
//! hold articles.

use crate::api::{require_changes, require_id, require_non_blank, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{
    ArticleRequest, CategoryRequest, FolderRequest, SolutionArticle, SolutionCategory,
    SolutionFolder,
};
use crate::pagination::{self, LinkHeaderPagination, Paginated, PaginationStrategy};
use crate::query::QueryBuilder;

/// Knowledge base operations. Obtained from [`FreshdeskClient::solutions`].
#[derive(Debug, Clone, Copy)]
pub struct SolutionsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> SolutionsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Lists all categories.
    pub async fn list_categories(&self) -> Result<Vec<SolutionCategory>, FreshdeskError> {
        self.client
            .get(&format!("{}/solutions/categories", API_PREFIX))
            .await
    }

    /// Gets a category.
    pub async fn get_category(&self, id: i64) -> Result<SolutionCategory, FreshdeskError> {
        require_id("category_id", id)?;
        self.client
            .get(&format!("{}/solutions/categories/{}", API_PREFIX, id))
            .await
    }

    /// Creates a category.
    pub async fn create_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<SolutionCategory, FreshdeskError> {
        require_non_blank("category name", request.name.as_deref().unwrap_or_default())?;
        self.client
            .post(&format!("{}/solutions/categories", API_PREFIX), request)
            .await
    }

    /// Updates a category.
    pub async fn update_category(
        &self,
        id: i64,
        request: &CategoryRequest,
    ) -> Result<SolutionCategory, FreshdeskError> {
        require_id("category_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/solutions/categories/{}", API_PREFIX, id), request)
            .await
    }

    /// Deletes a category with all its folders and articles.
    pub async fn delete_category(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("category_id", id)?;
        self.client
            .delete(&format!("{}/solutions/categories/{}", API_PREFIX, id))
            .await
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    /// Lists the folders of a category.
    pub async fn list_folders(&self, category_id: i64) -> Result<Vec<SolutionFolder>, FreshdeskError> {
        require_id("category_id", category_id)?;
        self.client
            .get(&format!("{}/solutions/categories/{}/folders", API_PREFIX, category_id))
            .await
    }

    /// Gets a folder.
    pub async fn get_folder(&self, id: i64) -> Result<SolutionFolder, FreshdeskError> {
        require_id("folder_id", id)?;
        self.client
            .get(&format!("{}/solutions/folders/{}", API_PREFIX, id))
            .await
    }

    /// Creates a folder in a category.
    pub async fn create_folder(
        &self,
        category_id: i64,
        request: &FolderRequest,
    ) -> Result<SolutionFolder, FreshdeskError> {
        require_id("category_id", category_id)?;
        require_non_blank("folder name", request.name.as_deref().unwrap_or_default())?;
        if request.visibility.is_none() {
            return Err(FreshdeskError::validation("folder visibility is required"));
        }
        self.client
            .post(
                &format!("{}/solutions/categories/{}/folders", API_PREFIX, category_id),
                request,
            )
            .await
    }

    /// Updates a folder.
    pub async fn update_folder(
        &self,
        id: i64,
        request: &FolderRequest,
    ) -> Result<SolutionFolder, FreshdeskError> {
        require_id("folder_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/solutions/folders/{}", API_PREFIX, id), request)
            .await
    }

    /// Deletes a folder with its articles.
    pub async fn delete_folder(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("folder_id", id)?;
        self.client
            .delete(&format!("{}/solutions/folders/{}", API_PREFIX, id))
            .await
    }

    // ------------------------------------------------------------------
    // Articles
    // ------------------------------------------------------------------

    /// Lists the articles of a folder.
    pub fn list_articles(&self, folder_id: i64) -> Paginated<SolutionArticle> {
        if let Err(e) = require_id("folder_id", folder_id) {
            return pagination::failed(e);
        }
        self.client.paginate(
            format!("{}/solutions/folders/{}/articles", API_PREFIX, folder_id),
            QueryBuilder::new(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Gets an article.
    pub async fn get_article(&self, id: i64) -> Result<SolutionArticle, FreshdeskError> {
        require_id("article_id", id)?;
        self.client
            .get(&format!("{}/solutions/articles/{}", API_PREFIX, id))
            .await
    }

    /// Creates an article in a folder.
    pub async fn create_article(
        &self,
        folder_id: i64,
        request: &ArticleRequest,
    ) -> Result<SolutionArticle, FreshdeskError> {
        require_id("folder_id", folder_id)?;
        require_non_blank("article title", request.title.as_deref().unwrap_or_default())?;
        require_non_blank(
            "article description",
            request.description.as_deref().unwrap_or_default(),
        )?;

        let article: SolutionArticle = self
            .client
            .post(
                &format!("{}/solutions/folders/{}/articles", API_PREFIX, folder_id),
                request,
            )
            .await?;

        tracing::info!(article_id = article.id, folder_id, "Created article");
        Ok(article)
    }

    /// Updates an article.
    pub async fn update_article(
        &self,
        id: i64,
        request: &ArticleRequest,
    ) -> Result<SolutionArticle, FreshdeskError> {
        require_id("article_id", id)?;
        require_changes(request)?;
        self.client
            .put(&format!("{}/solutions/articles/{}", API_PREFIX, id), request)
            .await
    }

    /// Deletes an article.
    pub async fn delete_article(&self, id: i64) -> Result<(), FreshdeskError> {
        require_id("article_id", id)?;
        self.client
            .delete(&format!("{}/solutions/articles/{}", API_PREFIX, id))
            .await
    }

    /// Full-text search over articles.
    pub async fn search_articles(&self, term: &str) -> Result<Vec<SolutionArticle>, FreshdeskError> {
        require_non_blank("term", term)?;
        let path = QueryBuilder::new()
            .push("term", term)
            .apply_to(&format!("{}/search/solutions", API_PREFIX));
        self.client.get(&path).await
    }
}
