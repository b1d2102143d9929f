//! Satisfaction ratings API.

use crate::api::{require_id, API_PREFIX};
use crate::client::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::{
    SatisfactionRating, SatisfactionRatingFilter, SatisfactionRatingRequest, DEFAULT_QUESTION,
};
use crate::pagination::{LinkHeaderPagination, Paginated, PaginationStrategy};

/// Satisfaction survey results. Obtained from [`FreshdeskClient::satisfaction_ratings`].
#[derive(Debug, Clone, Copy)]
pub struct SatisfactionRatingsApi<'a> {
    client: &'a FreshdeskClient,
}

impl<'a> SatisfactionRatingsApi<'a> {
    pub(crate) fn new(client: &'a FreshdeskClient) -> Self {
        Self { client }
    }

    /// Lists ratings. Without `created_since`, Freshdesk returns the last 30 days.
    pub fn list(&self, filter: &SatisfactionRatingFilter) -> Paginated<SatisfactionRating> {
        self.client.paginate(
            format!("{}/surveys/satisfaction_ratings", API_PREFIX),
            filter.to_query(),
            PaginationStrategy::LinkHeader(LinkHeaderPagination::default()),
        )
    }

    /// Records a rating for a ticket.
    pub async fn create(
        &self,
        ticket_id: i64,
        request: &SatisfactionRatingRequest,
    ) -> Result<SatisfactionRating, FreshdeskError> {
        require_id("ticket_id", ticket_id)?;
        if !request.ratings.contains_key(DEFAULT_QUESTION) {
            return Err(FreshdeskError::validation(format!(
                "ratings must include {}",
                DEFAULT_QUESTION
            )));
        }
        self.client
            .post(
                &format!("{}/tickets/{}/satisfaction_ratings", API_PREFIX, ticket_id),
                request,
            )
            .await
    }
}
