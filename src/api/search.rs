use reqwest::Method;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::types::{Image, ImagesEnvelope, SearchQuery};

impl ApiClient {
    /// `GET /search/images` with only the non-empty filters as parameters.
    pub async fn search_images(&self, query: &SearchQuery) -> Result<Vec<Image>, ApiError> {
        let params = query.params();
        let envelope: ImagesEnvelope = self
            .execute(Method::GET, "/search/images", |r| r.query(&params))
            .await?;
        Ok(envelope.images)
    }
}
