use reqwest::Method;

use crate::api::client::{segment, ApiClient};
use crate::api::error::ApiError;
use crate::api::types::{Album, AlbumDraft, AlbumEnvelope, AlbumsEnvelope, ShareRequest};

impl ApiClient {
    /// `GET /albums`
    pub async fn list_albums(&self) -> Result<Vec<Album>, ApiError> {
        let envelope: AlbumsEnvelope = self.execute(Method::GET, "/albums", |r| r).await?;
        Ok(envelope.albums)
    }

    /// `GET /albums/shared`
    pub async fn list_shared_albums(&self) -> Result<Vec<Album>, ApiError> {
        let envelope: AlbumsEnvelope = self.execute(Method::GET, "/albums/shared", |r| r).await?;
        Ok(envelope.albums)
    }

    /// `GET /albums/:id`
    pub async fn get_album(&self, id: &str) -> Result<Album, ApiError> {
        let path = format!("/albums/{}", segment(id)?);
        let envelope: AlbumEnvelope = self.execute(Method::GET, &path, |r| r).await?;
        Ok(envelope.album)
    }

    /// `POST /albums`
    pub async fn create_album(&self, draft: &AlbumDraft) -> Result<Album, ApiError> {
        let envelope: AlbumEnvelope = self
            .execute(Method::POST, "/albums", |r| r.json(draft))
            .await?;
        Ok(envelope.album)
    }

    /// `PUT /albums/:id`
    pub async fn update_album(&self, id: &str, draft: &AlbumDraft) -> Result<Album, ApiError> {
        let path = format!("/albums/{}", segment(id)?);
        let envelope: AlbumEnvelope = self.execute(Method::PUT, &path, |r| r.json(draft)).await?;
        Ok(envelope.album)
    }

    /// `DELETE /albums/:id`
    pub async fn delete_album(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/albums/{}", segment(id)?);
        let _: serde_json::Value = self.execute(Method::DELETE, &path, |r| r).await?;
        Ok(())
    }

    /// `POST /albums/:id/share`
    pub async fn share_album(&self, id: &str, usernames: &[String]) -> Result<Album, ApiError> {
        let path = format!("/albums/{}/share", segment(id)?);
        let body = ShareRequest {
            usernames: usernames.to_vec(),
        };
        let envelope: AlbumEnvelope = self.execute(Method::POST, &path, |r| r.json(&body)).await?;
        Ok(envelope.album)
    }
}
