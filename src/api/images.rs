use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::api::client::{segment, ApiClient};
use crate::api::error::ApiError;
use crate::api::types::{
    Comment, CommentDraft, CommentEnvelope, Image, ImageEnvelope, ImageUpload, ImagesEnvelope,
};

fn images_path(album_id: &str) -> Result<String, ApiError> {
    Ok(format!("/albums/{}/images", segment(album_id)?))
}

fn image_path(album_id: &str, image_id: &str) -> Result<String, ApiError> {
    Ok(format!("{}/{}", images_path(album_id)?, segment(image_id)?))
}

impl ApiClient {
    /// `GET /albums/:albumId/images`, optionally filtered by `?tags=`.
    pub async fn list_images(
        &self,
        album_id: &str,
        tags: Option<&str>,
    ) -> Result<Vec<Image>, ApiError> {
        let path = images_path(album_id)?;
        let tags = tags.map(str::trim).filter(|t| !t.is_empty());
        let envelope: ImagesEnvelope = self
            .execute(Method::GET, &path, |r| match tags {
                Some(tags) => r.query(&[("tags", tags)]),
                None => r,
            })
            .await?;
        Ok(envelope.images)
    }

    /// `POST /albums/:albumId/images` as a multipart form.
    pub async fn upload_image(
        &self,
        album_id: &str,
        upload: &ImageUpload,
    ) -> Result<Image, ApiError> {
        let path = images_path(album_id)?;
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|source| ApiError::File {
                path: upload.path.clone(),
                source,
            })?;
        let size = bytes.len();
        let file = Part::bytes(bytes)
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime_type)
            .map_err(|source| ApiError::Transport {
                path: path.clone(),
                source,
            })?;
        let form = Form::new()
            .part("file", file)
            .text("name", upload.name.clone())
            .text("tags", upload.tags.clone())
            .text("person", upload.person.clone())
            .text("isFavorite", upload.is_favorite.to_string());

        tracing::debug!(album_id, size, "Uploading image");
        let envelope: ImageEnvelope = self
            .execute(Method::POST, &path, |r| r.multipart(form))
            .await?;
        Ok(envelope.image)
    }

    /// `PUT /albums/:albumId/images/:imageId/favorite`
    pub async fn toggle_favorite(&self, album_id: &str, image_id: &str) -> Result<Image, ApiError> {
        let path = format!("{}/favorite", image_path(album_id, image_id)?);
        let envelope: ImageEnvelope = self.execute(Method::PUT, &path, |r| r).await?;
        Ok(envelope.image)
    }

    /// `POST /albums/:albumId/images/:imageId/comments`
    pub async fn add_comment(
        &self,
        album_id: &str,
        image_id: &str,
        text: &str,
    ) -> Result<Comment, ApiError> {
        let path = format!("{}/comments", image_path(album_id, image_id)?);
        let body = CommentDraft { text };
        let envelope: CommentEnvelope =
            self.execute(Method::POST, &path, |r| r.json(&body)).await?;
        Ok(envelope.comment)
    }

    /// `DELETE /albums/:albumId/images/:imageId`
    pub async fn delete_image(&self, album_id: &str, image_id: &str) -> Result<(), ApiError> {
        let path = image_path(album_id, image_id)?;
        let _: serde_json::Value = self.execute(Method::DELETE, &path, |r| r).await?;
        Ok(())
    }
}
