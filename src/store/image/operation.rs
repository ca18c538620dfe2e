use crate::api::{ApiClient, ImageUpload};
use crate::store::image::intent::ImageIntent;
use crate::store::status::{RequestKind, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    FetchAll,
    Upload,
    ToggleFavorite,
    AddComment,
    Delete,
}

impl RequestKind for ImageKind {
    fn replaces(self) -> bool {
        matches!(self, ImageKind::FetchAll)
    }

    fn fallback_message(self) -> &'static str {
        match self {
            ImageKind::FetchAll => "Failed to fetch images",
            ImageKind::Upload => "Failed to upload image",
            ImageKind::ToggleFavorite => "Failed to toggle favorite",
            ImageKind::AddComment => "Failed to add comment",
            ImageKind::Delete => "Failed to delete image",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageOperation {
    FetchAll {
        album_id: String,
        tags: Option<String>,
    },
    Upload {
        album_id: String,
        upload: ImageUpload,
    },
    ToggleFavorite {
        album_id: String,
        image_id: String,
    },
    AddComment {
        album_id: String,
        image_id: String,
        text: String,
    },
    Delete {
        album_id: String,
        image_id: String,
    },
}

impl ImageOperation {
    pub fn kind(&self) -> ImageKind {
        match self {
            ImageOperation::FetchAll { .. } => ImageKind::FetchAll,
            ImageOperation::Upload { .. } => ImageKind::Upload,
            ImageOperation::ToggleFavorite { .. } => ImageKind::ToggleFavorite,
            ImageOperation::AddComment { .. } => ImageKind::AddComment,
            ImageOperation::Delete { .. } => ImageKind::Delete,
        }
    }

    pub(crate) async fn execute(self, ticket: Ticket<ImageKind>, api: &ApiClient) -> ImageIntent {
        let result = match self {
            ImageOperation::FetchAll { album_id, tags } => api
                .list_images(&album_id, tags.as_deref())
                .await
                .map(|images| ImageIntent::Listed {
                    ticket,
                    album_id,
                    images,
                }),
            ImageOperation::Upload { album_id, upload } => api
                .upload_image(&album_id, &upload)
                .await
                .map(|image| ImageIntent::Uploaded {
                    ticket,
                    album_id,
                    image,
                }),
            ImageOperation::ToggleFavorite { album_id, image_id } => api
                .toggle_favorite(&album_id, &image_id)
                .await
                .map(|image| ImageIntent::FavoriteToggled { ticket, image }),
            ImageOperation::AddComment {
                album_id,
                image_id,
                text,
            } => api
                .add_comment(&album_id, &image_id, &text)
                .await
                .map(|comment| ImageIntent::CommentAdded {
                    ticket,
                    image_id,
                    comment,
                }),
            ImageOperation::Delete { album_id, image_id } => api
                .delete_image(&album_id, &image_id)
                .await
                .map(|()| ImageIntent::Deleted { ticket, image_id }),
        };

        result.unwrap_or_else(|err| ImageIntent::Failed {
            ticket,
            error: err.into_rejection(ticket.kind.fallback_message()),
        })
    }
}
