use crate::api::{Comment, ErrorPayload, Image};
use crate::mvi::Intent;
use crate::store::image::operation::ImageKind;
use crate::store::status::Ticket;

type ImageTicket = Ticket<ImageKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageIntent {
    Started(ImageTicket),
    Listed {
        ticket: ImageTicket,
        album_id: String,
        images: Vec<Image>,
    },
    Uploaded {
        ticket: ImageTicket,
        album_id: String,
        image: Image,
    },
    FavoriteToggled { ticket: ImageTicket, image: Image },
    CommentAdded {
        ticket: ImageTicket,
        image_id: String,
        comment: Comment,
    },
    Deleted { ticket: ImageTicket, image_id: String },
    Failed { ticket: ImageTicket, error: ErrorPayload },
    Abandoned(ImageTicket),
    ClearError,
    Reset,
}

impl Intent for ImageIntent {}

impl ImageIntent {
    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            ImageIntent::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
