use crate::mvi::Reducer;
use crate::store::image::intent::ImageIntent;
use crate::store::image::state::ImageState;

pub struct ImageReducer;

impl Reducer for ImageReducer {
    type State = ImageState;
    type Intent = ImageIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ImageIntent::Started(ticket) => state.lifecycle.begin(ticket),
            ImageIntent::Listed {
                ticket,
                album_id,
                images,
            } => {
                if state.lifecycle.succeed(ticket) {
                    state.images = images;
                    state.album_id = Some(album_id);
                }
            }
            ImageIntent::Uploaded {
                ticket,
                album_id,
                image,
            } => {
                // Uploads into another album stay out of the displayed list.
                if state.lifecycle.succeed(ticket) && state.is_showing(&album_id) {
                    match state.images.iter_mut().find(|i| i.id == image.id) {
                        Some(existing) => *existing = image,
                        None => state.images.push(image),
                    }
                }
            }
            ImageIntent::FavoriteToggled { ticket, image } => {
                if state.lifecycle.succeed(ticket) {
                    if let Some(existing) = state.images.iter_mut().find(|i| i.id == image.id) {
                        *existing = image;
                    }
                }
            }
            ImageIntent::CommentAdded {
                ticket,
                image_id,
                comment,
            } => {
                if state.lifecycle.succeed(ticket) {
                    if let Some(image) = state.images.iter_mut().find(|i| i.id == image_id) {
                        let duplicate = comment.id.is_some()
                            && image.comments.iter().any(|c| c.id == comment.id);
                        if !duplicate {
                            image.comments.push(comment);
                        }
                    }
                }
            }
            ImageIntent::Deleted { ticket, image_id } => {
                if state.lifecycle.succeed(ticket) {
                    state.images.retain(|i| i.id != image_id);
                }
            }
            ImageIntent::Failed { ticket, error } => {
                state.lifecycle.fail(ticket, error);
            }
            ImageIntent::Abandoned(ticket) => state.lifecycle.abandon(ticket),
            ImageIntent::ClearError => state.lifecycle.clear_error(),
            ImageIntent::Reset => {
                return ImageState {
                    lifecycle: state.lifecycle.retired(),
                    ..ImageState::default()
                };
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Comment, Image};
    use crate::store::image::operation::ImageKind;
    use crate::store::status::{Status, Ticket};

    fn image(id: &str, album_id: &str) -> Image {
        Image {
            id: id.to_string(),
            album_id: album_id.to_string(),
            file: format!("https://cdn.example/{id}.png"),
            name: id.to_uppercase(),
            tags: Vec::new(),
            person: None,
            is_favorite: false,
            comments: Vec::new(),
        }
    }

    fn started(state: ImageState, kind: ImageKind) -> (ImageState, Ticket<ImageKind>) {
        let ticket = state.lifecycle.next_ticket(kind);
        (ImageReducer::reduce(state, ImageIntent::Started(ticket)), ticket)
    }

    fn showing(album_id: &str, images: Vec<Image>) -> ImageState {
        let (state, ticket) = started(ImageState::default(), ImageKind::FetchAll);
        ImageReducer::reduce(
            state,
            ImageIntent::Listed {
                ticket,
                album_id: album_id.to_string(),
                images,
            },
        )
    }

    #[test]
    fn upload_appends_to_displayed_album_only() {
        let state = showing("a1", vec![image("i1", "a1")]);

        let (state, ticket) = started(state, ImageKind::Upload);
        let state = ImageReducer::reduce(
            state,
            ImageIntent::Uploaded {
                ticket,
                album_id: "a1".to_string(),
                image: image("i2", "a1"),
            },
        );
        assert_eq!(state.images.len(), 2);

        let (state, ticket) = started(state, ImageKind::Upload);
        let state = ImageReducer::reduce(
            state,
            ImageIntent::Uploaded {
                ticket,
                album_id: "a2".to_string(),
                image: image("i3", "a2"),
            },
        );
        assert_eq!(state.images.len(), 2);
        assert_eq!(state.lifecycle.status, Status::Succeeded);
    }

    #[test]
    fn favorite_replaces_entry() {
        let state = showing("a1", vec![image("i1", "a1"), image("i2", "a1")]);
        let (state, ticket) = started(state, ImageKind::ToggleFavorite);
        let mut favorite = image("i2", "a1");
        favorite.is_favorite = true;

        let state = ImageReducer::reduce(
            state,
            ImageIntent::FavoriteToggled {
                ticket,
                image: favorite,
            },
        );
        assert!(!state.images[0].is_favorite);
        assert!(state.images[1].is_favorite);
    }

    #[test]
    fn comment_appends_to_matching_image() {
        let state = showing("a1", vec![image("i1", "a1"), image("i2", "a1")]);
        let (state, ticket) = started(state, ImageKind::AddComment);
        let state = ImageReducer::reduce(
            state,
            ImageIntent::CommentAdded {
                ticket,
                image_id: "i2".to_string(),
                comment: Comment {
                    id: Some("c1".to_string()),
                    text: "Lovely".to_string(),
                    author: None,
                },
            },
        );
        assert!(state.images[0].comments.is_empty());
        assert_eq!(state.images[1].comments.len(), 1);
        assert_eq!(state.images[1].comments[0].text, "Lovely");
    }

    #[test]
    fn delete_removes_exactly_one() {
        let state = showing(
            "a1",
            vec![image("i3", "a1"), image("i1", "a1"), image("i2", "a1")],
        );
        let (state, ticket) = started(state, ImageKind::Delete);
        let state = ImageReducer::reduce(
            state,
            ImageIntent::Deleted {
                ticket,
                image_id: "i1".to_string(),
            },
        );
        let ids: Vec<_> = state.images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i3", "i2"]);
    }

    #[test]
    fn stale_album_listing_is_dropped() {
        let (state, first) = started(ImageState::default(), ImageKind::FetchAll);
        let (state, second) = started(state, ImageKind::FetchAll);
        let state = ImageReducer::reduce(
            state,
            ImageIntent::Listed {
                ticket: second,
                album_id: "a2".to_string(),
                images: vec![image("i9", "a2")],
            },
        );
        let state = ImageReducer::reduce(
            state,
            ImageIntent::Listed {
                ticket: first,
                album_id: "a1".to_string(),
                images: vec![image("i1", "a1")],
            },
        );
        assert_eq!(state.album_id.as_deref(), Some("a2"));
        assert_eq!(state.images[0].id, "i9");
    }
}
