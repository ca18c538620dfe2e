use crate::api::Image;
use crate::mvi::UiState;
use crate::store::image::operation::ImageKind;
use crate::store::status::Lifecycle;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageState {
    pub images: Vec<Image>,
    /// Album whose images are held.
    pub album_id: Option<String>,
    pub lifecycle: Lifecycle<ImageKind>,
}

impl UiState for ImageState {}

impl ImageState {
    pub fn find(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.id == id)
    }

    pub fn is_showing(&self, album_id: &str) -> bool {
        self.album_id.as_deref() == Some(album_id)
    }
}
