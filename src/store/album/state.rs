use crate::api::Album;
use crate::mvi::UiState;
use crate::store::album::operation::AlbumKind;
use crate::store::status::Lifecycle;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlbumState {
    /// Albums owned by the signed-in user.
    pub albums: Vec<Album>,
    pub album_details: Option<Album>,
    /// Albums other users shared with the signed-in user.
    pub shared_albums: Vec<Album>,
    pub lifecycle: Lifecycle<AlbumKind>,
}

impl UiState for AlbumState {}

impl AlbumState {
    pub fn find(&self, id: &str) -> Option<&Album> {
        self.albums
            .iter()
            .chain(self.shared_albums.iter())
            .find(|a| a.id == id)
    }
}
