use crate::api::Album;
use crate::mvi::Reducer;
use crate::store::album::intent::AlbumIntent;
use crate::store::album::state::AlbumState;

pub struct AlbumReducer;

impl Reducer for AlbumReducer {
    type State = AlbumState;
    type Intent = AlbumIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AlbumIntent::Started(ticket) => {
                state.lifecycle.begin(ticket);
            }
            AlbumIntent::Listed { ticket, albums } => {
                if state.lifecycle.succeed(ticket) {
                    state.albums = albums;
                }
            }
            AlbumIntent::DetailsLoaded { ticket, album } => {
                if state.lifecycle.succeed(ticket) {
                    state.album_details = Some(album);
                }
            }
            AlbumIntent::SharedListed { ticket, albums } => {
                if state.lifecycle.succeed(ticket) {
                    state.shared_albums = albums;
                }
            }
            AlbumIntent::Created { ticket, album } => {
                if state.lifecycle.succeed(ticket) {
                    upsert(&mut state.albums, album);
                }
            }
            AlbumIntent::Updated { ticket, album } | AlbumIntent::Shared { ticket, album } => {
                if state.lifecycle.succeed(ticket) {
                    replace(&mut state.albums, &album);
                    state.album_details = Some(album);
                }
            }
            AlbumIntent::Deleted { ticket, id } => {
                if state.lifecycle.succeed(ticket) {
                    state.albums.retain(|a| a.id != id);
                    if state.album_details.as_ref().is_some_and(|a| a.id == id) {
                        state.album_details = None;
                    }
                }
            }
            AlbumIntent::Failed { ticket, error } => {
                state.lifecycle.fail(ticket, error);
            }
            AlbumIntent::Abandoned(ticket) => state.lifecycle.abandon(ticket),
            AlbumIntent::ClearError => state.lifecycle.clear_error(),
            AlbumIntent::Reset => {
                return AlbumState {
                    lifecycle: state.lifecycle.retired(),
                    ..AlbumState::default()
                };
            }
        }
        state
    }
}

fn upsert(albums: &mut Vec<Album>, album: Album) {
    match albums.iter_mut().find(|a| a.id == album.id) {
        Some(existing) => *existing = album,
        None => albums.push(album),
    }
}

fn replace(albums: &mut [Album], album: &Album) {
    if let Some(existing) = albums.iter_mut().find(|a| a.id == album.id) {
        *existing = album.clone();
    }
}
