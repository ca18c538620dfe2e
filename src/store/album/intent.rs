use crate::api::{Album, ErrorPayload};
use crate::mvi::Intent;
use crate::store::album::operation::AlbumKind;
use crate::store::status::Ticket;

type AlbumTicket = Ticket<AlbumKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum AlbumIntent {
    Started(AlbumTicket),
    Listed { ticket: AlbumTicket, albums: Vec<Album> },
    DetailsLoaded { ticket: AlbumTicket, album: Album },
    SharedListed { ticket: AlbumTicket, albums: Vec<Album> },
    Created { ticket: AlbumTicket, album: Album },
    Updated { ticket: AlbumTicket, album: Album },
    Deleted { ticket: AlbumTicket, id: String },
    Shared { ticket: AlbumTicket, album: Album },
    Failed { ticket: AlbumTicket, error: ErrorPayload },
    /// Cancelled before settling.
    Abandoned(AlbumTicket),
    ClearError,
    /// Drop all data and retire outstanding requests.
    Reset,
}

impl Intent for AlbumIntent {}

impl AlbumIntent {
    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            AlbumIntent::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
