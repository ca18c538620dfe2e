use crate::api::{AlbumDraft, ApiClient};
use crate::store::album::intent::AlbumIntent;
use crate::store::status::{RequestKind, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumKind {
    FetchAll,
    FetchDetails,
    FetchShared,
    Create,
    Update,
    Delete,
    Share,
}

impl RequestKind for AlbumKind {
    fn replaces(self) -> bool {
        matches!(
            self,
            AlbumKind::FetchAll | AlbumKind::FetchDetails | AlbumKind::FetchShared
        )
    }

    fn fallback_message(self) -> &'static str {
        match self {
            AlbumKind::FetchAll => "Failed to fetch albums",
            AlbumKind::FetchDetails => "Failed to fetch album details",
            AlbumKind::FetchShared => "Failed to fetch shared albums",
            AlbumKind::Create => "Failed to create album",
            AlbumKind::Update => "Failed to update album",
            AlbumKind::Delete => "Failed to delete album",
            AlbumKind::Share => "Failed to share album",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlbumOperation {
    FetchAll,
    FetchDetails { id: String },
    FetchShared,
    Create(AlbumDraft),
    Update { id: String, draft: AlbumDraft },
    Delete { id: String },
    Share { id: String, usernames: Vec<String> },
}

impl AlbumOperation {
    pub fn kind(&self) -> AlbumKind {
        match self {
            AlbumOperation::FetchAll => AlbumKind::FetchAll,
            AlbumOperation::FetchDetails { .. } => AlbumKind::FetchDetails,
            AlbumOperation::FetchShared => AlbumKind::FetchShared,
            AlbumOperation::Create(_) => AlbumKind::Create,
            AlbumOperation::Update { .. } => AlbumKind::Update,
            AlbumOperation::Delete { .. } => AlbumKind::Delete,
            AlbumOperation::Share { .. } => AlbumKind::Share,
        }
    }

    pub(crate) async fn execute(self, ticket: Ticket<AlbumKind>, api: &ApiClient) -> AlbumIntent {
        let result = match self {
            AlbumOperation::FetchAll => api
                .list_albums()
                .await
                .map(|albums| AlbumIntent::Listed { ticket, albums }),
            AlbumOperation::FetchDetails { id } => api
                .get_album(&id)
                .await
                .map(|album| AlbumIntent::DetailsLoaded { ticket, album }),
            AlbumOperation::FetchShared => api
                .list_shared_albums()
                .await
                .map(|albums| AlbumIntent::SharedListed { ticket, albums }),
            AlbumOperation::Create(draft) => api
                .create_album(&draft)
                .await
                .map(|album| AlbumIntent::Created { ticket, album }),
            AlbumOperation::Update { id, draft } => api
                .update_album(&id, &draft)
                .await
                .map(|album| AlbumIntent::Updated { ticket, album }),
            AlbumOperation::Delete { id } => api
                .delete_album(&id)
                .await
                .map(|()| AlbumIntent::Deleted { ticket, id }),
            AlbumOperation::Share { id, usernames } => api
                .share_album(&id, &usernames)
                .await
                .map(|album| AlbumIntent::Shared { ticket, album }),
        };

        result.unwrap_or_else(|err| AlbumIntent::Failed {
            ticket,
            error: err.into_rejection(ticket.kind.fallback_message()),
        })
    }
}
