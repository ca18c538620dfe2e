//! Request lifecycle shared by every slice.
//!
//! Each slice issues a [`Ticket`] per operation from its own [`Sequencer`].
//! Tickets decide two things when a request settles:
//!
//! - whether the slice status may change: only the most recently issued
//!   request moves the status to a terminal state;
//! - whether the payload applies: a response of a replacing kind (a fetch)
//!   is dropped when a newer request of the same kind exists. Patches
//!   always apply.
//!
//! Logging out retires every ticket issued so far, so responses that
//! arrive after a teardown are ignored entirely.

use crate::api::ErrorPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Operation kinds of one slice.
pub trait RequestKind: Copy + Eq + std::fmt::Debug + Send + 'static {
    /// True when a response replaces held data wholesale, so a response
    /// older than the latest request of the same kind is stale.
    fn replaces(self) -> bool;

    /// Message used when the backend gives no error payload.
    fn fallback_message(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket<K> {
    pub kind: K,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequencer<K> {
    issued: u64,
    latest_by_kind: Vec<(K, u64)>,
    floor: u64,
}

impl<K> Default for Sequencer<K> {
    fn default() -> Self {
        Self {
            issued: 0,
            latest_by_kind: Vec::new(),
            floor: 0,
        }
    }
}

impl<K: RequestKind> Sequencer<K> {
    /// Ticket the next request will get. Does not record it.
    pub fn peek(&self, kind: K) -> Ticket<K> {
        Ticket {
            kind,
            seq: self.issued + 1,
        }
    }

    pub fn record(&mut self, ticket: Ticket<K>) {
        self.issued = self.issued.max(ticket.seq);
        match self.latest_by_kind.iter_mut().find(|(k, _)| *k == ticket.kind) {
            Some((_, seq)) => *seq = (*seq).max(ticket.seq),
            None => self.latest_by_kind.push((ticket.kind, ticket.seq)),
        }
    }

    pub fn is_latest(&self, ticket: Ticket<K>) -> bool {
        ticket.seq == self.issued && !self.is_retired(ticket)
    }

    pub fn is_current_for_kind(&self, ticket: Ticket<K>) -> bool {
        !self.is_retired(ticket)
            && self
                .latest_by_kind
                .iter()
                .any(|(k, seq)| *k == ticket.kind && *seq == ticket.seq)
    }

    pub fn is_retired(&self, ticket: Ticket<K>) -> bool {
        ticket.seq <= self.floor
    }

    /// Kind of the most recently issued live request.
    pub fn latest(&self) -> Option<K> {
        self.latest_by_kind
            .iter()
            .find(|(_, seq)| *seq == self.issued && *seq > self.floor)
            .map(|(kind, _)| *kind)
    }

    /// Invalidate every ticket issued so far.
    pub fn retired(&self) -> Self {
        Self {
            issued: self.issued,
            latest_by_kind: Vec::new(),
            floor: self.issued,
        }
    }
}

/// Status, error and sequencing for one slice (or one form within it).
#[derive(Debug, Clone, PartialEq)]
pub struct Lifecycle<K> {
    pub status: Status,
    pub error: Option<ErrorPayload>,
    requests: Sequencer<K>,
}

impl<K> Default for Lifecycle<K> {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            error: None,
            requests: Sequencer::default(),
        }
    }
}

impl<K: RequestKind> Lifecycle<K> {
    pub fn next_ticket(&self, kind: K) -> Ticket<K> {
        self.requests.peek(kind)
    }

    /// Pending transition: loading, error cleared.
    pub fn begin(&mut self, ticket: Ticket<K>) {
        self.requests.record(ticket);
        self.status = Status::Loading;
        self.error = None;
    }

    /// Record a successful response. Returns whether its payload applies.
    pub fn succeed(&mut self, ticket: Ticket<K>) -> bool {
        if self.requests.is_retired(ticket) {
            return false;
        }
        if self.requests.is_latest(ticket) {
            self.status = Status::Succeeded;
        }
        !ticket.kind.replaces() || self.requests.is_current_for_kind(ticket)
    }

    /// Record a rejection. Returns whether it became the slice error.
    pub fn fail(&mut self, ticket: Ticket<K>, error: ErrorPayload) -> bool {
        if !self.requests.is_latest(ticket) {
            tracing::debug!(kind = ?ticket.kind, seq = ticket.seq, "Dropping superseded failure");
            return false;
        }
        self.status = Status::Failed;
        self.error = Some(error);
        true
    }

    /// The request was cancelled before it settled.
    pub fn abandon(&mut self, ticket: Ticket<K>) {
        if self.requests.is_latest(ticket) && self.status == Status::Loading {
            self.status = Status::Idle;
        }
    }

    /// Whether a settled ticket is still the newest of its kind.
    pub fn is_current(&self, ticket: Ticket<K>) -> bool {
        self.requests.is_current_for_kind(ticket)
    }

    pub fn is_retired(&self, ticket: Ticket<K>) -> bool {
        self.requests.is_retired(ticket)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Whether the newest request was of `kind` and succeeded.
    pub fn succeeded(&self, kind: K) -> bool {
        self.status == Status::Succeeded && self.requests.latest() == Some(kind)
    }

    pub fn latest_kind(&self) -> Option<K> {
        self.requests.latest()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Fresh lifecycle that ignores every request issued before.
    pub fn retired(&self) -> Self {
        Self {
            status: Status::Idle,
            error: None,
            requests: self.requests.retired(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Fetch,
        Patch,
    }

    impl RequestKind for Kind {
        fn replaces(self) -> bool {
            matches!(self, Kind::Fetch)
        }

        fn fallback_message(self) -> &'static str {
            "Failed"
        }
    }

    fn begin(lifecycle: &mut Lifecycle<Kind>, kind: Kind) -> Ticket<Kind> {
        let ticket = lifecycle.next_ticket(kind);
        lifecycle.begin(ticket);
        ticket
    }

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let mut lifecycle = Lifecycle::default();
        let first = begin(&mut lifecycle, Kind::Fetch);
        lifecycle.fail(first, ErrorPayload::new("boom"));
        assert_eq!(lifecycle.status, Status::Failed);

        begin(&mut lifecycle, Kind::Fetch);
        assert_eq!(lifecycle.status, Status::Loading);
        assert!(lifecycle.error.is_none());
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut lifecycle = Lifecycle::default();
        let old = begin(&mut lifecycle, Kind::Fetch);
        let new = begin(&mut lifecycle, Kind::Fetch);

        assert!(lifecycle.succeed(new));
        assert_eq!(lifecycle.status, Status::Succeeded);
        assert!(!lifecycle.succeed(old));
        assert_eq!(lifecycle.status, Status::Succeeded);
    }

    #[test]
    fn older_patch_still_applies_without_touching_status() {
        let mut lifecycle = Lifecycle::default();
        let patch = begin(&mut lifecycle, Kind::Patch);
        let fetch = begin(&mut lifecycle, Kind::Fetch);

        assert!(lifecycle.succeed(patch));
        assert_eq!(lifecycle.status, Status::Loading);
        assert!(lifecycle.succeed(fetch));
        assert_eq!(lifecycle.status, Status::Succeeded);
    }

    #[test]
    fn superseded_failure_is_ignored() {
        let mut lifecycle = Lifecycle::default();
        let old = begin(&mut lifecycle, Kind::Fetch);
        let new = begin(&mut lifecycle, Kind::Fetch);
        lifecycle.succeed(new);

        assert!(!lifecycle.fail(old, ErrorPayload::new("late")));
        assert_eq!(lifecycle.status, Status::Succeeded);
        assert!(lifecycle.error.is_none());
    }

    #[test]
    fn abandoned_latest_returns_to_idle() {
        let mut lifecycle = Lifecycle::default();
        let ticket = begin(&mut lifecycle, Kind::Fetch);
        lifecycle.abandon(ticket);
        assert_eq!(lifecycle.status, Status::Idle);
    }

    #[test]
    fn retired_tickets_are_ignored() {
        let mut lifecycle = Lifecycle::default();
        let ticket = begin(&mut lifecycle, Kind::Fetch);
        let mut lifecycle = lifecycle.retired();

        assert!(!lifecycle.succeed(ticket));
        assert!(!lifecycle.fail(ticket, ErrorPayload::new("late")));
        assert_eq!(lifecycle.status, Status::Idle);

        let fresh = begin(&mut lifecycle, Kind::Fetch);
        assert!(fresh.seq > ticket.seq);
        assert!(lifecycle.succeed(fresh));
    }

    #[test]
    fn succeeded_tracks_latest_kind() {
        let mut lifecycle = Lifecycle::default();
        begin(&mut lifecycle, Kind::Fetch);
        let patch = begin(&mut lifecycle, Kind::Patch);
        assert!(!lifecycle.succeeded(Kind::Patch));

        lifecycle.succeed(patch);
        assert!(lifecycle.succeeded(Kind::Patch));
        assert!(!lifecycle.succeeded(Kind::Fetch));
        assert_eq!(lifecycle.retired().latest_kind(), None);
    }
}
