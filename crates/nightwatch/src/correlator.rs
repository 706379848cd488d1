//! Request-id correlation for in-flight protocol requests.

use std::collections::HashMap;

/// What a correlated request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// subscribe_events for state_changed
    Subscribe,
    /// get_states snapshot
    GetStates,
}

/// A request issued on the current connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub id: u64,
    pub kind: RequestKind,
}

/// Tracks outstanding requests by id.
///
/// Ids are unique and strictly increasing within one session; the counter
/// and the pending map live and die with the session that owns them.
#[derive(Debug, Default)]
pub struct RequestCorrelator {
    next_id: u64,
    pending: HashMap<u64, RequestKind>,
}

impl RequestCorrelator {
    /// Create an empty correlator. The first issued id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id and record the pending request.
    pub fn create(&mut self, kind: RequestKind) -> Request {
        self.next_id += 1;
        self.pending.insert(self.next_id, kind);
        Request {
            id: self.next_id,
            kind,
        }
    }

    /// Match a result id to its pending request, evicting it.
    ///
    /// `None` means the id belongs to no outstanding request; callers
    /// tolerate those.
    pub fn resolve(&mut self, id: u64) -> Option<RequestKind> {
        self.pending.remove(&id)
    }

    /// Number of requests still awaiting results.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut requests = RequestCorrelator::new();

        let first = requests.create(RequestKind::Subscribe);
        let second = requests.create(RequestKind::GetStates);

        assert_eq!(first.id, 1);
        assert_eq!(first.kind, RequestKind::Subscribe);
        assert_eq!(second.id, 2);
        assert_eq!(second.kind, RequestKind::GetStates);
    }

    #[test]
    fn resolve_returns_the_kind_exactly_once() {
        let mut requests = RequestCorrelator::new();
        let request = requests.create(RequestKind::Subscribe);

        assert_eq!(requests.resolve(request.id), Some(RequestKind::Subscribe));
        assert_eq!(requests.resolve(request.id), None);
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        let mut requests = RequestCorrelator::new();
        requests.create(RequestKind::Subscribe);

        assert_eq!(requests.resolve(99), None);
        assert_eq!(requests.pending_count(), 1);
    }

    #[test]
    fn pending_count_tracks_outstanding_requests() {
        let mut requests = RequestCorrelator::new();
        assert_eq!(requests.pending_count(), 0);

        let subscribe = requests.create(RequestKind::Subscribe);
        let snapshot = requests.create(RequestKind::GetStates);
        assert_eq!(requests.pending_count(), 2);

        requests.resolve(subscribe.id);
        requests.resolve(snapshot.id);
        assert_eq!(requests.pending_count(), 0);
    }
}
