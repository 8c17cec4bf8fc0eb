//! Search-trace notifications.
//!
//! The engine calls a [`SearchObserver`] synchronously, in search order, at
//! three points: a node is finalized, a node enters the frontier, and a node
//! is confirmed on the path. What an observer does with that (drawing,
//! animating, recording) is up to the host; the engine never waits on it.

use pathviz_core::Coordinate;

/// Receives node lifecycle notifications from a running search.
///
/// Every method has a no-op default.
pub trait SearchObserver {
    /// `c` was taken off the frontier and finalized.
    fn on_visited(&mut self, _c: Coordinate) {}

    /// `c` was newly inserted into the frontier.
    fn on_frontier_added(&mut self, _c: Coordinate) {}

    /// `c` is part of the found path. Called in start-to-end order.
    fn on_path_member(&mut self, _c: Coordinate) {}

    /// Polled once per outer-loop iteration; returning `true` ends the
    /// search with [`PathResult::Cancelled`](crate::PathResult::Cancelled).
    fn should_stop(&mut self) -> bool {
        false
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_visited(&mut self, c: Coordinate) {
        (**self).on_visited(c)
    }

    fn on_frontier_added(&mut self, c: Coordinate) {
        (**self).on_frontier_added(c)
    }

    fn on_path_member(&mut self, c: Coordinate) {
        (**self).on_path_member(c)
    }

    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
}

/// Ignores every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// One observer notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    Visited(Coordinate),
    FrontierAdded(Coordinate),
    PathMember(Coordinate),
}

impl SearchEvent {
    #[inline]
    pub fn coordinate(self) -> Coordinate {
        match self {
            Self::Visited(c) | Self::FrontierAdded(c) | Self::PathMember(c) => c,
        }
    }
}

/// Records every notification in order, for later replay.
///
/// With [`with_visit_limit`](Self::with_visit_limit) it also asks the engine
/// to stop once that many nodes have been visited.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecorder {
    events: Vec<SearchEvent>,
    visits: usize,
    visit_limit: Option<usize>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visit_limit(limit: usize) -> Self {
        Self {
            visit_limit: Some(limit),
            ..Self::default()
        }
    }

    #[inline]
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SearchEvent> {
        self.events
    }

    /// Coordinates finalized, in visit order.
    pub fn visited(&self) -> Vec<Coordinate> {
        self.filtered(|e| matches!(e, SearchEvent::Visited(_)))
    }

    /// Coordinates added to the frontier, in insertion order.
    pub fn frontier_added(&self) -> Vec<Coordinate> {
        self.filtered(|e| matches!(e, SearchEvent::FrontierAdded(_)))
    }

    /// Path members, start to end.
    pub fn path(&self) -> Vec<Coordinate> {
        self.filtered(|e| matches!(e, SearchEvent::PathMember(_)))
    }

    fn filtered(&self, keep: impl Fn(&SearchEvent) -> bool) -> Vec<Coordinate> {
        self.events
            .iter()
            .filter(|e| keep(e))
            .map(|e| e.coordinate())
            .collect()
    }

    /// Forget recorded events, keeping the visit limit.
    pub fn clear(&mut self) {
        self.events.clear();
        self.visits = 0;
    }
}

impl SearchObserver for TraceRecorder {
    fn on_visited(&mut self, c: Coordinate) {
        self.visits += 1;
        self.events.push(SearchEvent::Visited(c));
    }

    fn on_frontier_added(&mut self, c: Coordinate) {
        self.events.push(SearchEvent::FrontierAdded(c));
    }

    fn on_path_member(&mut self, c: Coordinate) {
        self.events.push(SearchEvent::PathMember(c));
    }

    fn should_stop(&mut self) -> bool {
        self.visit_limit.is_some_and(|limit| self.visits >= limit)
    }
}
