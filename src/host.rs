//! # Hosting Type Graphs
//!
//! A host, such as an editor extension or a watch process, rebuilds its graph whenever the
//! schema changes. Builds may overlap, and only the most recently requested one may replace the
//! displayed graph. [GraphHost] tracks this with a monotonically increasing [RequestToken].
//!
//! ```
//! use graphql_type_graph::{host::*, pipeline::{Options, Source}};
//!
//! let host = GraphHost::new();
//! let stale = host.begin_request();
//! let fresh = host.begin_request();
//!
//! let sources = [Source::new("schema.graphql", "type Query { id: ID }")];
//! let completion = host.complete(fresh, &sources, &Options::default()).unwrap();
//! assert_eq!(completion, Completion::Applied);
//! let completion = host.complete(stale, &sources, &Options::default()).unwrap();
//! assert_eq!(completion, Completion::Superseded);
//! assert!(host.current().is_some());
//! ```

use crate::{
    error::Result,
    graph::TypeGraph,
    pipeline::{build_type_graph, Options, Source},
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard,
};

/// Identifies one build request of a [GraphHost].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What happened to the outcome of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome became the host's current graph.
    Applied,
    /// A newer request was issued in the meantime and the outcome was discarded.
    Superseded,
}

/// Holds the graph that's currently displayed and decides which build may replace it.
///
/// Failed or empty builds never clear the current graph. It is retained until a newer build
/// succeeds.
#[derive(Debug, Default)]
pub struct GraphHost {
    latest: AtomicU64,
    current: Mutex<Option<Arc<TypeGraph>>>,
}

impl GraphHost {
    pub fn new() -> Self {
        GraphHost::default()
    }

    /// Issues a new token, superseding all previously issued ones.
    pub fn begin_request(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[inline]
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Builds a graph for the request of `token` and installs it if the request is still the
    /// latest one.
    ///
    /// A request that's already superseded isn't built at all. Errors are only reported for the
    /// latest request, and a request superseded while building completes with
    /// [Completion::Superseded] whatever its outcome was.
    pub fn complete(
        &self,
        token: RequestToken,
        sources: &[Source],
        options: &Options,
    ) -> Result<Completion> {
        if !self.is_latest(token) {
            tracing::debug!(token = token.0, "skipped superseded build");
            return Ok(Completion::Superseded);
        }
        let outcome = build_type_graph(sources, options);
        self.apply(token, outcome)
    }

    /// Installs the outcome of a build that ran elsewhere.
    pub fn apply(
        &self,
        token: RequestToken,
        outcome: Result<Option<TypeGraph>>,
    ) -> Result<Completion> {
        let mut current = self.lock();
        if !self.is_latest(token) {
            tracing::debug!(token = token.0, "discarded superseded build");
            return Ok(Completion::Superseded);
        }
        if let Some(graph) = outcome? {
            *current = Some(Arc::new(graph));
        }
        Ok(Completion::Applied)
    }

    /// The graph of the latest successful build, if any.
    pub fn current(&self) -> Option<Arc<TypeGraph>> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<TypeGraph>>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use std::thread;

    fn sources(source: &str) -> [Source; 1] {
        [Source::new("schema.graphql", source)]
    }

    #[test]
    fn latest_request_wins() {
        let host = GraphHost::new();
        let first = host.begin_request();
        let second = host.begin_request();
        assert!(first < second);

        let options = Options::default();
        let completion = host
            .complete(second, &sources("type Query { second: ID }"), &options)
            .unwrap();
        assert_eq!(completion, Completion::Applied);
        let completion = host
            .complete(first, &sources("type Query { first: ID }"), &options)
            .unwrap();
        assert_eq!(completion, Completion::Superseded);

        let graph = host.current().unwrap();
        assert!(graph.query_type().fields.contains_key("second"));
    }

    #[test]
    fn failures_retain_current_graph() {
        let host = GraphHost::new();
        let options = Options::default();
        let token = host.begin_request();
        host.complete(token, &sources("type Query { id: ID }"), &options)
            .unwrap();

        let token = host.begin_request();
        let error = host
            .complete(token, &sources("type Query { id: Missing }"), &options)
            .unwrap_err();
        assert_eq!(error.error_type(), ErrorType::UnresolvedReference);

        let token = host.begin_request();
        let completion = host.complete(token, &[], &options).unwrap();
        assert_eq!(completion, Completion::Applied);
        assert!(host.current().unwrap().query_type().fields.contains_key("id"));
    }

    #[test]
    fn superseded_failures_are_silent() {
        let host = GraphHost::new();
        let stale = host.begin_request();
        host.begin_request();
        let completion = host
            .complete(stale, &sources("type Query {"), &Options::default())
            .unwrap();
        assert_eq!(completion, Completion::Superseded);
        assert!(host.current().is_none());
    }

    #[test]
    fn superseded_outcomes_are_discarded() {
        let host = GraphHost::new();
        let token = host.begin_request();
        let outcome = build_type_graph(&sources("type Query { id: ID }"), &Options::default());
        host.begin_request();
        assert_eq!(host.apply(token, outcome).unwrap(), Completion::Superseded);
        assert!(host.current().is_none());
    }

    #[test]
    fn concurrent_builds() {
        let host = Arc::new(GraphHost::new());
        let tokens: Vec<RequestToken> = (0..8).map(|_| host.begin_request()).collect();
        let latest = *tokens.last().unwrap();

        let handles: Vec<_> = tokens
            .into_iter()
            .map(|token| {
                let host = Arc::clone(&host);
                thread::spawn(move || {
                    let source = format!("type Query {{ build{}: ID }}", token.0);
                    host.complete(token, &sources(&source), &Options::default())
                        .unwrap()
                })
            })
            .collect();
        let applied = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|completion| *completion == Completion::Applied)
            .count();

        assert_eq!(applied, 1);
        let field = format!("build{}", latest.0);
        assert!(host.current().unwrap().query_type().fields.contains_key(&field));
    }
}
