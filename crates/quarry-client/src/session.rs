//! Submit-and-render flow with request-sequence tickets.

use crate::render::{render, OutputContainer, RenderPolicy};
use crate::transport::SearchTransport;
use crate::ClientError;
use quarry_core::protocol::{SearchRequest, SearchResponse};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

/// Sequence number of a submission. Later submissions get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The container now holds `rows` rows for this ticket.
    Rendered { ticket: Ticket, rows: usize },
    /// A newer submission was issued before this one answered.
    Stale { ticket: Ticket },
    /// The request failed; the container was left as it was.
    Failed { ticket: Ticket, error: ClientError },
}

impl Outcome {
    pub fn ticket(&self) -> Ticket {
        match self {
            Outcome::Rendered { ticket, .. }
            | Outcome::Stale { ticket }
            | Outcome::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Issues searches through a transport and renders the latest answer.
///
/// The session is `Sync` when its transport is, so several threads may
/// submit through one session. Only the answer to the most recently issued
/// ticket is ever rendered.
pub struct SearchSession<T> {
    transport: T,
    policy: RenderPolicy,
    limit: Option<usize>,
    latest: AtomicU64,
}

impl<T: SearchTransport> SearchSession<T> {
    pub fn new(transport: T, policy: RenderPolicy) -> Self {
        Self {
            transport,
            policy,
            limit: None,
            latest: AtomicU64::new(0),
        }
    }

    /// Ask the server for at most `limit` hits instead of its default.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Take the next ticket. Every earlier ticket becomes stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Perform the request for `query` without touching any output.
    pub fn fetch(&self, query: &str) -> Result<SearchResponse, ClientError> {
        let mut request = SearchRequest::new(query);
        request.limit = self.limit;
        self.transport.search(&request)
    }

    /// Render the answer for `ticket` into `out` if it is still current.
    pub fn deliver(
        &self,
        ticket: Ticket,
        result: Result<SearchResponse, ClientError>,
        out: &mut dyn OutputContainer,
    ) -> Outcome {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("Search #{} failed: {}", ticket.0, e);
                return Outcome::Failed { ticket, error: e };
            }
        };

        if !self.is_current(ticket) {
            debug!("Dropping stale response for search #{}", ticket.0);
            return Outcome::Stale { ticket };
        }

        let rows = render(self.policy, &response.results);
        let count = rows.len();
        out.replace(rows);
        Outcome::Rendered {
            ticket,
            rows: count,
        }
    }

    /// Issue, fetch, and deliver in one call.
    pub fn submit(&self, query: &str, out: &mut dyn OutputContainer) -> Outcome {
        let ticket = self.issue();
        debug!(query, "Submitting search #{}", ticket.0);
        let result = self.fetch(query);
        self.deliver(ticket, result, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Row;
    use quarry_core::protocol::SearchHit;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::thread;

    /// Records every request and answers from a fixed table.
    #[derive(Default)]
    struct FakeTransport {
        seen: Mutex<Vec<SearchRequest>>,
        fail_with: Option<ClientError>,
    }

    impl SearchTransport for FakeTransport {
        fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
            self.seen.lock().unwrap().push(request.clone());
            if let Some(e) = &self.fail_with {
                return Err(e.clone());
            }
            Ok(response_for(&request.query))
        }
    }

    fn response_for(query: &str) -> SearchResponse {
        SearchResponse {
            results: vec![SearchHit::new(format!("{query}.md"), 1.0)],
        }
    }

    fn existing_rows() -> Vec<Row> {
        vec![Row::Pair("previous => 1".into())]
    }

    #[test]
    fn test_submit_replaces_output() {
        let session = SearchSession::new(FakeTransport::default(), RenderPolicy::default());
        let mut out = existing_rows();

        let outcome = session.submit("apple", &mut out);

        assert!(matches!(outcome, Outcome::Rendered { rows: 1, .. }));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "apple.md  Score: 1");
    }

    #[test]
    fn test_empty_query_is_still_sent() {
        let session = SearchSession::new(FakeTransport::default(), RenderPolicy::KeyValue);
        let mut out = Vec::new();

        session.submit("", &mut out);

        let seen = session.transport().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].query, "");
        assert_eq!(seen[0].limit, None);
    }

    #[test]
    fn test_limit_is_forwarded() {
        let session =
            SearchSession::new(FakeTransport::default(), RenderPolicy::default()).with_limit(3);
        session.submit("x", &mut Vec::new());
        assert_eq!(session.transport().seen.lock().unwrap()[0].limit, Some(3));
    }

    #[test]
    fn test_failure_leaves_output_untouched() {
        for error in [
            ClientError::Transport("connection refused".into()),
            ClientError::Status {
                status: 500,
                message: "boom".into(),
            },
            ClientError::Decode("expected value".into()),
        ] {
            let transport = FakeTransport {
                fail_with: Some(error.clone()),
                ..Default::default()
            };
            let session = SearchSession::new(transport, RenderPolicy::default());
            let mut out = existing_rows();

            let outcome = session.submit("apple", &mut out);

            assert_eq!(
                outcome,
                Outcome::Failed {
                    ticket: Ticket(1),
                    error
                }
            );
            assert_eq!(out, existing_rows());
        }
    }

    #[test]
    fn test_tickets_increase() {
        let session = SearchSession::new(FakeTransport::default(), RenderPolicy::default());
        let first = session.issue();
        let second = session.issue();

        assert!(second > first);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn test_late_response_for_older_query_is_dropped() {
        let session = SearchSession::new(FakeTransport::default(), RenderPolicy::default());
        let mut out = Vec::new();

        let first = session.issue();
        let second = session.issue();

        let outcome = session.deliver(second, Ok(response_for("second")), &mut out);
        assert_eq!(outcome, Outcome::Rendered { ticket: second, rows: 1 });

        let outcome = session.deliver(first, Ok(response_for("first")), &mut out);
        assert_eq!(outcome, Outcome::Stale { ticket: first });
        assert_eq!(out[0].to_string(), "second.md  Score: 1");
    }

    /// Holds back the answer to "slow" until the test releases it.
    struct GatedTransport {
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl SearchTransport for GatedTransport {
        fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
            if request.query == "slow" {
                let _ = self.release.lock().unwrap().recv();
            }
            Ok(response_for(&request.query))
        }
    }

    #[test]
    fn test_concurrent_submissions_render_latest_query() {
        let (release, gate) = mpsc::channel();
        let session = Arc::new(SearchSession::new(
            GatedTransport {
                release: Mutex::new(gate),
            },
            RenderPolicy::default(),
        ));
        let out = Arc::new(Mutex::new(Vec::new()));

        let slow_ticket = session.issue();
        let slow = {
            let session = Arc::clone(&session);
            let out = Arc::clone(&out);
            thread::spawn(move || {
                let result = session.fetch("slow");
                session.deliver(slow_ticket, result, &mut *out.lock().unwrap())
            })
        };

        let fast = session.submit("fast", &mut *out.lock().unwrap());
        assert!(matches!(fast, Outcome::Rendered { .. }));

        release.send(()).unwrap();
        let slow = slow.join().unwrap();

        assert_eq!(slow, Outcome::Stale { ticket: slow_ticket });
        assert_eq!(out.lock().unwrap()[0].to_string(), "fast.md  Score: 1");
    }
}
