//! Background worker for search requests and status polling.

use quarry_client::{ClientError, SearchClient, SearchSession, SearchTransport, Ticket};
use quarry_core::protocol::{SearchResponse, StatusReport};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

const STATUS_INTERVAL: Duration = Duration::from_secs(2);

pub enum WorkerCommand {
    Search { ticket: Ticket, query: String },
    Quit,
}

pub enum WorkerEvent {
    SearchResults {
        ticket: Ticket,
        result: Result<SearchResponse, ClientError>,
    },
    Status {
        status: Option<StatusReport>,
    },
}

/// Source of server status for the header.
pub trait StatusProbe {
    fn probe(&self) -> Option<StatusReport>;
}

impl StatusProbe for SearchClient {
    fn probe(&self) -> Option<StatusReport> {
        self.status().ok()
    }
}

pub fn start_worker<T>(
    session: Arc<SearchSession<T>>,
    cmd_rx: Receiver<WorkerCommand>,
    evt_tx: Sender<WorkerEvent>,
) -> std::thread::JoinHandle<()>
where
    T: SearchTransport + StatusProbe + Send + Sync + 'static,
{
    std::thread::spawn(move || worker_loop(&session, cmd_rx, evt_tx))
}

fn worker_loop<T>(
    session: &SearchSession<T>,
    cmd_rx: Receiver<WorkerCommand>,
    evt_tx: Sender<WorkerEvent>,
) where
    T: SearchTransport + StatusProbe,
{
    let mut last_status_at: Option<Instant> = None;
    let mut pending: Option<(Ticket, String)> = None;

    loop {
        // Receive at least one command, but wake periodically for status.
        match cmd_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(WorkerCommand::Search { ticket, query }) => pending = Some((ticket, query)),
            Ok(WorkerCommand::Quit) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        // Coalesce bursts: only the latest ticket can still be rendered.
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                WorkerCommand::Search { ticket, query } => pending = Some((ticket, query)),
                WorkerCommand::Quit => return,
            }
        }

        // The user's search goes first; a slow status call must not delay it.
        if let Some((ticket, query)) = pending.take() {
            if session.is_current(ticket) {
                let result = session.fetch(&query);
                if evt_tx
                    .send(WorkerEvent::SearchResults { ticket, result })
                    .is_err()
                {
                    break;
                }
            } else {
                tracing::debug!("Skipping superseded search #{}", ticket.value());
            }
        }

        let status_due = match last_status_at {
            Some(at) => at.elapsed() >= STATUS_INTERVAL,
            None => true,
        };
        if status_due {
            let status = session.transport().probe();
            if evt_tx.send(WorkerEvent::Status { status }).is_err() {
                break;
            }
            last_status_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_client::RenderPolicy;
    use quarry_core::protocol::{SearchHit, SearchRequest};
    use std::sync::mpsc;

    struct EchoTransport;

    impl SearchTransport for EchoTransport {
        fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
            if request.query == "fail" {
                return Err(ClientError::Status {
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(SearchResponse {
                results: vec![SearchHit::new(format!("{}.md", request.query), 1.0)],
            })
        }
    }

    impl StatusProbe for EchoTransport {
        fn probe(&self) -> Option<StatusReport> {
            Some(StatusReport {
                documents: 7,
                ..Default::default()
            })
        }
    }

    fn next_results(evt_rx: &Receiver<WorkerEvent>) -> (Ticket, Result<SearchResponse, ClientError>) {
        loop {
            match evt_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                WorkerEvent::SearchResults { ticket, result } => return (ticket, result),
                WorkerEvent::Status { .. } => {}
            }
        }
    }

    #[test]
    fn worker_answers_latest_ticket() {
        let session = Arc::new(SearchSession::new(EchoTransport, RenderPolicy::default()));
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        let handle = start_worker(Arc::clone(&session), cmd_rx, evt_tx);

        let first = session.issue();
        let second = session.issue();
        cmd_tx
            .send(WorkerCommand::Search {
                ticket: first,
                query: "old".into(),
            })
            .unwrap();
        cmd_tx
            .send(WorkerCommand::Search {
                ticket: second,
                query: "new".into(),
            })
            .unwrap();

        let (ticket, result) = next_results(&evt_rx);
        assert_eq!(ticket, second);
        assert_eq!(result.unwrap().results[0].id, "new.md");

        cmd_tx.send(WorkerCommand::Quit).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn worker_forwards_failures() {
        let session = Arc::new(SearchSession::new(EchoTransport, RenderPolicy::default()));
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        let handle = start_worker(Arc::clone(&session), cmd_rx, evt_tx);

        let ticket = session.issue();
        cmd_tx
            .send(WorkerCommand::Search {
                ticket,
                query: "fail".into(),
            })
            .unwrap();

        let (got, result) = next_results(&evt_rx);
        assert_eq!(got, ticket);
        assert!(matches!(result, Err(ClientError::Status { status: 500, .. })));

        drop(cmd_tx);
        handle.join().unwrap();
    }

    /// Records the order in which the worker calls the server.
    #[derive(Default)]
    struct RecordingTransport {
        calls: std::sync::Mutex<Vec<&'static str>>,
    }

    impl SearchTransport for RecordingTransport {
        fn search(&self, _request: &SearchRequest) -> Result<SearchResponse, ClientError> {
            self.calls.lock().unwrap().push("search");
            Ok(SearchResponse::default())
        }
    }

    impl StatusProbe for RecordingTransport {
        fn probe(&self) -> Option<StatusReport> {
            self.calls.lock().unwrap().push("status");
            None
        }
    }

    #[test]
    fn pending_search_runs_before_status_poll() {
        let session = Arc::new(SearchSession::new(
            RecordingTransport::default(),
            RenderPolicy::default(),
        ));
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();

        let ticket = session.issue();
        cmd_tx
            .send(WorkerCommand::Search {
                ticket,
                query: "hashmap".into(),
            })
            .unwrap();
        let handle = start_worker(Arc::clone(&session), cmd_rx, evt_tx);

        match evt_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerEvent::SearchResults { ticket: got, .. } => assert_eq!(got, ticket),
            WorkerEvent::Status { .. } => panic!("status was polled before the search"),
        }

        cmd_tx.send(WorkerCommand::Quit).unwrap();
        handle.join().unwrap();
        assert_eq!(session.transport().calls.lock().unwrap()[..2], ["search", "status"]);
    }

    #[test]
    fn worker_reports_status_when_idle() {
        let session = Arc::new(SearchSession::new(EchoTransport, RenderPolicy::default()));
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        let handle = start_worker(session, cmd_rx, evt_tx);

        match evt_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerEvent::Status { status } => assert_eq!(status.unwrap().documents, 7),
            WorkerEvent::SearchResults { .. } => panic!("no search was submitted"),
        }

        cmd_tx.send(WorkerCommand::Quit).unwrap();
        handle.join().unwrap();
    }
}
