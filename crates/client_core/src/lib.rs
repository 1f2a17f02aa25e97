use std::{path::PathBuf, sync::Arc};

use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use shared::{
    domain::{Assessment, Message, Role},
    protocol::AnalyzeRequest,
};

pub mod adapters;
pub mod backend;
pub mod error;
pub mod reconcile;
pub mod transcript;

use backend::AnalysisBackend;
use error::ExchangeError;
use reconcile::{reconcile, Projections};
use transcript::TranscriptStore;

/// Generic user-visible text for any failed exchange. Transport and
/// malformed-response failures are indistinguishable to the operator; the
/// distinction only shows up in the logs.
pub const NETWORK_ERROR_NOTICE: &str = "NETWORK ERROR: analysis service unreachable";
/// Announced optimistically when a report download is triggered.
pub const EXPORT_NOTICE: &str = "DOWNLOADING CASE EVIDENCE FILE...";

#[derive(Debug, Clone)]
pub enum ClientEvent {
    TranscriptAppended(Message),
    PendingChanged(bool),
    ProjectionsUpdated(Projections),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Exchange finished and the projections were updated.
    Completed,
    /// Exchange failed; one SYSTEM entry was appended, projections untouched.
    Failed,
    /// Empty after trimming; absorbed with no side effects.
    IgnoredEmpty,
    /// A request was already in flight. Reject-and-warn policy: no queue,
    /// no transcript mutation, no second request.
    Busy,
}

struct SessionInner {
    transcript: TranscriptStore,
    pending_request: bool,
    projections: Projections,
    last_assessment: Option<Assessment>,
}

/// Request coordinator for the single operator session. Owns all mutable
/// session state; presentation code observes it through the event channel
/// and the snapshot accessors only.
pub struct SessionClient {
    backend: Arc<dyn AnalysisBackend>,
    session_id: String,
    inner: Mutex<SessionInner>,
    events: broadcast::Sender<ClientEvent>,
}

impl SessionClient {
    pub fn new(backend: Arc<dyn AnalysisBackend>, session_id: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            backend,
            session_id: session_id.into(),
            inner: Mutex::new(SessionInner {
                transcript: TranscriptStore::new(),
                pending_request: false,
                projections: Projections::default(),
                last_assessment: None,
            }),
            events,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn transcript(&self) -> Vec<Message> {
        self.inner.lock().await.transcript.all().to_vec()
    }

    pub async fn projections(&self) -> Projections {
        self.inner.lock().await.projections.clone()
    }

    pub async fn is_pending(&self) -> bool {
        self.inner.lock().await.pending_request
    }

    /// The most recent successfully reconciled assessment, if any.
    pub async fn last_assessment(&self) -> Option<Assessment> {
        self.inner.lock().await.last_assessment.clone()
    }

    /// Submits one operator message and runs the full exchange. At most one
    /// request is outstanding at a time; the pending flag is the explicit
    /// guard, independent of anything the front end does. Every failure is
    /// absorbed here and surfaced through the transcript and event channel.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::IgnoredEmpty;
        }

        let outbound = {
            let mut guard = self.inner.lock().await;
            if guard.pending_request {
                warn!(
                    session_id = %self.session_id,
                    "submission rejected: a request is already in flight"
                );
                return SubmitOutcome::Busy;
            }
            guard.pending_request = true;
            guard.transcript.append(Role::Operator, text)
        };
        self.emit(ClientEvent::TranscriptAppended(outbound));
        self.emit(ClientEvent::PendingChanged(true));

        let request = AnalyzeRequest {
            session_id: self.session_id.clone(),
            message: text.to_string(),
        };

        // The state lock is not held across this await; UI events keep
        // flowing while the exchange is in flight.
        match self.backend.analyze(&request).await {
            Ok(assessment) => {
                self.apply_success(assessment).await;
                SubmitOutcome::Completed
            }
            Err(err) => {
                self.apply_failure(err).await;
                SubmitOutcome::Failed
            }
        }
    }

    async fn apply_success(&self, assessment: Assessment) {
        let (reply, projections) = {
            let mut guard = self.inner.lock().await;
            guard.pending_request = false;
            let reply = guard
                .transcript
                .append(Role::Counterpart, assessment.reply.clone());
            let next = reconcile(&guard.projections, &assessment);
            guard.projections = next.clone();
            guard.last_assessment = Some(assessment);
            (reply, next)
        };
        self.emit(ClientEvent::PendingChanged(false));
        self.emit(ClientEvent::TranscriptAppended(reply));
        self.emit(ClientEvent::ProjectionsUpdated(projections));
    }

    async fn apply_failure(&self, err: ExchangeError) {
        match &err {
            ExchangeError::Malformed(detail) => warn!(
                session_id = %self.session_id,
                "malformed analysis response: {detail}"
            ),
            other => warn!(session_id = %self.session_id, "exchange failed: {other}"),
        }
        let notice = {
            let mut guard = self.inner.lock().await;
            guard.pending_request = false;
            guard.transcript.append(Role::System, NETWORK_ERROR_NOTICE)
        };
        self.emit(ClientEvent::PendingChanged(false));
        self.emit(ClientEvent::TranscriptAppended(notice));
        self.emit(ClientEvent::Error(err.to_string()));
    }

    /// Triggers the evidence-report download. The SYSTEM entry is appended
    /// optimistically; the fetch runs in the background and its outcome is
    /// only logged and evented, never fed back into session state.
    pub async fn export_report(self: &Arc<Self>, destination: PathBuf) {
        let notice = {
            let mut guard = self.inner.lock().await;
            guard.transcript.append(Role::System, EXPORT_NOTICE)
        };
        self.emit(ClientEvent::TranscriptAppended(notice));

        let client = Arc::clone(self);
        tokio::spawn(async move {
            match client.backend.fetch_report().await {
                Ok(bytes) => {
                    if let Err(err) = tokio::fs::write(&destination, &bytes).await {
                        warn!(
                            session_id = %client.session_id,
                            path = %destination.display(),
                            "failed to write report: {err}"
                        );
                        client.emit(ClientEvent::Error(format!("report download failed: {err}")));
                    } else {
                        info!(
                            session_id = %client.session_id,
                            path = %destination.display(),
                            bytes = bytes.len(),
                            "report downloaded"
                        );
                    }
                }
                Err(err) => {
                    warn!(session_id = %client.session_id, "report download failed: {err}");
                    client.emit(ClientEvent::Error(format!("report download failed: {err}")));
                }
            }
        });
    }

    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
