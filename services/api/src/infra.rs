use belong::intake::{
    IntakeService, RepositoryError, SessionId, SessionRecord, SessionRepository, SinkError,
    SubmissionReceipt, SubmissionSink,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionRepository {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn modify(
        &self,
        id: &SessionId,
        edit: &mut dyn FnMut(&mut SessionRecord),
    ) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.guard()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        edit(record);
        Ok(record.clone())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.guard()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn retain(
        &self,
        keep: &mut dyn FnMut(&SessionRecord) -> bool,
    ) -> Result<usize, RepositoryError> {
        let mut guard = self.guard()?;
        let before = guard.len();
        guard.retain(|_, record| keep(record));
        Ok(before - guard.len())
    }
}

/// Number of delivered inquiries the log holds before dropping the oldest.
pub(crate) const SUBMISSION_LOG_CAPACITY: usize = 256;

/// Logs each delivered inquiry and keeps the most recent ones in memory.
#[derive(Clone)]
pub(crate) struct InMemorySubmissionLog {
    receipts: Arc<Mutex<VecDeque<SubmissionReceipt>>>,
    capacity: usize,
}

impl Default for InMemorySubmissionLog {
    fn default() -> Self {
        Self::with_capacity(SUBMISSION_LOG_CAPACITY)
    }
}

impl SubmissionSink for InMemorySubmissionLog {
    fn record(&self, receipt: SubmissionReceipt) -> Result<(), SinkError> {
        info!(
            session_id = %receipt.session_id,
            flow = %receipt.flow,
            fields = receipt.fields.len(),
            "inquiry received"
        );
        let mut receipts = self
            .receipts
            .lock()
            .map_err(|_| SinkError::Transport("submission log poisoned".to_string()))?;
        if self.capacity == 0 {
            return Ok(());
        }
        while receipts.len() >= self.capacity {
            if let Some(dropped) = receipts.pop_front() {
                debug!(session_id = %dropped.session_id, "oldest inquiry dropped from log");
            }
        }
        receipts.push_back(receipt);
        Ok(())
    }
}

impl InMemorySubmissionLog {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            receipts: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(64)))),
            capacity,
        }
    }

    /// Retained inquiries, oldest first.
    pub(crate) fn receipts(&self) -> Vec<SubmissionReceipt> {
        self.receipts
            .lock()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Periodically removes sessions that have been closed for longer than `ttl`.
pub(crate) fn spawn_session_sweeper<R, S>(
    service: Arc<IntakeService<R, S>>,
    ttl: Duration,
) -> JoinHandle<()>
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    let period = ttl.clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(error) = service.sweep_closed(ttl) {
                warn!(%error, "closed session sweep failed");
            }
        }
    })
}
