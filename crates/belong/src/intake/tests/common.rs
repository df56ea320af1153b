use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::intake::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository, SinkError, SubmissionReceipt,
    SubmissionSink,
};
use crate::intake::service::IntakeService;
use crate::wizard::{CompletionProtocol, FieldPatch};

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<SessionId, SessionRecord>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify(
        &self,
        id: &SessionId,
        edit: &mut dyn FnMut(&mut SessionRecord),
    ) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        edit(record);
        Ok(record.clone())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn retain(
        &self,
        keep: &mut dyn FnMut(&SessionRecord) -> bool,
    ) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| keep(record));
        Ok(before - guard.len())
    }
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    receipts: Mutex<Vec<SubmissionReceipt>>,
    fail: bool,
}

impl MemorySink {
    pub(super) fn failing() -> Self {
        Self {
            receipts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(super) fn receipts(&self) -> Vec<SubmissionReceipt> {
        self.receipts.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for MemorySink {
    fn record(&self, receipt: SubmissionReceipt) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Transport("mailbox offline".to_string()));
        }
        self.receipts
            .lock()
            .expect("sink mutex poisoned")
            .push(receipt);
        Ok(())
    }
}

pub(super) type TestService = IntakeService<MemoryRepository, MemorySink>;

pub(super) fn service_with(
    sink: MemorySink,
    protocol: CompletionProtocol,
) -> (Arc<TestService>, Arc<MemoryRepository>, Arc<MemorySink>) {
    let repository = Arc::new(MemoryRepository::default());
    let sink = Arc::new(sink);
    let service = Arc::new(IntakeService::new(
        repository.clone(),
        sink.clone(),
        protocol,
    ));
    (service, repository, sink)
}

pub(super) fn immediate_service() -> (Arc<TestService>, Arc<MemorySink>) {
    let (service, _, sink) = service_with(MemorySink::default(), CompletionProtocol::immediate());
    (service, sink)
}

pub(super) fn visitor_details() -> FieldPatch {
    FieldPatch::new()
        .set("visitorName", "Jane Doe")
        .set("relationship", "child")
        .set("email", "jane@example.com")
        .set("groupSize", "2")
}

pub(super) fn visit_preferences() -> FieldPatch {
    FieldPatch::new()
        .set("preferredDate", "2026-11-02")
        .set("timePreference", "morning")
        .set("flexibleTiming", "on")
}
