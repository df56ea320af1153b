use std::time::Duration;

use super::common::*;
use crate::flows::FlowKind;
use crate::intake::repository::{RepositoryError, SessionRepository};
use crate::intake::service::{AdvanceEvent, IntakeError};
use crate::wizard::{
    CompletionProtocol, FieldPatch, FieldValue, Rejected, StepInputError, WizardState,
};

#[tokio::test]
async fn family_visit_completes_once_with_all_answers() {
    let (service, sink) = immediate_service();
    let record = service.open(FlowKind::FamilyVisit).expect("session opens");
    let id = record.id;

    service.update(&id, visitor_details()).expect("step one answers");
    let moved = service.advance(&id).await.expect("advance");
    assert_eq!(moved.event, AdvanceEvent::Moved { step: 1 });

    service
        .update(&id, visit_preferences())
        .expect("step two answers");
    service.advance(&id).await.expect("advance to confirmation");

    let completed = service.advance(&id).await.expect("submit");
    assert_eq!(completed.event, AdvanceEvent::Completed);
    assert_eq!(completed.record.session.state(), WizardState::Closed);
    assert!(completed.record.session.form_data().is_empty());

    let receipts = sink.receipts();
    assert_eq!(receipts.len(), 1);
    let receipt = &receipts[0];
    assert_eq!(receipt.session_id, id);
    assert_eq!(receipt.flow, FlowKind::FamilyVisit);
    assert_eq!(receipt.fields.text("visitorName"), "Jane Doe");
    assert_eq!(receipt.fields.text("timePreference"), "morning");
    assert_eq!(
        receipt.fields.get("flexibleTiming"),
        Some(&FieldValue::Flag(true))
    );
}

#[tokio::test]
async fn update_rejects_fields_from_other_steps() {
    let (service, _) = immediate_service();
    let id = service.open(FlowKind::FamilyVisit).expect("opens").id;

    let result = service.update(&id, FieldPatch::new().set("preferredDate", "2026-11-02"));
    match result {
        Err(IntakeError::Step(StepInputError::ForeignField { field, .. })) => {
            assert_eq!(field, "preferredDate")
        }
        other => panic!("expected foreign field error, got {other:?}"),
    }
    assert!(service
        .get(&id)
        .expect("session present")
        .session
        .form_data()
        .is_empty());
}

#[tokio::test]
async fn earlier_answers_survive_navigation() {
    let (service, _) = immediate_service();
    let id = service.open(FlowKind::JoinOurTeam).expect("opens").id;

    service
        .update(&id, FieldPatch::new().set("fullName", "Sam Lee"))
        .expect("name accepted");
    service.advance(&id).await.expect("advance");
    service
        .update(&id, FieldPatch::new().set("position", "other"))
        .expect("position accepted");
    let back = service.retreat(&id).expect("retreat");

    assert_eq!(back.session.current_step_index(), 0);
    assert_eq!(back.session.form_data().text("fullName"), "Sam Lee");
    assert_eq!(back.session.form_data().text("position"), "other");
}

#[tokio::test]
async fn cancel_discards_answers_without_delivery() {
    let (service, sink) = immediate_service();
    let id = service.open(FlowKind::ProfessionalReferral).expect("opens").id;
    service
        .update(&id, FieldPatch::new().set("caseManagerName", "Dr. Kay"))
        .expect("accepted");

    let cancelled = service.cancel(&id).expect("cancel");
    assert_eq!(cancelled.session.state(), WizardState::Closed);
    assert!(sink.receipts().is_empty());

    match service.update(&id, FieldPatch::new().set("caseManagerName", "x")) {
        Err(IntakeError::Inactive("closed")) => {}
        other => panic!("expected inactive error, got {other:?}"),
    }

    let reopened = service.reopen(&id).expect("reopen");
    assert_eq!(
        reopened.session.state(),
        WizardState::Active { step: 0 }
    );
    assert!(reopened.session.form_data().is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_advance_during_submission_is_ignored() {
    let (service, _, sink) = service_with(
        MemorySink::default(),
        CompletionProtocol::new(Duration::from_millis(1000)),
    );
    let id = service.open(FlowKind::JoinOurTeam).expect("opens").id;
    service.advance(&id).await.expect("to preferences");
    service.advance(&id).await.expect("to confirmation");

    let in_flight = {
        let service = service.clone();
        tokio::spawn(async move { service.advance(&id).await })
    };
    tokio::task::yield_now().await;

    let submitting = service.get(&id).expect("session present");
    assert!(submitting.session.is_submitting());

    let repeat = service.advance(&id).await.expect("repeat advance");
    assert_eq!(
        repeat.event,
        AdvanceEvent::Rejected {
            reason: Rejected::DoubleSubmit
        }
    );

    let completed = in_flight
        .await
        .expect("task joins")
        .expect("submission completes");
    assert_eq!(completed.event, AdvanceEvent::Completed);
    assert_eq!(sink.receipts().len(), 1);
}

#[tokio::test]
async fn sink_failures_still_reset_the_session() {
    let (service, _, sink) = service_with(MemorySink::failing(), CompletionProtocol::immediate());
    let id = service.open(FlowKind::JoinOurTeam).expect("opens").id;
    for _ in 0..2 {
        service.advance(&id).await.expect("advance");
    }

    let completed = service.advance(&id).await.expect("submit");
    assert_eq!(completed.event, AdvanceEvent::Completed);
    assert!(!completed.record.session.is_open());
    assert!(sink.receipts().is_empty());
}

#[tokio::test]
async fn closed_sessions_are_removed() {
    let (service, repository, _) =
        service_with(MemorySink::default(), CompletionProtocol::immediate());
    let id = service.open(FlowKind::FamilyVisit).expect("opens").id;

    service.close(&id).expect("close");
    assert!(repository.fetch(&id).expect("fetch").is_none());
    match service.advance(&id).await {
        Err(IntakeError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn sweep_drops_only_sessions_that_have_closed() {
    let (service, repository, _) =
        service_with(MemorySink::default(), CompletionProtocol::immediate());
    let active = service.open(FlowKind::FamilyVisit).expect("opens").id;
    let cancelled = service.open(FlowKind::ProfessionalReferral).expect("opens").id;
    let completed = service.open(FlowKind::JoinOurTeam).expect("opens").id;

    let record = service.cancel(&cancelled).expect("cancel");
    assert!(record.closed_at.is_some());
    for _ in 0..3 {
        service.advance(&completed).await.expect("advance");
    }

    assert_eq!(
        service
            .sweep_closed(Duration::from_secs(3600))
            .expect("sweep"),
        0
    );
    assert_eq!(repository.len(), 3);

    assert_eq!(service.sweep_closed(Duration::ZERO).expect("sweep"), 2);
    assert_eq!(repository.len(), 1);
    assert!(repository.fetch(&active).expect("fetch").is_some());
    assert!(repository.fetch(&cancelled).expect("fetch").is_none());
}

#[tokio::test]
async fn reopened_sessions_survive_the_sweep() {
    let (service, repository, _) =
        service_with(MemorySink::default(), CompletionProtocol::immediate());
    let id = service.open(FlowKind::FamilyVisit).expect("opens").id;
    service.cancel(&id).expect("cancel");

    let record = service.reopen(&id).expect("reopen");
    assert_eq!(record.closed_at, None);
    assert_eq!(service.sweep_closed(Duration::ZERO).expect("sweep"), 0);
    assert!(repository.fetch(&id).expect("fetch").is_some());
}
