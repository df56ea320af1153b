use std::sync::Mutex;
use std::time::Duration;

use belong::cards::{BoardStore, CardId, CardSpec};
use belong::flows::FlowKind;
use belong::wizard::{
    Advance, CompletionProtocol, Confirmation, FieldKind, FieldPatch, FieldSpec, FormData,
    PrimaryAction, StepBody, StepContent, StepDescriptor, SummaryLine, WizardSession,
    WizardState,
};

fn three_step_session() -> WizardSession {
    WizardSession::new(vec![
        StepDescriptor::new(
            "A",
            StepContent::Fields(vec![FieldSpec::new("name", "Name", FieldKind::Text)]),
        ),
        StepDescriptor::new(
            "B",
            StepContent::Fields(vec![FieldSpec::new("email", "Email", FieldKind::Email)]),
        ),
        StepDescriptor::new(
            "C",
            StepContent::Confirmation(Confirmation {
                intro: "Please review:",
                lines: vec![
                    SummaryLine::field("Name:", "name"),
                    SummaryLine::field("Email:", "email"),
                ],
                closing: "Thanks!",
            }),
        ),
    ])
    .expect("steps present")
}

fn summary(session: &WizardSession) -> Vec<(String, String)> {
    match session.current_step().view(session.form_data()).body {
        StepBody::Confirmation { lines, .. } => lines
            .into_iter()
            .map(|line| (line.label.to_string(), line.value))
            .collect(),
        StepBody::Fields { .. } => panic!("expected confirmation step"),
    }
}

#[tokio::test(start_paused = true)]
async fn three_step_wizard_submits_after_delay_and_resets() {
    let mut session = three_step_session();
    let delivered: Mutex<Vec<FormData>> = Mutex::new(Vec::new());
    let handler = |fields: FormData| delivered.lock().expect("handler mutex").push(fields);

    assert!(session.update_field(FieldPatch::new().set("name", "Jane")));
    assert_eq!(session.advance(), Advance::Moved { step: 1 });
    assert!(session.update_field(FieldPatch::new().set("email", "jane@x.com")));
    assert_eq!(session.advance(), Advance::Moved { step: 2 });
    assert!(session.is_last_step());
    assert_eq!(session.controls().primary, PrimaryAction::Complete);
    assert_eq!(
        summary(&session),
        vec![
            ("Name:".to_string(), "Jane".to_string()),
            ("Email:".to_string(), "jane@x.com".to_string()),
        ]
    );

    let submission = match session.advance() {
        Advance::Submit(submission) => submission,
        other => panic!("expected submission, got {other:?}"),
    };
    assert_eq!(session.state(), WizardState::Submitting);
    assert_eq!(session.controls().primary, PrimaryAction::Submitting);
    assert!(!session.controls().primary_enabled);
    assert!(!session.retreat());

    let started = tokio::time::Instant::now();
    let ticket = CompletionProtocol::default().run(submission, &handler).await;
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert!(session.finish(ticket));

    let delivered = delivered.into_inner().expect("handler mutex");
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].text("name"), "Jane");
    assert_eq!(delivered[0].text("email"), "jane@x.com");
    assert_eq!(delivered[0].len(), 2);

    assert_eq!(session.state(), WizardState::Closed);
    assert_eq!(session.current_step_index(), 0);
    assert!(session.form_data().is_empty());
}

#[test]
fn referral_summary_falls_back_for_unanswered_fields() {
    let mut session = FlowKind::ProfessionalReferral.open().expect("referral opens");
    session.update_field(
        FieldPatch::new()
            .set("caseManagerName", "Dr. Kay")
            .set("organization", "County Health"),
    );
    while !session.is_last_step() {
        session.advance();
    }

    let lines = summary(&session);
    assert!(lines.contains(&("Referrer:".to_string(), "Dr. Kay".to_string())));
    assert!(lines
        .iter()
        .any(|(_, value)| value == "Not provided"));
}

#[test]
fn careers_summary_uses_the_written_in_position() {
    let mut session = FlowKind::JoinOurTeam.open().expect("careers opens");
    session.update_field(FieldPatch::new().set("fullName", "Sam Lee"));
    session.advance();
    session.update_field(
        FieldPatch::new()
            .set("position", "other")
            .set("otherPosition", "Art Therapist"),
    );
    session.advance();

    let lines = summary(&session);
    assert!(lines.contains(&("Position:".to_string(), "Art Therapist".to_string())));
    assert!(lines.contains(&("Name:".to_string(), "Sam Lee".to_string())));
}

#[test]
fn independent_boards_do_not_share_expansion() {
    let store = BoardStore::new();
    let specs = vec![
        CardSpec::new("Where you belong").keyed("mission"),
        CardSpec::new("Daily life").keyed("daily"),
    ];
    let first = store.mount(specs.clone()).expect("first board mounts");
    let second = store.mount(specs).expect("second board mounts");

    let mission = CardId::from("mission");
    let toggled = store
        .toggle(first.view_id, &mission)
        .expect("toggle succeeds");
    assert!(toggled.cards[0].expanded);

    let untouched = store.get(second.view_id).expect("second board present");
    assert!(untouched.cards.iter().all(|card| !card.expanded));
}
