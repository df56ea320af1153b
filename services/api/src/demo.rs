use crate::infra::{InMemorySessionRepository, InMemorySubmissionLog};
use belong::error::AppError;
use belong::flows::{
    send_message, ContactError, ContactForm, ContactTimings, FlowKind, CONTACT_DETAILS,
};
use belong::intake::{AdvanceEvent, IntakeService, SessionRepository, SubmissionSink};
use belong::wizard::{CompletionProtocol, FieldPatch, FormData, StepBody, DEFAULT_SUBMIT_DELAY};
use clap::Args;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Wizard to walk through (family-visit, professional-referral, join-our-team).
    /// Walks all of them when omitted.
    #[arg(long)]
    pub(crate) flow: Option<FlowKind>,
    /// Override the simulated submission delay in milliseconds.
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,
}

pub(crate) fn list_flows() {
    println!("Belong inquiry wizards");
    for flow in FlowKind::ALL {
        let launcher = flow.launcher();
        println!("\n{} ({})", flow.title(), flow.slug());
        println!("  {}", launcher.description);
        for (index, step) in flow.steps().iter().enumerate() {
            println!("  {}. {}", index + 1, step.title);
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SUBMIT_DELAY);
    let log = Arc::new(InMemorySubmissionLog::default());
    let service = IntakeService::new(
        Arc::new(InMemorySessionRepository::default()),
        log.clone(),
        CompletionProtocol::new(delay),
    );

    let flows = match args.flow {
        Some(flow) => vec![flow],
        None => FlowKind::ALL.to_vec(),
    };

    println!(
        "Belong inquiry wizard demo (submission delay {} ms)",
        delay.as_millis()
    );
    for flow in &flows {
        walk_flow(&service, *flow).await?;
    }
    if args.flow.is_none() {
        let timings = ContactTimings {
            sending: delay,
            thank_you: delay * 3,
        };
        walk_contact_form(timings).await?;
    }

    let receipts = log.receipts();
    println!("\nDelivered inquiries: {}", receipts.len());
    for receipt in receipts {
        println!(
            "  {} | {} | session {} | {} answers",
            receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
            receipt.flow.title(),
            receipt.session_id,
            receipt.fields.len()
        );
    }
    Ok(())
}

async fn walk_flow<R, S>(service: &IntakeService<R, S>, flow: FlowKind) -> Result<(), AppError>
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    println!("\n{}", flow.title());
    let id = service.open(flow)?.id;
    let answers = sample_answers(flow);

    loop {
        let record = service.get(&id)?;
        let step = record.session.current_step().clone();
        println!("  [{}] {}", record.session.progress().label, step.title);

        let patch: FieldPatch = answers
            .iter()
            .copied()
            .filter(|(name, _)| step.owns(name))
            .collect();
        let record = if patch.is_empty() {
            record
        } else {
            service.update(&id, patch)?
        };

        let form = record.session.form_data();
        for issue in step.validate(form) {
            println!("    note: {issue}");
        }
        if let StepBody::Confirmation { intro, lines, closing } = step.view(form).body {
            println!("    {intro}");
            for line in lines {
                println!("    {} {}", line.label, line.value);
            }
            println!("    {closing}");
        }

        let outcome = service.advance(&id).await?;
        match outcome.event {
            AdvanceEvent::Moved { .. } => continue,
            AdvanceEvent::Completed => {
                println!("  Submitted; wizard closed and cleared");
                break;
            }
            AdvanceEvent::Rejected { reason } => {
                println!("  Advance rejected: {reason:?}");
                break;
            }
        }
    }

    service.close(&id)?;
    Ok(())
}

async fn walk_contact_form(timings: ContactTimings) -> Result<(), AppError> {
    println!(
        "\n{} ({} | {})",
        CONTACT_DETAILS.title, CONTACT_DETAILS.phone, CONTACT_DETAILS.email
    );
    let form = Mutex::new(ContactForm::new());
    form.lock()
        .map_err(|_| ContactError::Unavailable)?
        .update(
            FieldPatch::new()
                .set("name", "Jane Doe")
                .set("email", "jane@example.com")
                .set("message", "Could we talk about openings this spring?"),
        )?;
    let handler = |fields: FormData| {
        println!(
            "  Message from {} <{}>: {}",
            fields.text("name"),
            fields.text("email"),
            fields.text("message")
        )
    };
    send_message(&form, timings, &handler).await?;
    println!("  Thank-you shown; contact form cleared");
    Ok(())
}

fn sample_answers(flow: FlowKind) -> Vec<(&'static str, &'static str)> {
    match flow {
        FlowKind::FamilyVisit => vec![
            ("visitorName", "Jane Doe"),
            ("relationship", "child"),
            ("email", "jane@example.com"),
            ("phone", "(555) 010-2030"),
            ("groupSize", "2"),
            ("preferredDate", "2026-11-02"),
            ("timePreference", "morning"),
            ("flexibleTiming", "on"),
            ("interests", "Common areas and meal plans"),
        ],
        FlowKind::ProfessionalReferral => vec![
            ("caseManagerName", "Dr. Kay Morgan"),
            ("organization", "County Behavioral Health"),
            ("email", "kmorgan@example.org"),
            ("role", "case_manager"),
            ("residentName", "Robert Hill"),
            ("residentAge", "72"),
            ("currentLocation", "hospital"),
            ("careNeeds", "medication_management"),
            ("timeframe", "soon"),
        ],
        FlowKind::JoinOurTeam => vec![
            ("fullName", "Sam Lee"),
            ("email", "sam.lee@example.com"),
            ("position", "other"),
            ("otherPosition", "Art Therapist"),
            ("experience", "Six years leading group art sessions"),
            ("partTime", "on"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_answers_belong_to_some_step() {
        for flow in FlowKind::ALL {
            let steps = flow.steps();
            for (name, _) in sample_answers(flow) {
                assert!(
                    steps.iter().any(|step| step.owns(name)),
                    "{name} is not a field of {flow}"
                );
            }
        }
    }

    #[tokio::test]
    async fn demo_delivers_one_inquiry_per_flow() {
        let log = Arc::new(InMemorySubmissionLog::default());
        let service = IntakeService::new(
            Arc::new(InMemorySessionRepository::default()),
            log.clone(),
            CompletionProtocol::immediate(),
        );

        for flow in FlowKind::ALL {
            walk_flow(&service, flow).await.expect("flow completes");
        }

        let receipts = log.receipts();
        assert_eq!(receipts.len(), 3);
        assert_eq!(receipts[2].fields.text("otherPosition"), "Art Therapist");
    }

    #[tokio::test]
    async fn demo_contact_form_sends_and_clears() {
        walk_contact_form(ContactTimings::immediate())
            .await
            .expect("contact message sent");
    }
}
