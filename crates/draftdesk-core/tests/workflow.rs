//! End-to-end reply workflow behaviour against a fake backend.

mod common;

use common::{Call, FakeService, other_email, scenario_email};
use draftdesk_core::{
    Applied, DeleteRequest, DisplayStatus, NoticeLevel, Phase, ReplyRequest, ReplyWorkflow,
    TriageSession,
};

const DRAFT: &str = "Sure, let's meet.";

fn session_with_inbox() -> TriageSession {
    let mut session = TriageSession::new();
    session.set_emails(vec![scenario_email(), other_email()]);
    session
}

/// Scenario A: a successful draft request.
#[tokio::test]
async fn draft_success_seeds_both_texts() {
    let service = FakeService::drafting(DRAFT);
    let mut workflow = ReplyWorkflow::new(scenario_email());

    workflow.request_draft(&service).await.unwrap();

    assert_eq!(workflow.phase(), Phase::Ready);
    assert_eq!(DisplayStatus::from_phase(workflow.phase()).label(), "DRAFT READY");
    assert_eq!(workflow.draft().suggested_text(), Some(DRAFT));
    assert_eq!(workflow.draft().edited_text(), DRAFT);
}

/// Scenario B: edit then send.
#[tokio::test]
async fn edited_draft_is_sent_as_reply() {
    let service = FakeService::drafting(DRAFT);
    let mut workflow = ReplyWorkflow::new(scenario_email());
    workflow.request_draft(&service).await.unwrap();

    assert!(workflow.update_draft_text("Sure, let's meet at 3pm."));
    assert_eq!(workflow.draft().suggested_text(), Some(DRAFT));
    workflow.send_draft(&service).await.unwrap();

    assert_eq!(workflow.phase(), Phase::Sent);
    assert_eq!(DisplayStatus::from_phase(workflow.phase()).label(), "SENT");
    assert_eq!(
        service.calls().last(),
        Some(&Call::Send(ReplyRequest {
            to: "a@x.com".to_string(),
            subject: "Re: Hi".to_string(),
            body: "Sure, let's meet at 3pm.".to_string(),
        }))
    );
}

/// Scenario C: a failed send keeps the draft.
#[tokio::test]
async fn failed_send_keeps_draft() {
    let mut service = FakeService::drafting(DRAFT);
    service.send_ok = false;
    let mut workflow = ReplyWorkflow::new(scenario_email());
    workflow.request_draft(&service).await.unwrap();

    let err = workflow.send_draft(&service).await.unwrap_err();

    assert!(err.to_string().contains("backend unavailable"));
    assert_eq!(workflow.phase(), Phase::Ready);
    assert_eq!(workflow.draft().edited_text(), DRAFT);
    assert!(workflow.draft().last_error().is_some());

    // The user can retry once the backend recovers.
    service.send_ok = true;
    workflow.send_draft(&service).await.unwrap();
    assert_eq!(workflow.phase(), Phase::Sent);
    assert_eq!(service.send_calls(), 2);
}

/// Scenario D: archive after sending.
#[tokio::test]
async fn archive_after_send() {
    let service = FakeService::drafting(DRAFT);
    let mut workflow = ReplyWorkflow::new(scenario_email());
    workflow.request_draft(&service).await.unwrap();
    workflow.send_draft(&service).await.unwrap();

    workflow.delete_or_archive(&service).await.unwrap();

    assert_eq!(workflow.phase(), Phase::Deleted);
    assert_eq!(
        service.calls().last(),
        Some(&Call::Delete(DeleteRequest {
            message_id: "m1".to_string(),
        }))
    );
}

#[tokio::test]
async fn failed_generation_can_be_retried() {
    let mut service = FakeService::failing();
    let mut workflow = ReplyWorkflow::new(scenario_email());

    assert!(workflow.request_draft(&service).await.is_err());
    assert_eq!(workflow.phase(), Phase::Failed);
    assert_eq!(workflow.draft().suggested_text(), None);
    assert_eq!(workflow.draft().edited_text(), "");

    service.draft = Some(DRAFT.to_string());
    workflow.request_draft(&service).await.unwrap();
    assert_eq!(workflow.phase(), Phase::Ready);
    assert_eq!(service.generate_calls(), 2);
}

#[tokio::test]
async fn triggers_outside_their_phase_issue_nothing() {
    let service = FakeService::drafting(DRAFT);
    let mut workflow = ReplyWorkflow::new(scenario_email());

    workflow.send_draft(&service).await.unwrap();
    workflow.delete_or_archive(&service).await.unwrap();
    assert_eq!(workflow.phase(), Phase::Idle);

    workflow.request_draft(&service).await.unwrap();
    workflow.request_draft(&service).await.unwrap();
    assert_eq!(workflow.phase(), Phase::Ready);

    assert_eq!(service.calls().len(), 1);
}

#[tokio::test]
async fn draft_trigger_while_generating_is_ignored() {
    let service = FakeService::drafting(DRAFT);
    let mut session = session_with_inbox();
    session.select(&scenario_email().id);

    let pending = session.request_draft().unwrap();
    assert!(session.request_draft().is_none());
    assert!(session.request_draft().is_none());
    assert_eq!(session.status(&scenario_email().id), DisplayStatus::New);

    let completion = pending.run(&service).await;
    assert_eq!(session.apply(completion).unwrap(), Applied::DraftReady);
    assert_eq!(service.generate_calls(), 1);
}

#[tokio::test]
async fn send_trigger_while_sending_is_ignored() {
    let service = FakeService::drafting(DRAFT);
    let mut session = session_with_inbox();
    session.select(&scenario_email().id);
    let completion = session.request_draft().unwrap().run(&service).await;
    session.apply(completion).unwrap();

    let pending = session.send_draft().unwrap();
    assert!(session.send_draft().is_none());
    assert!(session.delete_or_archive().is_none());

    let completion = pending.run(&service).await;
    assert_eq!(session.apply(completion).unwrap(), Applied::Sent);
    assert_eq!(service.send_calls(), 1);

    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Sent!");
}

#[tokio::test]
async fn late_draft_does_not_touch_new_selection() {
    let service = FakeService::drafting(DRAFT);
    let mut session = session_with_inbox();
    session.select(&scenario_email().id);

    let in_flight = session.request_draft().unwrap().run(&service);
    session.select(&other_email().id);
    let completion = in_flight.await;

    assert_eq!(session.apply(completion).unwrap(), Applied::Stale);
    let workflow = session.workflow().unwrap();
    assert_eq!(workflow.email(), &other_email());
    assert_eq!(workflow.phase(), Phase::Idle);
    assert_eq!(workflow.draft().suggested_text(), None);
    assert_eq!(workflow.draft().edited_text(), "");
}

#[tokio::test]
async fn late_draft_does_not_touch_reselected_email() {
    let service = FakeService::drafting(DRAFT);
    let mut session = session_with_inbox();
    session.select(&scenario_email().id);

    let in_flight = session.request_draft().unwrap().run(&service);
    session.select(&scenario_email().id);
    let completion = in_flight.await;

    assert_eq!(session.apply(completion).unwrap(), Applied::Stale);
    assert_eq!(session.workflow().unwrap().phase(), Phase::Idle);
}

#[tokio::test]
async fn late_failed_send_is_reported_without_touching_new_selection() {
    let mut service = FakeService::drafting(DRAFT);
    service.send_ok = false;
    let mut session = session_with_inbox();
    session.select(&scenario_email().id);
    let completion = session.request_draft().unwrap().run(&service).await;
    session.apply(completion).unwrap();

    let in_flight = session.send_draft().unwrap().run(&service);
    session.select(&other_email().id);
    let completion = in_flight.await;

    assert_eq!(session.apply(completion).unwrap(), Applied::Stale);
    let workflow = session.workflow().unwrap();
    assert_eq!(workflow.email(), &other_email());
    assert_eq!(workflow.phase(), Phase::Idle);
    assert_eq!(workflow.draft().last_error(), None);
    assert_eq!(service.send_calls(), 1);

    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.starts_with("Send failed"));
    assert!(notices[0].message.ends_with("(Hi)"));
}

#[tokio::test]
async fn late_archive_is_reported_after_reselecting() {
    let service = FakeService::drafting(DRAFT);
    let mut session = session_with_inbox();
    let id = scenario_email().id;
    session.select(&id);
    let completion = session.request_draft().unwrap().run(&service).await;
    session.apply(completion).unwrap();

    let in_flight = session.delete_or_archive().unwrap().run(&service);
    session.select(&id);
    let completion = in_flight.await;

    assert_eq!(session.apply(completion).unwrap(), Applied::Stale);
    assert_eq!(session.workflow().unwrap().phase(), Phase::Idle);
    assert_eq!(session.status(&id), DisplayStatus::New);

    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Archived (Hi)");
}

#[tokio::test]
async fn failed_archive_reverts_and_notifies() {
    let mut service = FakeService::drafting(DRAFT);
    service.delete_ok = false;
    let mut session = session_with_inbox();
    session.select(&scenario_email().id);
    let completion = session.request_draft().unwrap().run(&service).await;
    session.apply(completion).unwrap();
    session.update_draft_text("keep me");

    let completion = session.delete_or_archive().unwrap().run(&service).await;
    assert!(session.apply(completion).is_err());

    let workflow = session.workflow().unwrap();
    assert_eq!(workflow.phase(), Phase::Ready);
    assert_eq!(workflow.draft().edited_text(), "keep me");
    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.starts_with("Archive failed"));
}

#[tokio::test]
async fn archive_success_shows_archived_badge() {
    let service = FakeService::drafting(DRAFT);
    let mut session = session_with_inbox();
    let id = scenario_email().id;
    session.select(&id);
    let completion = session.request_draft().unwrap().run(&service).await;
    session.apply(completion).unwrap();

    let completion = session.delete_or_archive().unwrap().run(&service).await;
    assert_eq!(session.apply(completion).unwrap(), Applied::Archived);
    assert_eq!(session.status(&id), DisplayStatus::Archived);
    assert_eq!(session.drain_notices()[0].message, "Archived");
}

/// The direct async operations drive a workflow without a session.
#[test]
fn workflow_operations_run_to_completion() {
    let service = FakeService::drafting(DRAFT);
    let mut workflow = ReplyWorkflow::new(scenario_email());

    tokio_test::block_on(async {
        workflow.request_draft(&service).await.unwrap();
        assert!(workflow.update_draft_text("Sure, 3pm."));
        workflow.send_draft(&service).await.unwrap();
        workflow.delete_or_archive(&service).await.unwrap();
    });

    assert_eq!(workflow.phase(), Phase::Deleted);
    assert_eq!(workflow.draft().suggested_text(), Some(DRAFT));
    assert_eq!(
        service.calls()[1],
        Call::Send(ReplyRequest {
            to: "a@x.com".into(),
            subject: "Re: Hi".into(),
            body: "Sure, 3pm.".into(),
        })
    );
    assert_eq!(
        service.calls()[2],
        Call::Delete(DeleteRequest {
            message_id: "m1".into(),
        })
    );
}
