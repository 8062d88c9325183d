//! Submission workflow tests
//!
//! Timing runs on a paused tokio clock; `settle` lets the scheduled run
//! catch up with the clock after it is advanced.

use hub_model::{AdminIdentity, SelectedFile};
use hub_test_utils::{pdf_file, settle, FailingTransport, RecordingNotifier};
use hub_workflow::{
    AdminGate, CompletionNotification, RunOutcome, SubmissionError, SubmissionStatus,
    SubmissionWorkflow, UploadEntryPoint, ValidationError, WorkflowConfig, WorkflowError,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::advance;

const T_UPLOAD: Duration = Duration::from_millis(2000);
const T_DISPLAY: Duration = Duration::from_millis(1500);

fn ready_workflow(notifier: &Arc<RecordingNotifier>) -> SubmissionWorkflow {
    let workflow = SubmissionWorkflow::new("Trend Report", WorkflowConfig::default())
        .with_notifier(notifier.clone());
    workflow.set_title("  Q3 Outlook ");
    workflow.select_file(pdf_file("q3.pdf")).unwrap();
    assert_eq!(workflow.status(), SubmissionStatus::Ready);
    workflow
}

#[tokio::test(start_paused = true)]
async fn phases_follow_configured_timings() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier);

    let _run = workflow.submit().unwrap();
    assert_eq!(workflow.status(), SubmissionStatus::Submitting);
    settle().await;

    advance(T_UPLOAD - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Submitting);

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Success);
    assert_eq!(notifier.count(), 0);

    advance(T_DISPLAY - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Success);

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Empty);
    assert_eq!(
        notifier.received(),
        vec![CompletionNotification::new("Trend Report", "Q3 Outlook")]
    );
    assert_eq!(workflow.title(), "");
    assert!(workflow.selected_file().is_none());

    advance(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(notifier.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn phases_are_timed_from_submit_not_first_poll() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier);

    let _run = workflow.submit().unwrap();
    advance(T_UPLOAD).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Success);
    assert_eq!(notifier.count(), 0);

    advance(T_DISPLAY).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Empty);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn late_first_poll_does_not_stretch_upload_phase() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier);

    let _run = workflow.submit().unwrap();
    advance(T_UPLOAD - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Submitting);

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Success);

    advance(T_DISPLAY - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Success);

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Empty);
}

#[tokio::test(start_paused = true)]
async fn custom_timings_are_honoured() {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = WorkflowConfig::new()
        .with_upload_delay(Duration::from_millis(50))
        .with_display_delay(Duration::from_millis(20));
    let workflow = SubmissionWorkflow::new("Research Case", config).with_notifier(notifier.clone());
    workflow.set_title("Catalyst screening");
    workflow.select_file(pdf_file("screen.pdf")).unwrap();

    let _run = workflow.submit().unwrap();
    settle().await;
    advance(Duration::from_millis(50)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Success);
    advance(Duration::from_millis(20)).await;
    settle().await;
    assert_eq!(workflow.status(), SubmissionStatus::Empty);
    assert_eq!(notifier.received()[0].category, "Research Case");
}

#[tokio::test(start_paused = true)]
async fn submit_outside_ready_is_rejected_without_state_change() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = SubmissionWorkflow::new("Trend Report", WorkflowConfig::default())
        .with_notifier(notifier.clone());

    let err = workflow.submit().unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.validation(), Some(&ValidationError::MissingTitle));
    assert_eq!(workflow.status(), SubmissionStatus::Empty);

    workflow.set_title("Only a title");
    let err = workflow.submit().unwrap_err();
    assert_eq!(err.validation(), Some(&ValidationError::MissingFile));

    workflow.select_file(pdf_file("a.pdf")).unwrap();
    let _run = workflow.submit().unwrap();
    settle().await;

    assert_eq!(
        workflow.submit().unwrap_err(),
        WorkflowError::Precondition {
            status: SubmissionStatus::Submitting,
            cause: None
        }
    );
    assert_eq!(workflow.status(), SubmissionStatus::Submitting);

    advance(T_UPLOAD).await;
    settle().await;
    assert!(workflow.submit().unwrap_err().is_precondition());
    assert_eq!(workflow.status(), SubmissionStatus::Success);

    advance(T_DISPLAY).await;
    settle().await;
    assert_eq!(notifier.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn edits_are_ignored_in_flight() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier);
    let _run = workflow.submit().unwrap();
    settle().await;

    assert_eq!(workflow.set_title("Changed"), SubmissionStatus::Submitting);
    assert_eq!(workflow.clear_file(), SubmissionStatus::Submitting);
    assert_eq!(
        workflow.select_file(SelectedFile::new("huge.exe", u64::MAX)),
        Ok(SubmissionStatus::Submitting)
    );
    assert_eq!(workflow.title(), "Q3 Outlook");
    assert_eq!(workflow.selected_file().unwrap().name, "q3.pdf");

    advance(T_UPLOAD).await;
    settle().await;
    assert_eq!(workflow.set_title(""), SubmissionStatus::Success);

    advance(T_DISPLAY).await;
    settle().await;
    assert_eq!(notifier.received()[0].title, "Q3 Outlook");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_files_never_land_while_a_run_resets_the_form() {
    let config = WorkflowConfig::new()
        .with_upload_delay(Duration::ZERO)
        .with_display_delay(Duration::ZERO);
    let workflow = Arc::new(SubmissionWorkflow::new("Trend Report", config));
    let stop = Arc::new(AtomicBool::new(false));

    let picker = {
        let workflow = Arc::clone(&workflow);
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let _ = workflow.select_file(SelectedFile::new("huge.exe", u64::MAX));
            }
        })
    };

    for round in 0..200 {
        workflow.set_title("Q3 Outlook");
        workflow.select_file(pdf_file("q3.pdf")).unwrap();
        let outcome = workflow.submit().unwrap().outcome().await;
        assert!(matches!(outcome, RunOutcome::Completed(_)), "round {round}");
        assert_eq!(
            workflow.selected_file().map(|file| file.name),
            None,
            "round {round}"
        );
    }

    stop.store(true, Ordering::Relaxed);
    picker.join().unwrap();
}

#[tokio::test(start_paused = true)]
async fn close_right_after_submit_suppresses_everything() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier);
    let mut status = workflow.subscribe();

    let run = workflow.submit().unwrap();
    assert_eq!(*status.borrow_and_update(), SubmissionStatus::Submitting);
    workflow.close();

    advance(Duration::from_secs(3600)).await;
    settle().await;

    assert_eq!(notifier.count(), 0);
    assert!(!status.has_changed().unwrap_or(false));
    assert_eq!(*status.borrow(), SubmissionStatus::Submitting);
    assert_eq!(run.outcome().await, RunOutcome::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn close_during_success_display_suppresses_reset_and_notification() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier);
    let mut status = workflow.subscribe();

    let run = workflow.submit().unwrap();
    settle().await;
    advance(T_UPLOAD).await;
    settle().await;
    assert_eq!(*status.borrow_and_update(), SubmissionStatus::Success);

    drop(workflow);
    advance(T_DISPLAY * 10).await;
    settle().await;

    assert_eq!(notifier.count(), 0);
    assert_eq!(*status.borrow(), SubmissionStatus::Success);
    assert_eq!(run.outcome().await, RunOutcome::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_returns_to_ready_with_form_intact() {
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ready_workflow(&notifier)
        .with_transport(Arc::new(FailingTransport::new(T_UPLOAD, "backend offline")));

    let outcome = workflow.submit().unwrap().outcome().await;

    assert_eq!(
        outcome,
        RunOutcome::Failed(SubmissionError::Transport("backend offline".into()))
    );
    assert_eq!(workflow.status(), SubmissionStatus::Ready);
    assert_eq!(workflow.title(), "Q3 Outlook");
    assert_eq!(workflow.selected_file().unwrap().name, "q3.pdf");
    assert_eq!(notifier.count(), 0);

    // the form can be resubmitted
    assert!(workflow.submit().is_ok());
}

#[tokio::test(start_paused = true)]
async fn reopened_dialog_is_fresh_and_independent() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut entry = UploadEntryPoint::research_cases(
        AdminGate::from(AdminIdentity::admin()),
        WorkflowConfig::default(),
    )
    .with_notifier(notifier.clone());
    assert!(entry.is_visible());

    let first = entry.open().unwrap();
    first.set_title("Abandoned");
    first.select_file(pdf_file("old.pdf")).unwrap();
    let _abandoned = first.submit().unwrap();
    settle().await;
    entry.close();

    let second = entry.open().unwrap();
    assert_eq!(second.status(), SubmissionStatus::Empty);
    assert_eq!(second.title(), "");
    second.set_title("Kept");
    second.select_file(pdf_file("new.pdf")).unwrap();
    let _kept = second.submit().unwrap();
    settle().await;

    advance(T_UPLOAD + T_DISPLAY).await;
    settle().await;
    advance(T_DISPLAY).await;
    settle().await;

    assert_eq!(
        notifier.received(),
        vec![CompletionNotification::new("Research Case", "Kept")]
    );
}
