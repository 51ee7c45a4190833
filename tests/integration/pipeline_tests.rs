//! End-to-end job pipeline tests over HTTP

use crate::common::assertions::{ChatRequestAssertions, is_consolidation};
use crate::common::{CompletionServer, FrameFactory, ScriptedResponder};
use framedoc::core::prompt::{FEW_SHOT_MARKER, PARTIAL_OUTPUT_SEPARATOR};
use framedoc::{EngineConfig, FrameDocError, Job, JobRunner, MessageRole};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn runner() -> JobRunner {
    JobRunner::with_http(EngineConfig::default()).unwrap()
}

#[tokio::test]
async fn test_twelve_frames_fan_out_and_consolidate() {
    let server = CompletionServer::start(ScriptedResponder::default()).await;
    let job = Job::new("Write an operation manual.", FrameFactory::sequence(12));

    let output = runner().run(&job, &server.credentials()).await.unwrap();

    assert_eq!(output.batch_count, 3);
    assert_eq!(output.request_count, 4);
    let expected = ["[1, 2, 3, 4, 5]", "[6, 7, 8, 9, 10]", "[11, 12]"].join(PARTIAL_OUTPUT_SEPARATOR);
    assert_eq!(output.text, format!("merged[{}]", expected));

    let requests = server.chat_requests().await;
    assert_eq!(requests.len(), 4);
    let batches: Vec<_> = requests.iter().filter(|r| !is_consolidation(r)).collect();
    assert_eq!(batches.len(), 3);
    for batch in &batches {
        assert_eq!(batch.temperature, None);
        assert_eq!(batch.max_tokens, Some(4096));
    }

    let consolidation = requests.last().unwrap();
    consolidation.assert_consolidation();
    assert_eq!(consolidation.temperature, Some(0.0));
}

#[tokio::test]
async fn test_three_frames_single_request() {
    let server = CompletionServer::start(ScriptedResponder::default()).await;
    let job = Job::new("Write an operation manual.", FrameFactory::annotated(3));

    let output = runner().run(&job, &server.credentials()).await.unwrap();

    assert_eq!(output.text, "[1, 2, 3]");
    assert_eq!(output.request_count, 1);

    let requests = server.chat_requests().await;
    assert_eq!(requests.len(), 1);
    requests[0].assert_batch_times(&[1, 2, 3]);
    assert_eq!(requests[0].temperature, Some(0.0));
    assert_eq!(
        requests[0].messages[0].content.to_string(),
        "Write an operation manual."
    );
    assert!(
        requests[0].messages[1]
            .content
            .to_string()
            .contains("Annotation: step at 2s")
    );
}

#[tokio::test]
async fn test_failed_batch_fails_job_without_consolidation() {
    let responder = ScriptedResponder {
        failing_first_times: [11].into_iter().collect(),
    };
    let server = CompletionServer::start(responder).await;
    let job = Job::new("Write an operation manual.", FrameFactory::sequence(12));

    let err = runner().run(&job, &server.credentials()).await.unwrap_err();

    match &err {
        FrameDocError::PartialFailure { total, failures } => {
            assert_eq!(*total, 3);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].index, 2);
            assert_eq!(failures[0].error.status, Some(500));
        }
        other => panic!("expected partial failure, got {:?}", other),
    }

    let requests = server.chat_requests().await;
    assert_eq!(requests.len(), 3);
    assert!(!requests.iter().any(is_consolidation));
}

#[tokio::test]
async fn test_few_shot_sent_with_every_batch() {
    let server = CompletionServer::start(ScriptedResponder::default()).await;
    let job = Job::new("Write an operation manual.", FrameFactory::sequence(7))
        .with_few_shot(FrameFactory::few_shot());

    runner().run(&job, &server.credentials()).await.unwrap();

    for request in server.chat_requests().await.iter().filter(|r| !is_consolidation(r)) {
        let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::System,
                MessageRole::System,
                MessageRole::User
            ]
        );
        assert_eq!(request.messages[1].content.to_string(), FEW_SHOT_MARKER);
        assert_eq!(
            request.messages[2].content.to_string(),
            "Description: Torque wrench"
        );
    }
}

#[tokio::test]
async fn test_overlap_batches_share_frames() {
    let server = CompletionServer::start(ScriptedResponder::default()).await;
    let config = EngineConfig {
        max_batch_size: 4,
        overlap: 1,
        ..Default::default()
    };
    let runner = JobRunner::with_http(config).unwrap();
    let job = Job::new("Summarize the video.", FrameFactory::sequence(7));

    let output = runner.run(&job, &server.credentials()).await.unwrap();

    // offsets 0, 3, 6
    assert_eq!(output.batch_count, 3);
    let expected = ["[1, 2, 3, 4]", "[4, 5, 6, 7]", "[7]"].join(PARTIAL_OUTPUT_SEPARATOR);
    assert_eq!(output.text, format!("merged[{}]", expected));
}

#[tokio::test]
async fn test_cancellation_stops_pending_batches() {
    let server = CompletionServer::start(ScriptedResponder::default()).await;
    let job = Job::new("Write an operation manual.", FrameFactory::sequence(12));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = runner()
        .run_with_cancel(&job, &server.credentials(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!server.chat_requests().await.iter().any(is_consolidation));
}

#[tokio::test]
async fn test_auto_annotation_over_http() {
    let server = CompletionServer::start(ScriptedResponder::default()).await;
    let frames = FrameFactory::sequence(4);

    let annotations = runner()
        .annotate_frames(&frames, &[], "Describe this frame.", &server.credentials())
        .await
        .unwrap();

    let texts: Vec<&str> = annotations.iter().map(|a| a.annotation.as_str()).collect();
    assert_eq!(texts, vec!["[1]", "[2]", "[3]", "[4]"]);
    assert_eq!(server.chat_requests().await.len(), 4);
}
