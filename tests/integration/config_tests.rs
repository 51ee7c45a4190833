//! Configuration loading tests

use framedoc::config::{Config, LogFormat};
use framedoc::core::types::Frame;
use framedoc::{FrameAnnotation, FrameDocError, JobDefinition, Scenario};
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/framedoc.example.yaml");
    let config = Config::from_file(path).await.unwrap();

    assert_eq!(config.engine.max_batch_size, 5);
    assert_eq!(config.engine.overlap, 0);
    assert_eq!(config.logging.format, LogFormat::Text);
}

#[tokio::test]
async fn test_partial_config_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "engine:\n  batch_temperature: 0.7").unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.engine.batch_temperature, Some(0.7));
    assert_eq!(config.engine.max_batch_size, 5);
    assert_eq!(config.engine.max_tokens, 4096);
    assert_eq!(config.logging.level, "info");
}

#[tokio::test]
async fn test_invalid_values_rejected_on_load() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "engine:\n  max_batch_size: 2\n  overlap: 4").unwrap();

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, FrameDocError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn test_malformed_yaml_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "engine: [unterminated").unwrap();

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, FrameDocError::Config(_)));
}

#[tokio::test]
async fn test_json_job_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
            "scenario": "safetyCheck",
            "frames": [
                {{"id": 1.5, "time": 1.5, "thumbnailUrl": "https://blob.example/1.png", "annotation": "opens valve"}},
                {{"id": 3.0, "time": 3.0, "thumbnailUrl": "https://blob.example/2.png"}}
            ],
            "fewShotExamples": [{{"image": "https://blob.example/ref.png", "description": "Valve"}}]
        }}"#
    )
    .unwrap();

    let definition = JobDefinition::from_file(file.path()).await.unwrap();
    assert_eq!(definition.frames.len(), 2);
    assert_eq!(definition.frames[0].annotation, "opens valve");
    assert_eq!(definition.frames[1].annotation, "");
    assert_eq!(definition.scenario, Some(Scenario::SafetyCheck));
    assert_eq!(definition.few_shot[0].description, "Valve");
}

#[tokio::test]
async fn test_yaml_job_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "systemPrompt: Describe the assembly\nframes:\n  - id: 2.0\n    time: 2.0\n    thumbnailUrl: https://blob.example/2.png\n"
    )
    .unwrap();

    let definition = JobDefinition::from_file(file.path()).await.unwrap();
    assert_eq!(definition.main_prompt(None, None), "Describe the assembly");
    assert!(definition.few_shot.is_empty());
}

#[tokio::test]
async fn test_annotated_job_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["job.json", "job.yaml"] {
        let path = dir.path().join(name);
        let mut definition = JobDefinition {
            frames: vec![
                Frame::new(1.0, "https://blob.example/1.png"),
                Frame::new(2.0, "https://blob.example/2.png"),
            ],
            scenario: Some(Scenario::SafetyCheck),
            ..Default::default()
        };
        let applied = definition.apply_annotations(&[FrameAnnotation {
            frame_id: 2.0,
            time: 2.0,
            annotation: "checks the gauge".to_string(),
        }]);
        assert_eq!(applied, 1);

        definition.to_file(&path).await.unwrap();
        let reread = JobDefinition::from_file(&path).await.unwrap();

        assert_eq!(reread, definition);
        assert_eq!(reread.frames[1].annotation, "checks the gauge");
        assert_eq!(reread.frames[0].annotation, "");
    }
}
