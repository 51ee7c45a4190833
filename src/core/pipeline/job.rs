//! Job definition and output

use super::annotate::FrameAnnotation;
use crate::core::frames::KeyFrameSet;
use crate::core::prompt::Scenario;
use crate::core::types::{FewShotExample, Frame};
use crate::utils::error::{FrameDocError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// One prompt, one ordered frame sequence and the fixed few-shot context.
///
/// Read-only for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// System prompt sent with every request
    pub system_prompt: String,
    /// Frames in submission order
    pub frames: Vec<Frame>,
    /// Exemplars included in every batch request
    #[serde(default, rename = "fewShotExamples")]
    pub few_shot: Vec<FewShotExample>,
}

impl Job {
    /// Create a job without few-shot context
    pub fn new(system_prompt: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            frames,
            few_shot: Vec::new(),
        }
    }

    /// Attach few-shot exemplars
    pub fn with_few_shot(mut self, few_shot: Vec<FewShotExample>) -> Self {
        self.few_shot = few_shot;
        self
    }

    /// Reject jobs that must not reach the network
    pub fn validate(&self) -> Result<()> {
        if self.system_prompt.trim().is_empty() {
            return Err(FrameDocError::InvalidConfiguration(
                "system prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Final result of a job run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutput {
    /// Id carried by every log line of the run
    pub job_id: Uuid,
    /// Generated document, empty when the job had no frames
    pub text: String,
    /// Batches the frames were split into
    pub batch_count: usize,
    /// Upstream requests issued, consolidation included
    pub request_count: usize,
}

/// Job file as read by the CLI, JSON or YAML. Keys are camelCase, matching
/// the frame records inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobDefinition {
    /// Frames in submission order
    pub frames: Vec<Frame>,
    /// Few-shot exemplars
    #[serde(rename = "fewShotExamples")]
    pub few_shot: Vec<FewShotExample>,
    /// Preset used when no explicit prompt is given
    pub scenario: Option<Scenario>,
    /// Explicit system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl JobDefinition {
    /// Read a job file. `.json` files are parsed as JSON, anything else as YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        if is_json_path(path) {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Write the job file back out, in the format `from_file` reads from
    /// the same path
    pub async fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json_path(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Store generated annotations on the matching frames. Annotations for
    /// frames no longer in the job are dropped. Returns the number applied.
    pub fn apply_annotations(&mut self, annotations: &[FrameAnnotation]) -> usize {
        let mut set = KeyFrameSet::from(std::mem::take(&mut self.frames));
        let applied = annotations
            .iter()
            .filter(|a| set.annotate(a.frame_id, a.annotation.as_str()))
            .count();
        self.frames = set.into_frames();
        debug!(applied, total = annotations.len(), "Applied frame annotations");
        applied
    }

    /// Resolve the document-generation prompt. An explicit prompt wins over
    /// any scenario, the override scenario wins over the file's.
    pub fn main_prompt(&self, prompt: Option<&str>, scenario: Option<Scenario>) -> String {
        match (prompt, &self.system_prompt) {
            (Some(prompt), _) => prompt.to_string(),
            (None, Some(prompt)) if scenario.is_none() => prompt.clone(),
            _ => self.resolve_scenario(scenario).main_prompt().to_string(),
        }
    }

    /// Resolve the auto-annotation prompt. The file's `systemPrompt` is a
    /// document prompt and is not used here.
    pub fn annotation_prompt(&self, prompt: Option<&str>, scenario: Option<Scenario>) -> String {
        match prompt {
            Some(prompt) => prompt.to_string(),
            None => self.resolve_scenario(scenario).annotation_prompt().to_string(),
        }
    }

    fn resolve_scenario(&self, scenario: Option<Scenario>) -> Scenario {
        scenario.or(self.scenario).unwrap_or_default()
    }

    /// Build a job with the given prompt
    pub fn into_job(self, system_prompt: String) -> Job {
        Job {
            system_prompt,
            frames: self.frames,
            few_shot: self.few_shot,
        }
    }
}
