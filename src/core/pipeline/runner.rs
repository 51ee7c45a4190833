//! Job runner
//!
//! One pipeline for every job: split, dispatch, then consolidate when the
//! frames needed more than one batch. A single batch goes out alone at the
//! deterministic temperature and its output is the document. Several
//! batches fan out concurrently and their ordered outputs are merged by
//! one consolidation request.

use super::consolidator::consolidate;
use super::job::{Job, JobOutput};
use crate::config::{EngineConfig, Validate};
use crate::core::batch::{Batch, BatchResult, BatchSplitter, FanOutExecutor};
use crate::core::prompt::MessageFormatter;
use crate::core::providers::{CompletionEndpoint, Credentials, HttpCompletionClient};
use crate::utils::error::{FrameDocError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs jobs against a completion endpoint.
///
/// Holds no per-job state, so one runner can serve concurrent jobs.
#[derive(Clone)]
pub struct JobRunner {
    endpoint: Arc<dyn CompletionEndpoint>,
    config: EngineConfig,
    splitter: BatchSplitter,
    executor: FanOutExecutor,
}

impl std::fmt::Debug for JobRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRunner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JobRunner {
    /// Create a runner. Invalid tunables are rejected here, before any job runs.
    pub fn new(endpoint: Arc<dyn CompletionEndpoint>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let splitter = config.splitter()?;
        let executor = FanOutExecutor::new(config.fan_out());

        Ok(Self {
            endpoint,
            config,
            splitter,
            executor,
        })
    }

    /// Create a runner backed by the HTTP client
    pub fn with_http(config: EngineConfig) -> Result<Self> {
        let client = HttpCompletionClient::with_timeout(config.request_timeout())?;
        Self::new(Arc::new(client), config)
    }

    /// Engine tunables
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Completion endpoint shared by every request
    pub fn endpoint(&self) -> &dyn CompletionEndpoint {
        self.endpoint.as_ref()
    }

    pub(crate) fn executor(&self) -> &FanOutExecutor {
        &self.executor
    }

    /// Run a job to completion
    pub async fn run(&self, job: &Job, credentials: &Credentials) -> Result<JobOutput> {
        self.run_with_cancel(job, credentials, &CancellationToken::new())
            .await
    }

    /// Run a job, giving up with `Cancelled` when `cancel` fires or the job
    /// timeout elapses. Pending requests are dropped and consolidation is
    /// never started after that point.
    pub async fn run_with_cancel(
        &self,
        job: &Job,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<JobOutput> {
        job.validate()?;

        let job_id = Uuid::new_v4();
        let batches = self.splitter.split(&job.frames);
        let batch_count = batches.len();
        info!(
            %job_id,
            frame_count = job.frames.len(),
            batch_count,
            "Starting job"
        );

        if batch_count == 0 {
            debug!(%job_id, "No frames, nothing to send");
            return Ok(JobOutput {
                job_id,
                text: String::new(),
                batch_count: 0,
                request_count: 0,
            });
        }

        let start = Instant::now();
        let result = self
            .guarded(cancel, self.process(job_id, job, batches, credentials))
            .await;

        match result {
            Ok((text, request_count)) => {
                info!(
                    %job_id,
                    batch_count,
                    request_count,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Job completed"
                );
                Ok(JobOutput {
                    job_id,
                    text,
                    batch_count,
                    request_count,
                })
            }
            Err(e) => {
                warn!(%job_id, error = %e, "Job failed");
                Err(e)
            }
        }
    }

    async fn process(
        &self,
        job_id: Uuid,
        job: &Job,
        batches: Vec<Batch>,
        credentials: &Credentials,
    ) -> Result<(String, usize)> {
        let batch_count = batches.len();
        let formatter = MessageFormatter::new(&job.system_prompt, &job.few_shot, batch_count);
        let endpoint = self.endpoint.as_ref();

        if let [batch] = batches.as_slice() {
            let request = self
                .config
                .deterministic_settings()
                .request(formatter.build_messages(batch));
            debug!(%job_id, frames = batch.len(), "Dispatching single batch");
            let text = endpoint.complete(&request, credentials).await?;
            return Ok((text, 1));
        }

        let settings = self.config.batch_settings();
        let formatter = &formatter;
        let results = self
            .executor
            .execute_all(batches, |index, batch: Batch| {
                info!(
                    %job_id,
                    batch_index = index,
                    batch_count,
                    frames = batch.len(),
                    "Processing batch"
                );
                let request = settings.request(formatter.build_messages(&batch));
                async move {
                    endpoint
                        .complete(&request, credentials)
                        .await
                        .map(|output| BatchResult { index, output })
                }
            })
            .await?;

        let outputs: Vec<String> = results.into_iter().map(|r| r.output).collect();
        info!(%job_id, batch_count, "All batches completed, consolidating");

        let text = consolidate(
            endpoint,
            &outputs,
            &job.system_prompt,
            &self.config.deterministic_settings(),
            credentials,
        )
        .await?;
        Ok((text, batch_count + 1))
    }

    /// Race `work` against cancellation and the job timeout
    pub(crate) async fn guarded<T>(
        &self,
        cancel: &CancellationToken,
        work: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let timeout = self.config.job_timeout();
        let deadline = async move {
            match timeout {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Job cancelled");
                Err(FrameDocError::Cancelled)
            }
            _ = deadline => {
                warn!(timeout_secs = self.config.job_timeout_secs, "Job timed out");
                Err(FrameDocError::Cancelled)
            }
            result = work => result,
        }
    }
}
