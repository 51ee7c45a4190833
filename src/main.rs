//! framedoc - turn annotated video key frames into documents

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use framedoc::config::Config;
use framedoc::core::prompt::Scenario;
use framedoc::utils::logging::init_logging;
use framedoc::{
    Credentials, HttpThumbnailUploader, JobDefinition, JobRunner, KeyFrameSet,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "framedoc", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "FRAMEDOC_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// API key sent in the `api-key` header
    #[arg(long, env = "FRAMEDOC_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Chat completion endpoint URL
    #[arg(long, env = "FRAMEDOC_ENDPOINT", global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a document from every frame of a job
    Generate(JobArgs),
    /// Generate one annotation per frame
    Annotate(AnnotateArgs),
}

#[derive(Debug, Args)]
struct JobArgs {
    /// Job file, JSON or YAML
    #[arg(long)]
    job: PathBuf,

    /// Prompt preset: manualCreation, safetyCheck or summary
    #[arg(long, conflicts_with = "prompt")]
    scenario: Option<Scenario>,

    /// Explicit system prompt
    #[arg(long)]
    prompt: Option<String>,

    /// Upload service for local `data:` thumbnails
    #[arg(long, env = "FRAMEDOC_UPLOAD_URL")]
    upload_url: Option<String>,

    /// Write the result here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AnnotateArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Store the annotations on the frames and save the job here, may be the
    /// `--job` file itself
    #[arg(long, value_name = "FILE")]
    write_job: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    let api_key = cli
        .api_key
        .context("API key is missing, pass --api-key or set FRAMEDOC_API_KEY")?;
    let endpoint = cli
        .endpoint
        .context("Endpoint is missing, pass --endpoint or set FRAMEDOC_ENDPOINT")?;
    let credentials = Credentials::new(api_key, endpoint)?;
    let runner = JobRunner::with_http(config.engine)?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling job");
                cancel.cancel();
            }
        }
    });

    match cli.command {
        Command::Generate(args) => {
            let definition = load_job(&args).await?;
            let prompt = definition.main_prompt(args.prompt.as_deref(), args.scenario);
            let job = definition.into_job(prompt);

            let output = runner
                .run_with_cancel(&job, &credentials, &cancel)
                .await
                .context("Document generation failed")?;
            info!(
                job_id = %output.job_id,
                batch_count = output.batch_count,
                request_count = output.request_count,
                "Document generated"
            );
            write_output(args.output.as_deref(), &output.text).await
        }
        Command::Annotate(AnnotateArgs { job: args, write_job }) => {
            let mut definition = load_job(&args).await?;
            let prompt = definition.annotation_prompt(args.prompt.as_deref(), args.scenario);

            let annotations = runner
                .annotate_frames_with_cancel(
                    &definition.frames,
                    &definition.few_shot,
                    &prompt,
                    &credentials,
                    &cancel,
                )
                .await
                .context("Annotation failed")?;
            info!(frames = annotations.len(), "Annotations generated");

            if let Some(path) = write_job {
                let applied = definition.apply_annotations(&annotations);
                definition
                    .to_file(&path)
                    .await
                    .with_context(|| format!("Failed to write job file {}", path.display()))?;
                info!(path = %path.display(), applied, "Annotated job written");
            }

            let json = serde_json::to_string_pretty(&annotations)?;
            write_output(args.output.as_deref(), &json).await
        }
    }
}

/// Read the job file and upload local thumbnails when an upload service is set
async fn load_job(args: &JobArgs) -> anyhow::Result<JobDefinition> {
    let mut definition = JobDefinition::from_file(&args.job)
        .await
        .with_context(|| format!("Failed to read job file {}", args.job.display()))?;

    if let Some(upload_url) = &args.upload_url {
        let uploader = HttpThumbnailUploader::new(upload_url)?;
        let mut frames = KeyFrameSet::from(std::mem::take(&mut definition.frames));
        frames
            .upload_pending(&uploader)
            .await
            .context("Thumbnail upload failed")?;
        definition.frames = frames.into_frames();
    }

    Ok(definition)
}

async fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, text)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Output written");
        }
        None => println!("{}", text),
    }
    Ok(())
}
