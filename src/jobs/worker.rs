use crate::commands::pipeline::{LgtmPipeline, PipelineError};
use crate::commands::requests::SlashCommand;
use crate::jobs::broker::{JobConsumer, WeakJobBroker};
use crate::jobs::models::{FailureReport, Job};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Drains the job queue one job at a time until every broker is dropped.
pub struct JobWorker {
    consumer: JobConsumer,
    failures: WeakJobBroker,
    pipeline: LgtmPipeline,
}

impl JobWorker {
    pub fn new(consumer: JobConsumer, failures: WeakJobBroker, pipeline: LgtmPipeline) -> Self {
        Self {
            consumer,
            failures,
            pipeline,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        tracing::info!("Job worker started.");
        while let Some(job) = self.consumer.consume_job().await {
            self.handle(job).await;
        }
        tracing::info!("Job queue closed, worker stopped.");
    }

    pub async fn handle(&mut self, job: Job) {
        match job {
            Job::GenerateLgtm { id, command } => {
                if let Err(err) = self.pipeline.execute(&command).await {
                    self.report(id, &command, err);
                }
            }
            Job::ReportFailure(report) => log_failure(&report),
        }
    }

    fn report(&self, job_id: Uuid, command: &SlashCommand, err: PipelineError) {
        tracing::error!(
            job_id = %job_id,
            user_id = %command.user_id,
            stage = %err.stage,
            error = %err,
            "LGTM job failed."
        );
        let report = FailureReport {
            job_id,
            user_id: command.user_id.clone(),
            text: command.text.clone(),
            stage: err.stage.to_string(),
            message: err.kind.to_string(),
        };
        if let Err(enqueue_err) = self.failures.enqueue(Job::ReportFailure(report.clone())) {
            tracing::warn!(error = %enqueue_err, "Could not queue the failure report.");
            log_failure(&report);
        }
    }
}

fn log_failure(report: &FailureReport) {
    let details = serde_json::to_string(report).unwrap_or_default();
    tracing::warn!(
        task = "job_failure",
        job_id = %report.job_id,
        user_id = %report.user_id,
        text = %report.text,
        stage = %report.stage,
        message = %report.message,
        details = %details,
    );
}
