use crate::commands::requests::SlashCommand;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub enum Job {
    /// Deferred phase of one `/lgtm` invocation.
    GenerateLgtm { id: Uuid, command: SlashCommand },
    /// Out-of-band record of a job that failed.
    ReportFailure(FailureReport),
}

impl Job {
    pub fn generate_lgtm(command: SlashCommand) -> Self {
        Job::GenerateLgtm {
            id: Uuid::new_v4(),
            command,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Job::GenerateLgtm { .. } => "generate_lgtm",
            Job::ReportFailure(_) => "report_failure",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    pub job_id: Uuid,
    pub user_id: String,
    pub text: String,
    pub stage: String,
    pub message: String,
}
