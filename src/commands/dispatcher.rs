use crate::commands::consts::{BUSY_MESSAGE, HELP_KEYWORD, USAGE_MESSAGE, WAIT_MESSAGE};
use crate::commands::requests::SlashCommand;
use crate::commands::responses::SlashCommandResponse;
use crate::jobs::broker::JobBroker;
use crate::jobs::models::Job;

/// Synchronous phase of `/lgtm`: answers immediately and never touches the
/// network. Anything that needs work is handed to the job queue.
#[derive(Clone, Debug)]
pub struct CommandDispatcher {
    broker: JobBroker,
}

impl CommandDispatcher {
    pub fn new(broker: JobBroker) -> Self {
        Self { broker }
    }

    pub fn dispatch(&self, command: SlashCommand) -> SlashCommandResponse {
        if command.text.is_empty() || command.text == HELP_KEYWORD {
            return SlashCommandResponse::ephemeral(USAGE_MESSAGE);
        }

        let user_id = command.user_id.clone();
        match self.broker.enqueue(Job::generate_lgtm(command)) {
            Ok(()) => SlashCommandResponse::ephemeral(WAIT_MESSAGE),
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %err,
                    "Could not enqueue the LGTM job."
                );
                SlashCommandResponse::ephemeral(BUSY_MESSAGE)
            }
        }
    }
}
