use crate::cli::Args;
use crate::commands::dispatcher::CommandDispatcher;
use crate::jobs::broker::JobBroker;
use std::sync::Arc;

#[derive(Debug)]
pub struct VerificationSettings {
    pub token: String,
    /// Signed-request checks are skipped when unset.
    pub signing_secret: Option<String>,
}

#[derive(Clone)]
pub struct AppContext {
    pub dispatcher: CommandDispatcher,
    pub broker: JobBroker,
    pub verification: Arc<VerificationSettings>,
}

pub fn init(args: &Args, broker: JobBroker) -> AppContext {
    if args.signing_secret.is_none() {
        tracing::warn!("SLACK_SIGNING_SECRET is not set. Only the verification token is checked.");
    }
    AppContext {
        dispatcher: CommandDispatcher::new(broker.clone()),
        broker,
        verification: Arc::new(VerificationSettings {
            token: args.verification_token.clone(),
            signing_secret: args.signing_secret.clone(),
        }),
    }
}
