//! Social task verification.

use std::time::Duration;

use crate::actions::context::ActionContext;
use crate::actions::runner::{Outcome, WalletSession, WalletTask};
use crate::actions::ActionError;
use crate::resilience::retry;

/// Ask the API to verify each configured social task.
pub struct SocialTask;

impl WalletTask for SocialTask {
    fn requires_token(&self) -> bool {
        true
    }

    async fn run(
        &self,
        ctx: &ActionContext,
        session: &mut WalletSession<'_>,
    ) -> Result<Outcome, ActionError> {
        let address = session.wallet.address();
        let token = session.token()?;
        let task_ids = &ctx.config.api.social_task_ids;
        let pause = Duration::from_millis(ctx.config.delays.between_social_tasks_ms);

        let api = &ctx.api;
        let jwt = token.as_str();
        let mut last_error = None;
        let mut answered = 0usize;

        for (i, &task_id) in task_ids.iter().enumerate() {
            let result = retry(&ctx.retry_policy(), "verify task", &ctx.shutdown, move || {
                api.verify_task(address, jwt, task_id)
            })
            .await;

            match result {
                Ok(true) => {
                    answered += 1;
                    tracing::info!(task_id, "Task verified");
                }
                Ok(false) => {
                    answered += 1;
                    tracing::warn!(task_id, "Task not verified");
                }
                Err(e) => {
                    tracing::error!(task_id, error = %e, "Task verification failed");
                    last_error = Some(e);
                }
            }

            if i + 1 < task_ids.len() && !ctx.shutdown.sleep(pause).await {
                return Err(ActionError::Interrupted);
            }
        }

        match last_error {
            Some(e) if answered == 0 => Err(e.into()),
            _ => Ok(Outcome::Done),
        }
    }
}
