//! SignOutHandler - ends the current session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionToken};
use crate::ports::AuthAdapter;

/// Command to end a session.
#[derive(Debug, Clone)]
pub struct SignOutCommand {
    /// Token presented with the request; anonymous sign-outs are allowed.
    pub token: Option<SessionToken>,
}

pub struct SignOutHandler {
    adapter: Arc<dyn AuthAdapter>,
}

impl SignOutHandler {
    pub fn new(adapter: Arc<dyn AuthAdapter>) -> Self {
        Self { adapter }
    }

    /// Returns whether a session token was presented.
    pub async fn handle(&self, cmd: SignOutCommand) -> Result<bool, DomainError> {
        let Some(token) = cmd.token else {
            return Ok(false);
        };

        self.adapter.delete_session(&token).await?;
        tracing::debug!("Session deleted on sign out");
        Ok(true)
    }
}
