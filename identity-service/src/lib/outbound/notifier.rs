use async_trait::async_trait;

use crate::config::Config;
use crate::domain::auth::errors::NotifierError;
use crate::domain::auth::ports::ResetTokenNotifier;
use crate::domain::user::models::EmailAddress;

/// Reset token delivery that writes the reset link to the service log.
///
/// Stands in for a mail integration; operators can copy the link from the
/// log while no mail provider is wired up. The frontend URL comes from
/// configuration so the link points at the right deployment.
pub struct TracingResetNotifier {
    frontend_url: String,
}

impl TracingResetNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            frontend_url: config.server.frontend_url.to_string(),
        }
    }
}

#[async_trait]
impl ResetTokenNotifier for TracingResetNotifier {
    async fn send_reset_token(
        &self,
        email: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError> {
        tracing::debug!(
            "Password reset requested for {}: {}/reset-password?token={}",
            email,
            self.frontend_url,
            token
        );

        Ok(())
    }
}
