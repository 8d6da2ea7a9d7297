//! ConvertScreenshotHandler - Command handler for the conversion pipeline.
//!
//! Steps run in order and each one short-circuits:
//! credential, input, user lookup, credit ledger, vision model, persistence.
//! The credit is consumed before the model is called and is kept even if
//! the model fails.

use std::sync::Arc;

use crate::application::credit_ledger::CreditLedger;
use crate::domain::account::CreditsRemaining;
use crate::domain::conversion::{ConversionError, ConversionRecord};
use crate::domain::foundation::UserId;
use crate::ports::{CodeGenerator, ConversionRepository, UserRepository};

/// Command to convert a screenshot into component code.
#[derive(Debug, Clone, Default)]
pub struct ConvertScreenshotCommand {
    /// Bearer credential from the request, if any. Only its presence is checked.
    pub credential: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertScreenshotResult {
    pub code: String,
    pub credits_remaining: CreditsRemaining,
}

pub struct ConvertScreenshotHandler {
    users: Arc<dyn UserRepository>,
    conversions: Arc<dyn ConversionRepository>,
    generator: Arc<dyn CodeGenerator>,
    ledger: CreditLedger,
}

impl ConvertScreenshotHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        conversions: Arc<dyn ConversionRepository>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            ledger: CreditLedger::new(users.clone()),
            users,
            conversions,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConvertScreenshotCommand,
    ) -> Result<ConvertScreenshotResult, ConversionError> {
        // 1. Credential present
        if non_blank(cmd.credential.as_deref()).is_none() {
            return Err(ConversionError::unauthorized());
        }

        // 2. Input fields
        let missing = || ConversionError::invalid_request("Missing imageUrl or userId");
        let image_url = non_blank(cmd.image_url.as_deref()).ok_or_else(missing)?;
        let user_id = non_blank(cmd.user_id.as_deref())
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(missing)?;

        // 3. User record snapshot
        let snapshot = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ConversionError::not_found(user_id.clone()))?;

        // 4. Credit ledger
        let grant = self.ledger.consume_for(&snapshot).await?;
        tracing::debug!(user_id = %user_id, ?grant, "credit granted");

        // 5. Vision model
        let code = self.generator.generate(image_url).await.map_err(|e| {
            tracing::warn!(
                user_id = %user_id,
                model = self.generator.model_name(),
                error = %e,
                "code generation failed"
            );
            ConversionError::upstream(e.to_string())
        })?;

        // 6. Persist; failures here never fail the request
        let record = ConversionRecord::new(user_id.clone(), image_url, code.clone());
        match self.conversions.save(&record).await {
            Ok(()) => {
                if let Err(e) = self.users.increment_total_conversions(&user_id).await {
                    tracing::warn!(user_id = %user_id, error = %e, "failed to bump conversion count");
                }
            }
            Err(e) => {
                let err = ConversionError::persistence(e.to_string());
                tracing::error!(
                    user_id = %user_id,
                    conversion_id = %record.id,
                    error = %err,
                    "failed to save conversion"
                );
            }
        }

        Ok(ConvertScreenshotResult {
            code,
            credits_remaining: CreditsRemaining::after_use(&snapshot),
        })
    }
}

/// Whitespace only counts as missing; accepted values are passed on untrimmed.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
