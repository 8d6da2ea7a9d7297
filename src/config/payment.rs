//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Stripe settings for checkout and webhooks.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Secret API key (`sk_test_...` or `sk_live_...`)
    pub stripe_api_key: String,

    /// Webhook signing secret (`whsec_...`)
    pub stripe_webhook_secret: String,

    /// Price of the Pro subscription (`price_...`)
    pub stripe_pro_price_id: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__STRIPE_WEBHOOK_SECRET",
            ));
        }
        if self.stripe_pro_price_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_PRO_PRICE_ID"));
        }

        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if !self.stripe_pro_price_id.starts_with("price_") {
            return Err(ValidationError::InvalidStripePriceId);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            stripe_webhook_secret: String::new(),
            stripe_pro_price_id: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PaymentConfig {
        PaymentConfig {
            stripe_api_key: "sk_test_abc".to_string(),
            stripe_webhook_secret: "whsec_abc".to_string(),
            stripe_pro_price_id: "price_pro".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        let config = valid();
        assert!(config.validate().is_ok());
        assert!(config.is_test_mode());
        assert_eq!(config.api_base_url, "https://api.stripe.com");
    }

    #[test]
    fn prefixes_are_enforced() {
        let bad_key = PaymentConfig {
            stripe_api_key: "pk_test_abc".to_string(),
            ..valid()
        };
        assert_eq!(bad_key.validate(), Err(ValidationError::InvalidStripeKey));

        let bad_secret = PaymentConfig {
            stripe_webhook_secret: "secret".to_string(),
            ..valid()
        };
        assert_eq!(
            bad_secret.validate(),
            Err(ValidationError::InvalidStripeWebhookSecret)
        );

        let bad_price = PaymentConfig {
            stripe_pro_price_id: "prod_123".to_string(),
            ..valid()
        };
        assert_eq!(bad_price.validate(), Err(ValidationError::InvalidStripePriceId));
    }

    #[test]
    fn missing_price_is_reported() {
        let config = PaymentConfig {
            stripe_pro_price_id: String::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PAYMENT__STRIPE_PRO_PRICE_ID"))
        );
    }
}
