//! Stripe webhook payload types.
//!
//! Only the fields subscription reconciliation reads are captured. Anything
//! else in Stripe's schema is ignored during deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp of event creation.
    #[serde(default)]
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object that triggered the event; shape depends on the event type.
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Deserializes the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// `checkout.session` object, reduced to the correlation fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,

    #[serde(default, deserialize_with = "expandable_id")]
    pub customer: Option<String>,

    #[serde(default, deserialize_with = "expandable_id")]
    pub subscription: Option<String>,

    #[serde(default, deserialize_with = "nullable_map")]
    pub metadata: HashMap<String, String>,
}

/// `subscription` object, reduced to the correlation fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    pub id: String,

    #[serde(default, deserialize_with = "expandable_id")]
    pub customer: Option<String>,

    #[serde(default)]
    pub status: SubscriptionStatus,
}

/// Stripe subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Unpaid,
    Incomplete,
    IncompleteExpired,
    Paused,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Statuses that signal the subscription is lapsing.
    pub fn is_delinquent(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Canceled | SubscriptionStatus::Unpaid | SubscriptionStatus::PastDue
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Unknown => "unknown",
        }
    }
}

/// Accepts either a bare id or an expanded object carrying `id`.
fn expandable_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Expandable {
        Id(String),
        Object { id: String },
    }

    let value: Option<Expandable> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|v| match v {
            Expandable::Id(id) => id,
            Expandable::Object { id } => id,
        })
        .filter(|id| !id.trim().is_empty()))
}

fn nullable_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(object: serde_json::Value) -> StripeEvent {
        StripeEvent {
            id: "evt_test_123".to_string(),
            event_type: "checkout.session.completed".to_string(),
            created: 1_704_067_200,
            data: StripeEventData { object },
            livemode: false,
        }
    }

    #[test]
    fn deserialize_minimal_event() {
        let json = r#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": { "object": {} },
            "livemode": false
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1234567890");
        assert_eq!(event.event_type, "checkout.session.completed");
        assert!(!event.livemode);
    }

    #[test]
    fn unread_envelope_fields_are_ignored() {
        let json = r#"{
            "id": "evt_update_123",
            "type": "customer.subscription.updated",
            "created": 1704067200,
            "data": {
                "object": {"id": "sub_1", "status": "active"},
                "previous_attributes": {"status": "past_due"}
            },
            "livemode": true,
            "api_version": "2023-10-16"
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();

        assert!(event.livemode);
        assert_eq!(event.data.object["status"], "active");
    }

    #[test]
    fn checkout_session_reads_metadata_and_refs() {
        let session: CheckoutSessionObject = event(json!({
            "id": "cs_1",
            "customer": "cus_1",
            "subscription": "sub_1",
            "metadata": {"userId": "user-1"}
        }))
        .deserialize_object()
        .unwrap();

        assert_eq!(session.customer.as_deref(), Some("cus_1"));
        assert_eq!(session.subscription.as_deref(), Some("sub_1"));
        assert_eq!(session.metadata.get("userId").map(String::as_str), Some("user-1"));
    }

    #[test]
    fn checkout_session_tolerates_null_fields() {
        let session: CheckoutSessionObject = event(json!({
            "id": "cs_1",
            "customer": null,
            "subscription": null,
            "metadata": null
        }))
        .deserialize_object()
        .unwrap();

        assert!(session.customer.is_none());
        assert!(session.subscription.is_none());
        assert!(session.metadata.is_empty());
    }

    #[test]
    fn expanded_customer_object_yields_its_id() {
        let session: CheckoutSessionObject = event(json!({
            "id": "cs_1",
            "customer": {"id": "cus_expanded", "object": "customer"}
        }))
        .deserialize_object()
        .unwrap();

        assert_eq!(session.customer.as_deref(), Some("cus_expanded"));
    }

    #[test]
    fn subscription_status_parses_known_values() {
        let sub: SubscriptionObject = event(json!({
            "id": "sub_1", "customer": "cus_1", "status": "past_due"
        }))
        .deserialize_object()
        .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::PastDue);
        assert!(sub.status.is_delinquent());
    }

    #[test]
    fn unknown_subscription_status_falls_back() {
        let sub: SubscriptionObject = event(json!({
            "id": "sub_1", "customer": "cus_1", "status": "something_new"
        }))
        .deserialize_object()
        .unwrap();

        assert_eq!(sub.status, SubscriptionStatus::Unknown);
        assert!(!sub.status.is_delinquent());
    }
}
