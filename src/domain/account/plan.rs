//! Subscription plan definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription plan of a user.
///
/// Only `Free` is metered. `Team` has no purchase path; it exists so records
/// provisioned out of band are honoured as unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Team,
}

impl Plan {
    /// Returns true if this plan is a paid plan.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    /// Paid plans are not metered.
    pub fn has_unlimited_credits(&self) -> bool {
        self.is_paid()
    }

    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Team => "team",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            "team" => Ok(Plan::Team),
            other => Err(ValidationError::invalid_format(
                "plan",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_is_not_paid() {
        assert!(!Plan::Free.is_paid());
        assert!(!Plan::Free.has_unlimited_credits());
    }

    #[test]
    fn pro_and_team_are_unlimited() {
        assert!(Plan::Pro.has_unlimited_credits());
        assert!(Plan::Team.has_unlimited_credits());
    }

    #[test]
    fn default_plan_is_free() {
        assert_eq!(Plan::default(), Plan::Free);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("PRO".parse::<Plan>().unwrap(), Plan::Pro);
        assert_eq!("team".parse::<Plan>().unwrap(), Plan::Team);
    }

    #[test]
    fn rejects_unknown_plan() {
        assert!("enterprise".parse::<Plan>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Plan::Pro).unwrap(), "\"pro\"");
        let plan: Plan = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(plan, Plan::Free);
    }
}
