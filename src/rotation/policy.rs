//! Retirement policy selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a rotation deletes a prior credential before issuing a new one
///
/// `CreateOnly` never deletes anything; repeated runs accumulate credentials
/// at the provider until a retire-enabled run (or out-of-band cleanup)
/// reconciles them. `RetireOldestFirst` deletes the soonest-expiring record
/// before creating its replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetirementPolicy {
    /// Issue a new credential without touching existing ones
    #[default]
    CreateOnly,
    /// Delete the soonest-expiring credential, then issue a replacement
    RetireOldestFirst,
}

impl RetirementPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateOnly => "create-only",
            Self::RetireOldestFirst => "retire-oldest-first",
        }
    }
}

impl FromStr for RetirementPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "create-only" => Ok(Self::CreateOnly),
            "retire-oldest-first" => Ok(Self::RetireOldestFirst),
            _ => Err(format!("Unknown retirement policy: {}", s)),
        }
    }
}

impl fmt::Display for RetirementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_roundtrip() {
        for policy in [RetirementPolicy::CreateOnly, RetirementPolicy::RetireOldestFirst] {
            let parsed: RetirementPolicy = policy.as_str().parse().unwrap();
            assert_eq!(policy, parsed);
        }
    }

    #[test]
    fn test_policy_default_is_create_only() {
        assert_eq!(RetirementPolicy::default(), RetirementPolicy::CreateOnly);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!("retire-newest".parse::<RetirementPolicy>().is_err());
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&RetirementPolicy::RetireOldestFirst).unwrap();
        assert_eq!(json, "\"retire-oldest-first\"");
    }
}
