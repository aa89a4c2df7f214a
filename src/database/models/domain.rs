use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a custom-domain binding.
///
/// Only `Active` records resolve. Revocation flips the status; rows are
/// never hard-deleted while historical logs may reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Pending,
    Active,
    Revoked,
}

impl DomainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainStatus::Pending => "pending",
            DomainStatus::Active => "active",
            DomainStatus::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DomainStatus::Pending),
            "active" => Some(DomainStatus::Active),
            "revoked" => Some(DomainStatus::Revoked),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record binding an externally-owned hostname to a tenant landing page.
/// Hostnames are unique and stored lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDomain {
    pub id: Uuid,
    pub hostname: String,
    pub slug: String,
    pub status: DomainStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            DomainStatus::Pending,
            DomainStatus::Active,
            DomainStatus::Revoked,
        ] {
            assert_eq!(DomainStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DomainStatus::parse("verified"), None);
    }
}
