//! Typed references to reportable platform entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to one of the platform entities a report or an activity
/// entry can point at.
///
/// Stored as a (`kind`, `id`) column pair; code always goes through this
/// enum so resolution stays exhaustive over the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// A platform account.
    User(String),
    /// A registered charity.
    Charity(String),
    /// A fundraising campaign.
    Campaign(String),
    /// A single donation.
    Donation(String),
}

impl EntityRef {
    /// Kind tags accepted by [`EntityRef::from_parts`].
    pub const KINDS: [&'static str; 4] = ["user", "charity", "campaign", "donation"];

    /// Build a reference from its stored column pair.
    #[must_use]
    pub fn from_parts(kind: &str, id: impl Into<String>) -> Option<Self> {
        match kind {
            "user" => Some(Self::User(id.into())),
            "charity" => Some(Self::Charity(id.into())),
            "campaign" => Some(Self::Campaign(id.into())),
            "donation" => Some(Self::Donation(id.into())),
            _ => None,
        }
    }

    /// The stored kind tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Charity(_) => "charity",
            Self::Campaign(_) => "campaign",
            Self::Donation(_) => "donation",
        }
    }

    /// The referenced entity's ID.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::User(id) | Self::Charity(id) | Self::Campaign(id) | Self::Donation(id) => id,
        }
    }

    /// Whether `kind` names a known entity kind.
    #[must_use]
    pub fn is_valid_kind(kind: &str) -> bool {
        Self::KINDS.contains(&kind)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
