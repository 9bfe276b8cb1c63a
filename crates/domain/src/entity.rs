//! Entity — the record kinds that rules can react to.
//!
//! Every entity kind maps to exactly one storage table. The mapping is
//! exhaustive and checked at compile time; an unknown entity name fails to
//! deserialize instead of guessing a table name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The product module an entity (and its rules) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Crm,
    Ats,
    Hr,
    Finance,
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Crm => "crm",
            Self::Ats => "ats",
            Self::Hr => "hr",
            Self::Finance => "finance",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown module name.
#[derive(Debug, thiserror::Error)]
#[error("unknown module: {0}")]
pub struct UnknownModule(pub String);

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crm" => Ok(Self::Crm),
            "ats" => Ok(Self::Ats),
            "hr" => Ok(Self::Hr),
            "finance" => Ok(Self::Finance),
            other => Err(UnknownModule(other.to_string())),
        }
    }
}

/// A kind of business record that change events are reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Lead,
    Contact,
    Deal,
    Candidate,
    Job,
    Employee,
    Invoice,
}

impl Entity {
    /// All entity kinds, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Lead,
        Self::Contact,
        Self::Deal,
        Self::Candidate,
        Self::Job,
        Self::Employee,
        Self::Invoice,
    ];

    /// The storage table holding records of this kind.
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Self::Lead => "crm_leads",
            Self::Contact => "crm_contacts",
            Self::Deal => "crm_deals",
            Self::Candidate => "ats_candidates",
            Self::Job => "ats_jobs",
            Self::Employee => "hr_employees",
            Self::Invoice => "finance_invoices",
        }
    }

    /// The product module this entity belongs to.
    #[must_use]
    pub fn module(self) -> Module {
        match self {
            Self::Lead | Self::Contact | Self::Deal => Module::Crm,
            Self::Candidate | Self::Job => Module::Ats,
            Self::Employee => Module::Hr,
            Self::Invoice => Module::Finance,
        }
    }

    /// The wire name used in events and webhook envelopes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Contact => "contact",
            Self::Deal => "deal",
            Self::Candidate => "candidate",
            Self::Job => "job",
            Self::Employee => "employee",
            Self::Invoice => "invoice",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown entity name.
#[derive(Debug, thiserror::Error)]
#[error("unknown entity: {0}")]
pub struct UnknownEntity(pub String);

impl FromStr for Entity {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.name() == s)
            .ok_or_else(|| UnknownEntity(s.to_string()))
    }
}
