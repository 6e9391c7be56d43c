//! Contacts referenced by policies and payments

use serde::{Deserialize, Serialize};

use core_kernel::ContactId;

/// Role a contact plays on a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRole {
    /// Selling agent
    Agent,
    /// Insured party, the default payer
    #[serde(rename = "Named Insured")]
    NamedInsured,
}

/// A person or organisation attached to a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub role: ContactRole,
}

impl Contact {
    pub fn new(name: impl Into<String>, role: ContactRole) -> Self {
        Self {
            id: ContactId::new_v7(),
            name: name.into(),
            role,
        }
    }

    pub fn agent(name: impl Into<String>) -> Self {
        Self::new(name, ContactRole::Agent)
    }

    pub fn named_insured(name: impl Into<String>) -> Self {
        Self::new(name, ContactRole::NamedInsured)
    }
}
