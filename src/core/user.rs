//! User profile entity and address-book rules
//!
//! The address book keeps at most one default entry; `default_address` is
//! the comma-joined rendering of that entry and is what checkout flows
//! prefill. The rules for electing and re-electing the default live here so
//! the service layer stays a thin persistence wrapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved delivery address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub is_default: bool,
}

impl Address {
    /// Comma-joined rendering, skipping empty parts
    pub fn joined(&self) -> String {
        [&self.street, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A user profile, keyed by an opaque identity-provider uid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque uid assigned by the identity provider
    pub id: String,
    pub name: String,
    pub email: String,
    pub addresses: Vec<Address>,
    /// Comma-joined rendering of the default address, empty when none
    pub default_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            addresses: Vec::new(),
            default_address: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The current default entry, if any
    pub fn default_entry(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Add a new address or edit an existing one.
    ///
    /// When the incoming entry is marked default it becomes the single
    /// default and `default_address` is refreshed. Returns `false` when
    /// `address_id` was given but matches nothing.
    pub fn upsert_address(&mut self, address: Address) -> bool {
        let make_default = address.is_default;
        let id = address.id;

        match self.addresses.iter_mut().find(|a| a.id == id) {
            Some(existing) => *existing = address,
            None => self.addresses.push(address),
        }

        if make_default {
            for a in &mut self.addresses {
                a.is_default = a.id == id;
            }
        }
        self.refresh_default_address();
        true
    }

    /// Remove an address by id.
    ///
    /// When the removed entry was the default and entries remain, the first
    /// remaining entry is elected default. Returns `false` when the id
    /// matches nothing.
    pub fn remove_address(&mut self, address_id: &Uuid) -> bool {
        let Some(pos) = self.addresses.iter().position(|a| &a.id == address_id) else {
            return false;
        };
        let removed = self.addresses.remove(pos);

        if removed.is_default {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
            }
        }
        self.refresh_default_address();
        true
    }

    /// Backfill a default when addresses exist but none is elected.
    pub fn ensure_default(&mut self) -> bool {
        if self.default_entry().is_none() {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
                self.refresh_default_address();
                return true;
            }
        }
        false
    }

    fn refresh_default_address(&mut self) {
        self.default_address = self
            .default_entry()
            .map(Address::joined)
            .unwrap_or_default();
    }
}
