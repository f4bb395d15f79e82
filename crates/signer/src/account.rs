//! Accounts: a name bound to key material.
//!
//! On this chain a public key is not an address; an account is named, and
//! its keys hang off permissions such as `owner` and `active`. This module
//! carries the name/key pairing and builds the permission structures other
//! components consume.

use crate::{PrivateKey, PublicKey};
use antelope_abi::Name;
use antelope_chain::{KeyWeight, PermissionLevel, PermissionLevelWeight};
use std::fmt;

/// Key material held for an account: either a full key pair or only the
/// public half (enough to verify and to build authorities, never to sign).
#[derive(Clone, PartialEq, Eq)]
pub enum AccountKey {
    /// A private key; the public half derives from it.
    Private(PrivateKey),
    /// A public key only.
    Public(PublicKey),
}

impl AccountKey {
    /// Returns the public half.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Private(key) => key.public_key(),
            Self::Public(key) => *key,
        }
    }

    /// Returns the private key, when one is held.
    pub const fn private_key(&self) -> Option<&PrivateKey> {
        match self {
            Self::Private(key) => Some(key),
            Self::Public(_) => None,
        }
    }
}

impl From<PrivateKey> for AccountKey {
    fn from(key: PrivateKey) -> Self {
        Self::Private(key)
    }
}

impl From<PublicKey> for AccountKey {
    fn from(key: PublicKey) -> Self {
        Self::Public(key)
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Defer to the inner Debug impls; the private one is redacted.
        match self {
            Self::Private(key) => key.fmt(f),
            Self::Public(key) => key.fmt(f),
        }
    }
}

/// An account on the chain, with the key that controls it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// The account's name.
    pub name: Name,
    /// The controlling key.
    pub key: AccountKey,
}

impl Account {
    /// Binds `name` to existing key material.
    pub fn new(name: Name, key: impl Into<AccountKey>) -> Self {
        Self { name, key: key.into() }
    }

    /// Binds `name` to a freshly generated key pair.
    pub fn generate(name: Name) -> Self {
        Self::new(name, PrivateKey::random())
    }

    /// The permission level `name@permission`.
    pub const fn authorization(&self, permission: Name) -> PermissionLevel {
        PermissionLevel::new(self.name, permission)
    }

    /// A weighted delegation of `name@permission` for use in an authority.
    pub const fn permission_level_weight(
        &self,
        permission: Name,
        weight: u16,
    ) -> PermissionLevelWeight {
        PermissionLevelWeight { permission: self.authorization(permission), weight }
    }

    /// This account's key in wire form, weighted for use in an authority.
    pub fn key_weight(&self, weight: u16) -> KeyWeight {
        self.key.public_key().to_key_weight(weight)
    }
}
