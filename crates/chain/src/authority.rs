//! Permission structures: who may act, and with what weight.

use antelope_abi::{Bytes, Name, Pack, Result, Unpack};
use serde::{Deserialize, Serialize};

/// An actor and the permission it acts under, e.g. `alice@active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// The acting account.
    pub actor: Name,
    /// The permission of that account being exercised.
    pub permission: Name,
}

impl PermissionLevel {
    /// Creates a permission level.
    pub const fn new(actor: Name, permission: Name) -> Self {
        Self { actor, permission }
    }
}

impl Pack for PermissionLevel {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.actor.pack(out)?;
        self.permission.pack(out)
    }
}

impl Unpack for PermissionLevel {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let actor = Name::unpack(buf)?;
        let permission = Name::unpack(buf)?;
        Ok(Self { actor, permission })
    }
}

/// A public key and its voting weight within an [`Authority`].
///
/// `key` carries the key in its wire encoding (key-type byte followed by the
/// 33-byte compressed point), ready to serialize.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWeight {
    /// Wire-encoded public key.
    pub key: Bytes,
    /// Weight this key contributes towards the authority's threshold.
    pub weight: u16,
}

impl Pack for KeyWeight {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.key.pack(out)?;
        self.weight.pack(out)
    }
}

impl Unpack for KeyWeight {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let key = Bytes::unpack(buf)?;
        let weight = u16::unpack(buf)?;
        Ok(Self { key, weight })
    }
}

/// A permission level of another account and its weight within an
/// [`Authority`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevelWeight {
    /// The delegated permission.
    pub permission: PermissionLevel,
    /// Weight the delegation contributes towards the threshold.
    pub weight: u16,
}

impl Pack for PermissionLevelWeight {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.permission.pack(out)?;
        self.weight.pack(out)
    }
}

impl Unpack for PermissionLevelWeight {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let permission = PermissionLevel::unpack(buf)?;
        let weight = u16::unpack(buf)?;
        Ok(Self { permission, weight })
    }
}

/// A time delay and its weight within an [`Authority`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitWeight {
    /// Seconds that must elapse before the weight applies.
    pub wait_sec: u32,
    /// Weight the wait contributes towards the threshold.
    pub weight: u16,
}

impl Pack for WaitWeight {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.wait_sec.pack(out)?;
        self.weight.pack(out)
    }
}

impl Unpack for WaitWeight {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let wait_sec = u32::unpack(buf)?;
        let weight = u16::unpack(buf)?;
        Ok(Self { wait_sec, weight })
    }
}

/// The weighted set of keys, accounts and waits controlling a permission.
///
/// An authority is satisfied once the weights of its signing participants
/// reach `threshold`. The default is a threshold of one with no
/// participants; callers add keys or accounts before use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    /// Combined weight required to authorize.
    pub threshold: u32,
    /// Weighted public keys.
    pub keys: Vec<KeyWeight>,
    /// Weighted permission levels of other accounts.
    pub accounts: Vec<PermissionLevelWeight>,
    /// Weighted time delays.
    pub waits: Vec<WaitWeight>,
}

impl Default for Authority {
    fn default() -> Self {
        Self { threshold: 1, keys: Vec::new(), accounts: Vec::new(), waits: Vec::new() }
    }
}

impl Authority {
    /// An authority satisfied by a single key with weight one.
    pub fn single_key(key: KeyWeight) -> Self {
        Self { keys: vec![key], ..Self::default() }
    }
}

impl Pack for Authority {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.threshold.pack(out)?;
        self.keys.pack(out)?;
        self.accounts.pack(out)?;
        self.waits.pack(out)
    }
}

impl Unpack for Authority {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let threshold = u32::unpack(buf)?;
        let keys = Vec::unpack(buf)?;
        let accounts = Vec::unpack(buf)?;
        let waits = Vec::unpack(buf)?;
        Ok(Self { threshold, keys, accounts, waits })
    }
}
