//! Contract actions and their payloads.

use crate::PermissionLevel;
use antelope_abi::{Bytes, Error, Name, Pack, Result, Unpack};
use std::{fmt, sync::Arc};

/// An object-safe packable record, used for typed action payloads.
///
/// Any record implementing [`Pack`] qualifies. The trait object carries the
/// record's own codec with it, so an [`Action`] can serialize a payload whose
/// concrete type it does not know.
pub trait AbiData: Pack + fmt::Debug + Send + Sync {}

impl<T: Pack + fmt::Debug + Send + Sync> AbiData for T {}

/// The payload of an [`Action`], in one of three states.
///
/// The codec accepts `Raw` and `Typed` payloads. `Json` payloads exist only
/// between the application and the signing pipeline, which replaces them
/// with node-translated raw bytes; packing one directly is an error.
#[derive(Clone, Debug)]
pub enum ActionData {
    /// Already-serialized opaque payload bytes.
    Raw(Bytes),
    /// A typed record, serialized in place when the action is packed.
    Typed(Arc<dyn AbiData>),
    /// A JSON mapping not yet translated into binary form.
    Json(serde_json::Value),
}

impl ActionData {
    /// Wraps already-serialized payload bytes.
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Self::Raw(bytes.into())
    }

    /// Wraps a typed record to serialize in place.
    pub fn typed(data: impl AbiData + 'static) -> Self {
        Self::Typed(Arc::new(data))
    }

    /// Wraps a JSON mapping for node-side translation.
    pub fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Whether this payload still needs node-side translation.
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// The raw payload bytes, when already serialized.
    pub const fn as_raw(&self) -> Option<&Bytes> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl Default for ActionData {
    fn default() -> Self {
        Self::Raw(Bytes::default())
    }
}

impl From<Bytes> for ActionData {
    fn from(bytes: Bytes) -> Self {
        Self::Raw(bytes)
    }
}

impl From<Vec<u8>> for ActionData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes.into())
    }
}

impl From<serde_json::Value> for ActionData {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl PartialEq for ActionData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Raw(a), Self::Raw(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Typed(a), Self::Typed(b)) => {
                matches!((a.packed(), b.packed()), (Ok(a), Ok(b)) if a == b)
            }
            _ => false,
        }
    }
}

impl Pack for ActionData {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Self::Raw(bytes) => bytes.pack(out),
            Self::Typed(data) => Bytes::from(data.packed()?).pack(out),
            Self::Json(_) => Err(Error::UnresolvedActionData),
        }
    }
}

impl Unpack for ActionData {
    /// Action payloads decode as opaque bytes; an arbitrary contract's
    /// schema is not known here, so interpretation is left to callers that
    /// hold one.
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        Ok(Self::Raw(Bytes::unpack(buf)?))
    }
}

/// A single contract action: which contract, which action, authorized by
/// whom, with what payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Action {
    /// The contract account the action belongs to.
    pub account: Name,
    /// The action's name within that contract.
    pub name: Name,
    /// Permission levels authorizing the action.
    pub authorization: Vec<PermissionLevel>,
    /// The action payload.
    pub data: ActionData,
}

impl Action {
    /// Creates an action.
    pub fn new(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: impl Into<ActionData>,
    ) -> Self {
        Self { account, name, authorization, data: data.into() }
    }
}

impl Pack for Action {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.account.pack(out)?;
        self.name.pack(out)?;
        self.authorization.pack(out)?;
        self.data.pack(out)
    }
}

impl Unpack for Action {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let account = Name::unpack(buf)?;
        let name = Name::unpack(buf)?;
        let authorization = Vec::unpack(buf)?;
        let data = ActionData::unpack(buf)?;
        Ok(Self { account, name, authorization, data })
    }
}
