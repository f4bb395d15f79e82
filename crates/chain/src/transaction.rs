//! Transactions and transaction extensions.

use crate::Action;
use antelope_abi::{Bytes, Pack, Result, TimePointSec, Unpack, VarUint};

/// An opaque protocol extension attached to a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extension {
    /// Discriminator assigned by the protocol.
    pub extension_type: u16,
    /// Extension payload.
    pub data: Bytes,
}

impl Pack for Extension {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.extension_type.pack(out)?;
        self.data.pack(out)
    }
}

impl Unpack for Extension {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let extension_type = u16::unpack(buf)?;
        let data = Bytes::unpack(buf)?;
        Ok(Self { extension_type, data })
    }
}

/// A transaction: expiration, TAPOS reference-block binding, resource
/// limits, and the actions to execute.
///
/// `Default` leaves `expiration` at the Unix epoch, which every chain
/// rejects as already expired; callers must choose a real expiration
/// deliberately rather than inherit a wall-clock guess.
///
/// `ref_block_num` and `ref_block_prefix` bind the transaction to a recent
/// block; a node refuses transactions without them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    /// Instant after which a node refuses the transaction.
    pub expiration: TimePointSec,
    /// Low 16 bits of the referenced block number.
    pub ref_block_num: u16,
    /// Prefix drawn from the referenced block's id.
    pub ref_block_prefix: u32,
    /// Upper bound on net usage, in 8-byte words; zero means no cap.
    pub max_net_usage_words: VarUint,
    /// Upper bound on CPU usage, in milliseconds; zero means no cap.
    pub max_cpu_usage_ms: u8,
    /// Seconds to delay execution after inclusion.
    pub delay_sec: VarUint,
    /// Actions executed without authorization checks.
    pub context_free_actions: Vec<Action>,
    /// Actions to execute, in order.
    pub actions: Vec<Action>,
    /// Protocol extensions.
    pub transaction_extensions: Vec<Extension>,
}

impl Pack for Transaction {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.expiration.pack(out)?;
        self.ref_block_num.pack(out)?;
        self.ref_block_prefix.pack(out)?;
        self.max_net_usage_words.pack(out)?;
        self.max_cpu_usage_ms.pack(out)?;
        self.delay_sec.pack(out)?;
        self.context_free_actions.pack(out)?;
        self.actions.pack(out)?;
        self.transaction_extensions.pack(out)
    }
}

impl Unpack for Transaction {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let expiration = TimePointSec::unpack(buf)?;
        let ref_block_num = u16::unpack(buf)?;
        let ref_block_prefix = u32::unpack(buf)?;
        let max_net_usage_words = VarUint::unpack(buf)?;
        let max_cpu_usage_ms = u8::unpack(buf)?;
        let delay_sec = VarUint::unpack(buf)?;
        let context_free_actions = Vec::unpack(buf)?;
        let actions = Vec::unpack(buf)?;
        let transaction_extensions = Vec::unpack(buf)?;
        Ok(Self {
            expiration,
            ref_block_num,
            ref_block_prefix,
            max_net_usage_words,
            max_cpu_usage_ms,
            delay_sec,
            context_free_actions,
            actions,
            transaction_extensions,
        })
    }
}
