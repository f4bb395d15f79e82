//! Request and response shapes for the node endpoints that carry contracts.
//!
//! Everything else the node returns is passed through as raw
//! [`serde_json::Value`] documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The 32-byte identifier of a chain instance, mixed into every signing
/// digest to prevent cross-chain replay.
pub type ChainId = [u8; 32];

/// The subset of `get_info` the client interprets, with everything else
/// preserved in `other`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChainInfo {
    /// Hex-encoded chain identifier.
    pub chain_id: String,
    /// Current head block number.
    #[serde(default)]
    pub head_block_num: u64,
    /// Latest irreversible block number.
    #[serde(default)]
    pub last_irreversible_block_num: u64,
    /// Current head block id.
    #[serde(default)]
    pub head_block_id: String,
    /// Current head block timestamp.
    #[serde(default)]
    pub head_block_time: String,
    /// Producer of the current head block.
    #[serde(default)]
    pub head_block_producer: String,
    /// Node software version.
    #[serde(default)]
    pub server_version: String,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A signed transaction in the form `push_transaction` accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedTransaction {
    /// Text-encoded signatures (`SIG_K1_…`).
    pub signatures: Vec<String>,
    /// Compression applied to `packed_trx`; this client never compresses.
    pub compression: u8,
    /// Hex-encoded packed context-free data.
    pub packed_context_free_data: String,
    /// Hex-encoded packed transaction bytes.
    pub packed_trx: String,
}

/// A contract's raw ABI, base64-decoded from `get_raw_code_and_abi`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAbi {
    /// The contract account.
    pub account_name: String,
    /// The ABI document bytes.
    pub abi: Vec<u8>,
}

/// Parameters for `get_table_rows`. [`GetTableRows::new`] fills the
/// defaults; adjust fields as needed before the call.
#[derive(Clone, Debug, Serialize)]
pub struct GetTableRows {
    /// Return rows as JSON rather than packed binary.
    pub json: bool,
    /// The contract account owning the table.
    pub code: String,
    /// The scope within the contract.
    pub scope: String,
    /// The table name.
    pub table: String,
    /// Deprecated by the node; kept for wire compatibility.
    pub table_key: String,
    /// Inclusive lower bound on the key.
    pub lower_bound: String,
    /// Inclusive upper bound on the key.
    pub upper_bound: String,
    /// Which index to walk, 1-based.
    pub index_position: u32,
    /// Key type of the chosen index.
    pub key_type: String,
    /// Maximum number of rows to return.
    pub limit: u32,
    /// Walk the index in reverse.
    pub reverse: bool,
    /// Include the RAM payer of each row.
    pub show_payer: bool,
}

impl GetTableRows {
    /// Parameters for reading `code`/`scope`/`table` with the node's
    /// defaults.
    pub fn new(code: &str, scope: &str, table: &str) -> Self {
        Self {
            json: true,
            code: code.to_owned(),
            scope: scope.to_owned(),
            table: table.to_owned(),
            table_key: String::new(),
            lower_bound: String::new(),
            upper_bound: String::new(),
            index_position: 1,
            key_type: String::new(),
            limit: 10,
            reverse: false,
            show_payer: false,
        }
    }
}
