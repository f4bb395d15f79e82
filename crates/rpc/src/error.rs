use serde::Deserialize;
use thiserror::Error;

/// Result type alias for [`Error`](enum@Error).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the node client and the signing pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP-level failure reaching the node.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// A response body could not be serialized or deserialized.
    #[error("json error: {0}")]
    Json(#[source] serde_json::Error),
    /// The node reported an execution failure.
    #[error(transparent)]
    Node(#[from] NodeError),
    /// A response carried a field the client could not interpret.
    #[error("malformed `{field}` in node response: {reason}")]
    MalformedResponse {
        /// The offending field.
        field: &'static str,
        /// Why it could not be interpreted.
        reason: String,
    },
    /// Wire-codec failure while packing the transaction.
    #[error(transparent)]
    Abi(#[from] antelope_abi::Error),
    /// Signing failure.
    #[error(transparent)]
    Signer(#[from] antelope_signer::Error),
}

impl Error {
    /// Wraps a [`serde_json::Error`].
    pub const fn json(err: serde_json::Error) -> Self {
        Self::Json(err)
    }

    /// The node-reported failure kind, when this error came from the node.
    pub fn node_kind(&self) -> Option<NodeErrorKind> {
        match self {
            Self::Node(node) => Some(node.kind()),
            _ => None,
        }
    }
}

/// The `error` document a node attaches to a failed (`code: 500`) response,
/// surfaced verbatim.
#[derive(Clone, Debug, Default, Deserialize, Error)]
#[error("node error {name}: {what}")]
pub struct NodeError {
    /// Numeric chain error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Symbolic failure name, e.g. `tx_cpu_usage_exceeded`.
    #[serde(default)]
    pub name: String,
    /// Human-readable summary.
    #[serde(default)]
    pub what: String,
    /// Structured failure details.
    #[serde(default)]
    pub details: serde_json::Value,
}

impl NodeError {
    /// Classifies the failure by its symbolic name.
    pub fn kind(&self) -> NodeErrorKind {
        match self.name.as_str() {
            "deadline_exception" => NodeErrorKind::Deadline,
            "action_validate_exception" => NodeErrorKind::ActionValidate,
            "tx_cpu_usage_exceeded" => NodeErrorKind::CpuUsageExceeded,
            "tx_net_usage_exceeded" => NodeErrorKind::NetUsageExceeded,
            "ram_usage_exceeded" => NodeErrorKind::RamUsageExceeded,
            "eosio_assert_message_exception" => NodeErrorKind::AssertMessage,
            "invalid_ref_block_exception" => NodeErrorKind::MissingTapos,
            _ => NodeErrorKind::Other,
        }
    }
}

/// Distinct node failure kinds the client recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeErrorKind {
    /// The transaction took longer than the node's deadline.
    Deadline,
    /// An action payload failed validation.
    ActionValidate,
    /// The payer has insufficient CPU staked.
    CpuUsageExceeded,
    /// The payer has insufficient net bandwidth staked.
    NetUsageExceeded,
    /// The payer has insufficient RAM.
    RamUsageExceeded,
    /// A contract assertion fired; the message is in the details.
    AssertMessage,
    /// The TAPOS reference-block fields are absent or stale.
    MissingTapos,
    /// Any failure the client does not classify further.
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_names() {
        let cases = [
            ("deadline_exception", NodeErrorKind::Deadline),
            ("action_validate_exception", NodeErrorKind::ActionValidate),
            ("tx_cpu_usage_exceeded", NodeErrorKind::CpuUsageExceeded),
            ("tx_net_usage_exceeded", NodeErrorKind::NetUsageExceeded),
            ("ram_usage_exceeded", NodeErrorKind::RamUsageExceeded),
            ("eosio_assert_message_exception", NodeErrorKind::AssertMessage),
            ("invalid_ref_block_exception", NodeErrorKind::MissingTapos),
            ("everything_is_fine", NodeErrorKind::Other),
            ("", NodeErrorKind::Other),
        ];
        for (name, kind) in cases {
            let error = NodeError { name: name.to_owned(), ..NodeError::default() };
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn parses_a_node_error_document() {
        let error: NodeError = serde_json::from_value(serde_json::json!({
            "code": 3080004,
            "name": "tx_cpu_usage_exceeded",
            "what": "Transaction exceeded the current CPU usage limit",
            "details": [{"message": "billed CPU time"}],
        }))
        .unwrap();
        assert_eq!(error.code, Some(3080004));
        assert_eq!(error.kind(), NodeErrorKind::CpuUsageExceeded);
        assert!(error.to_string().contains("tx_cpu_usage_exceeded"));
    }

    #[test]
    fn tolerates_a_bare_error_document() {
        let error: NodeError =
            serde_json::from_value(serde_json::json!({"name": "ram_usage_exceeded"})).unwrap();
        assert_eq!(error.kind(), NodeErrorKind::RamUsageExceeded);
    }
}
