//! The node REST client.

use crate::{
    sign, ChainId, ChainInfo, Error, GetTableRows, NodeError, PackedTransaction, RawAbi, Result,
};
use antelope_abi::Name;
use antelope_chain::Transaction;
use antelope_signer::PrivateKey;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;

/// A client for one chain node's REST API.
///
/// Cheap to clone is not a goal here; create one per node and share it by
/// reference. The only mutable state is the chain-id cache, which is
/// write-once after the first `get_info` round trip.
#[derive(Debug)]
pub struct RpcClient {
    client: reqwest::Client,
    url: Url,
    chain_id: OnceCell<ChainId>,
}

impl RpcClient {
    /// Creates a client for the node at `url` (scheme and authority only,
    /// e.g. `http://127.0.0.1:8888`).
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a client reusing an existing [`reqwest::Client`] (connection
    /// pools, proxies, timeouts).
    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url, chain_id: OnceCell::new() }
    }

    /// The node this client talks to.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/v1{endpoint}", self.url.as_str().trim_end_matches('/'))
    }

    /// Posts a JSON body to `/v1{endpoint}` and deserializes the response.
    ///
    /// The node signals execution failures in the body rather than the
    /// status line: any response document whose top-level `code` is 500 is
    /// surfaced as [`Error::Node`].
    pub async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: Value) -> Result<T> {
        let url = self.endpoint_url(endpoint);
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%url, %status, bytes = bytes.len(), "node response");
        trace!(body = %String::from_utf8_lossy(&bytes), "node response body");

        let document: Value = serde_json::from_slice(&bytes).map_err(Error::json)?;
        if let Some(error) = node_error(&document) {
            return Err(error.into());
        }
        serde_json::from_value(document).map_err(Error::json)
    }

    /// `get_info`: node status, typed where the client interprets it.
    pub async fn get_info(&self) -> Result<ChainInfo> {
        self.post("/chain/get_info", json!({})).await
    }

    /// The chain identifier, fetched once and cached for the lifetime of
    /// this client.
    pub async fn get_chain_id(&self) -> Result<ChainId> {
        self.chain_id
            .get_or_try_init(|| async {
                let info = self.get_info().await?;
                parse_chain_id(&info.chain_id)
            })
            .await
            .copied()
    }

    /// `abi_json_to_bin`: asks the node to translate a JSON action payload
    /// into packed binary using the contract's on-chain ABI.
    pub async fn abi_json_to_bin(
        &self,
        code: Name,
        action: Name,
        args: &Value,
    ) -> Result<Vec<u8>> {
        #[derive(serde::Deserialize)]
        struct Binargs {
            binargs: String,
        }
        let response: Binargs = self
            .post(
                "/chain/abi_json_to_bin",
                json!({"code": code, "action": action, "args": args}),
            )
            .await?;
        hex::decode(&response.binargs).map_err(|err| Error::MalformedResponse {
            field: "binargs",
            reason: err.to_string(),
        })
    }

    /// `get_abi` for an account.
    pub async fn get_abi(&self, account_name: &str) -> Result<Value> {
        self.post("/chain/get_abi", json!({"account_name": account_name})).await
    }

    /// `get_account` details.
    pub async fn get_account(&self, account_name: &str) -> Result<Value> {
        self.post("/chain/get_account", json!({"account_name": account_name})).await
    }

    /// `get_block_header_state` of a block in the reversible window.
    pub async fn get_block_header_state(
        &self,
        block_num_or_id: impl Serialize,
    ) -> Result<Value> {
        self.post("/chain/get_block_header_state", json!({"block_num_or_id": block_num_or_id}))
            .await
    }

    /// `get_block` by number or id.
    pub async fn get_block(&self, block_num_or_id: impl Serialize) -> Result<Value> {
        self.post("/chain/get_block", json!({"block_num_or_id": block_num_or_id})).await
    }

    /// The current head block, via `get_info` then `get_block`.
    pub async fn get_head_block(&self) -> Result<Value> {
        let info = self.get_info().await?;
        self.get_block(info.head_block_num).await
    }

    /// `get_code` of a contract account.
    pub async fn get_code(&self, account_name: &str) -> Result<Value> {
        self.post("/chain/get_code", json!({"account_name": account_name})).await
    }

    /// `get_currency_balance` for one symbol.
    pub async fn get_currency_balance(
        &self,
        code: &str,
        account: &str,
        symbol: &str,
    ) -> Result<Value> {
        self.post(
            "/chain/get_currency_balance",
            json!({"code": code, "account": account, "symbol": symbol}),
        )
        .await
    }

    /// `get_currency_stats` for one symbol.
    pub async fn get_currency_stats(&self, code: &str, symbol: &str) -> Result<Value> {
        self.post("/chain/get_currency_stats", json!({"code": code, "symbol": symbol})).await
    }

    /// `get_producer_schedule`.
    pub async fn get_producer_schedule(&self) -> Result<Value> {
        self.post("/chain/get_producer_schedule", json!({})).await
    }

    /// `get_producers`, paged from `lower_bound`.
    pub async fn get_producers(&self, lower_bound: &str, limit: u32) -> Result<Value> {
        self.post(
            "/chain/get_producers",
            json!({"json": true, "lower_bound": lower_bound, "limit": limit}),
        )
        .await
    }

    /// `get_raw_code_and_abi`, as the node returns it (base64 fields).
    pub async fn get_raw_code_and_abi(&self, account_name: &str) -> Result<Value> {
        self.post("/chain/get_raw_code_and_abi", json!({"account_name": account_name})).await
    }

    /// A contract's raw ABI bytes, base64-decoded.
    pub async fn get_raw_abi(&self, account_name: &str) -> Result<RawAbi> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            account_name: String,
            #[serde(default)]
            abi: String,
        }
        let response: Response = self
            .post("/chain/get_raw_code_and_abi", json!({"account_name": account_name}))
            .await?;
        let abi = BASE64.decode(response.abi.as_bytes()).map_err(|err| {
            Error::MalformedResponse { field: "abi", reason: err.to_string() }
        })?;
        Ok(RawAbi { account_name: response.account_name, abi })
    }

    /// `get_table_rows` with explicit parameters.
    pub async fn get_table_rows(&self, params: &GetTableRows) -> Result<Value> {
        let body = serde_json::to_value(params).map_err(Error::json)?;
        self.post("/chain/get_table_rows", body).await
    }

    /// `get_table_by_scope`, paged between the bounds.
    pub async fn get_table_by_scope(
        &self,
        code: &str,
        table: &str,
        lower_bound: &str,
        upper_bound: &str,
        limit: u32,
    ) -> Result<Value> {
        self.post(
            "/chain/get_table_by_scope",
            json!({
                "code": code,
                "table": table,
                "lower_bound": lower_bound,
                "upper_bound": upper_bound,
                "limit": limit,
            }),
        )
        .await
    }

    /// `get_required_keys` for a transaction document.
    pub async fn get_required_keys(
        &self,
        transaction: &Value,
        available_keys: &[String],
    ) -> Result<Value> {
        self.post(
            "/chain/get_required_keys",
            json!({"transaction": transaction, "available_keys": available_keys}),
        )
        .await
    }

    /// `get` on the `db_size` plugin.
    pub async fn get_db_size(&self) -> Result<Value> {
        self.post("/db_size/get", json!({})).await
    }

    /// `get_actions` from the history plugin.
    pub async fn get_actions(
        &self,
        account_name: &str,
        pos: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Value> {
        self.post(
            "/history/get_actions",
            json!({"account_name": account_name, "pos": pos, "offset": offset}),
        )
        .await
    }

    /// `get_transaction` from the history plugin.
    pub async fn get_transaction(
        &self,
        id: &str,
        block_num_hint: Option<u64>,
    ) -> Result<Value> {
        self.post("/history/get_transaction", json!({"id": id, "block_num_hint": block_num_hint}))
            .await
    }

    /// `get_key_accounts`: accounts controlled by a public key.
    pub async fn get_key_accounts(&self, public_key: &str) -> Result<Value> {
        self.post("/history/get_key_accounts", json!({"public_key": public_key})).await
    }

    /// `get_controlled_accounts`: accounts controlled by another account.
    pub async fn get_controlled_accounts(&self, account_name: &str) -> Result<Value> {
        self.post(
            "/history/get_controlled_accounts",
            json!({"controlling_account": account_name}),
        )
        .await
    }

    /// Signs `transaction` with `keys`, leaving it packed and ready for
    /// [`push_transaction`](Self::push_transaction).
    ///
    /// See [`sign_transaction`](crate::sign_transaction) for the pipeline's
    /// contract, including how it mutates `transaction`.
    pub async fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        keys: &[PrivateKey],
    ) -> Result<PackedTransaction> {
        sign::sign_transaction(self, transaction, keys).await
    }

    /// `push_transaction`: submits a packed, signed transaction.
    pub async fn push_transaction(&self, packed: &PackedTransaction) -> Result<Value> {
        let body = serde_json::to_value(packed).map_err(Error::json)?;
        self.post("/chain/push_transaction", body).await
    }

    /// Signs and immediately submits a transaction.
    pub async fn sign_and_push_transaction(
        &self,
        transaction: &mut Transaction,
        keys: &[PrivateKey],
    ) -> Result<Value> {
        let packed = self.sign_transaction(transaction, keys).await?;
        self.push_transaction(&packed).await
    }
}

/// Recognizes the node's in-body failure signal.
fn node_error(document: &Value) -> Option<NodeError> {
    if document.get("code")?.as_i64()? != 500 {
        return None;
    }
    let error = document.get("error").cloned().unwrap_or_default();
    Some(serde_json::from_value(error).unwrap_or_default())
}

fn parse_chain_id(hex_str: &str) -> Result<ChainId> {
    let bytes = hex::decode(hex_str).map_err(|err| Error::MalformedResponse {
        field: "chain_id",
        reason: err.to_string(),
    })?;
    ChainId::try_from(bytes.as_slice()).map_err(|_| Error::MalformedResponse {
        field: "chain_id",
        reason: format!("expected 32 bytes, got {}", bytes.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_get_the_version_prefix() {
        let client = RpcClient::new("http://127.0.0.1:8888".parse().unwrap());
        assert_eq!(
            client.endpoint_url("/chain/get_info"),
            "http://127.0.0.1:8888/v1/chain/get_info"
        );

        let trailing = RpcClient::new("http://127.0.0.1:8888/".parse().unwrap());
        assert_eq!(
            trailing.endpoint_url("/chain/get_info"),
            "http://127.0.0.1:8888/v1/chain/get_info"
        );
    }

    #[test]
    fn code_500_bodies_are_failures() {
        let error = node_error(&json!({
            "code": 500,
            "error": {"name": "ram_usage_exceeded"},
        }))
        .unwrap();
        assert_eq!(error.kind(), crate::NodeErrorKind::RamUsageExceeded);

        // An unclassified name still fails, generically.
        let error = node_error(&json!({
            "code": 500,
            "error": {"name": "everything_is_fine"},
        }))
        .unwrap();
        assert_eq!(error.kind(), crate::NodeErrorKind::Other);

        // A 500 with no error document at all still fails.
        assert!(node_error(&json!({"code": 500})).is_some());
    }

    #[test]
    fn ordinary_bodies_are_not_failures() {
        assert!(node_error(&json!({"ok": "yes"})).is_none());
        assert!(node_error(&json!({"code": 200})).is_none());
        assert!(node_error(&json!(["an", "array"])).is_none());
        assert!(node_error(&json!({"code": "500"})).is_none());
    }

    #[test]
    fn chain_ids_must_be_32_bytes() {
        let full = "7479dd536fa543a6e5faafe8f90132f8d1aab58c746d7d7a4e01c10ea091e25a";
        assert_eq!(parse_chain_id(full).unwrap()[..4], [0x74, 0x79, 0xdd, 0x53]);
        assert!(parse_chain_id("00aabbbccc").is_err());
        assert!(parse_chain_id("not hex").is_err());
    }
}
