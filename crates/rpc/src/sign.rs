//! The transaction signing pipeline.

use crate::{ChainId, PackedTransaction, Result, RpcClient};
use antelope_abi::Name;
use antelope_chain::{Action, ActionData, Transaction};
use antelope_signer::PrivateKey;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// The node surface the signing pipeline depends on.
///
/// [`RpcClient`] implements it over HTTP; tests substitute their own.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Translates a JSON action payload into packed binary using the
    /// contract's on-chain ABI.
    async fn abi_json_to_bin(&self, code: Name, action: Name, args: &Value) -> Result<Vec<u8>>;

    /// The 32-byte chain identifier mixed into every signing digest.
    async fn chain_id(&self) -> Result<ChainId>;
}

#[async_trait]
impl ChainApi for RpcClient {
    async fn abi_json_to_bin(&self, code: Name, action: Name, args: &Value) -> Result<Vec<u8>> {
        Self::abi_json_to_bin(self, code, action, args).await
    }

    async fn chain_id(&self) -> Result<ChainId> {
        self.get_chain_id().await
    }
}

/// Signs `transaction` with `keys`, using an all-zero context-free-data
/// digest.
///
/// See [`sign_transaction_with_context`] for the full contract.
pub async fn sign_transaction<A: ChainApi + ?Sized>(
    api: &A,
    transaction: &mut Transaction,
    keys: &[PrivateKey],
) -> Result<PackedTransaction> {
    sign_transaction_with_context(api, transaction, keys, [0u8; 32]).await
}

/// Signs `transaction` with `keys` over an explicit context-free-data
/// digest.
///
/// Any action payload still in JSON form is first translated to binary by
/// the node; translations run concurrently and land back on their
/// originating actions, so action order — and with it the packed byte
/// sequence — is preserved. The transaction is then packed, the signing
/// digest `sha256(chain_id || packed_tx || context_free_digest)` is
/// computed, and every key contributes one text-encoded signature.
///
/// The payload translations mutate `transaction` in place; pass a copy if
/// the original must survive. A future dropped mid-call may leave some but
/// not all payloads translated — treat the record as poisoned and rebuild
/// it. Nothing is ever signed for a transaction that failed translation.
pub async fn sign_transaction_with_context<A: ChainApi + ?Sized>(
    api: &A,
    transaction: &mut Transaction,
    keys: &[PrivateKey],
    context_free_digest: [u8; 32],
) -> Result<PackedTransaction> {
    translate_payloads(api, &mut transaction.context_free_actions).await?;
    translate_payloads(api, &mut transaction.actions).await?;

    let chain_id = api.chain_id().await?;
    let packed_tx = antelope_abi::pack(transaction)?;

    let mut hasher = Sha256::new();
    hasher.update(chain_id);
    hasher.update(&packed_tx);
    hasher.update(context_free_digest);
    let digest: [u8; 32] = hasher.finalize().into();

    let signatures = keys
        .iter()
        .map(|key| Ok(key.sign(&digest)?.to_string()))
        .collect::<Result<Vec<_>>>()?;

    Ok(PackedTransaction {
        signatures,
        compression: 0,
        packed_context_free_data: String::new(),
        packed_trx: hex::encode(packed_tx),
    })
}

/// Replaces every JSON payload in `actions` with node-translated bytes,
/// concurrently but position-stable.
async fn translate_payloads<A: ChainApi + ?Sized>(
    api: &A,
    actions: &mut [Action],
) -> Result<()> {
    let pending: Vec<(usize, Name, Name, Value)> = actions
        .iter()
        .enumerate()
        .filter_map(|(index, action)| match &action.data {
            ActionData::Json(args) => {
                Some((index, action.account, action.name, args.clone()))
            }
            _ => None,
        })
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let translated = try_join_all(
        pending.iter().map(|(_, code, name, args)| api.abi_json_to_bin(*code, *name, args)),
    )
    .await?;

    for ((index, ..), bytes) in pending.into_iter().zip(translated) {
        actions[index].data = ActionData::raw(bytes);
    }
    Ok(())
}
