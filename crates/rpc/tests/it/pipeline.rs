//! Signing-pipeline tests against an in-process node stub.

use antelope_abi::{Name, Pack, TimePointSec};
use antelope_chain::{Action, ActionData, PermissionLevel, Transaction};
use antelope_rpc::{sign_transaction, ChainApi, ChainId, Error, Result};
use antelope_signer::{PrivateKey, Signature};
use async_trait::async_trait;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The signing key of `eostest12345`.
const TEST_WIF: &str = "5JeaxignXEg3mGwvgmwxG6w6wHcRp9ooPw81KjrP2ah6TWSECDN";

/// Packed form of the fixture transaction below, with its one-byte payload
/// translated to `03`.
const EXPECTED_PACKED_TRX: &str = concat!(
    "a8aaca5d0300040000000000000001",
    "1032561960aaa833000000000090b1ca01",
    "50c810216395315500000000a8ed3232010300"
);

const CHAIN_ID_HEX: &str = "7479dd536fa543a6e5faafe8f90132f8d1aab58c746d7d7a4e01c10ea091e25a";

struct NodeStub {
    chain_id: ChainId,
    binargs: Vec<u8>,
    translations: AtomicUsize,
}

impl NodeStub {
    fn new() -> Self {
        let mut chain_id = [0u8; 32];
        chain_id.copy_from_slice(&hex::decode(CHAIN_ID_HEX).unwrap());
        Self { chain_id, binargs: vec![0x03], translations: AtomicUsize::new(0) }
    }

    fn translations(&self) -> usize {
        self.translations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainApi for NodeStub {
    async fn abi_json_to_bin(
        &self,
        _code: Name,
        _action: Name,
        args: &Value,
    ) -> Result<Vec<u8>> {
        if args.get("poison").is_some() {
            return Err(Error::MalformedResponse {
                field: "binargs",
                reason: "stubbed failure".into(),
            });
        }
        self.translations.fetch_add(1, Ordering::SeqCst);
        Ok(self.binargs.clone())
    }

    async fn chain_id(&self) -> Result<ChainId> {
        Ok(self.chain_id)
    }
}

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

fn fixture_transaction(data: impl Into<ActionData>) -> Transaction {
    Transaction {
        expiration: TimePointSec::from_secs(1_573_563_048),
        ref_block_num: 3,
        ref_block_prefix: 4,
        actions: vec![Action::new(
            name("aioeos.test1"),
            name("test"),
            vec![PermissionLevel::new(name("eostest12345"), name("active"))],
            data,
        )],
        ..Transaction::default()
    }
}

/// Recomputes the signing digest and checks the emitted signature against
/// the signer's public key.
fn assert_signature_binds(packed: &antelope_rpc::PackedTransaction, key: &PrivateKey) {
    let tx_bytes = hex::decode(&packed.packed_trx).unwrap();
    let mut hasher = Sha256::new();
    hasher.update(hex::decode(CHAIN_ID_HEX).unwrap());
    hasher.update(&tx_bytes);
    hasher.update([0u8; 32]);
    let digest = hasher.finalize();

    let [signature_text] = packed.signatures.as_slice() else {
        panic!("expected exactly one signature");
    };
    let signature: Signature = signature_text.parse().unwrap();
    assert!(signature.is_canonical());
    assert!((31..=34).contains(&signature.recovery_byte()));
    assert!(key.public_key().verify(&signature, &digest));
    assert_eq!(signature.recover(&digest).unwrap(), key.public_key());
}

#[tokio::test]
async fn signs_a_json_payload_transaction() {
    let node = NodeStub::new();
    let key: PrivateKey = TEST_WIF.parse().unwrap();
    let mut transaction = fixture_transaction(ActionData::json(json!({"a": 3})));

    let packed = sign_transaction(&node, &mut transaction, std::slice::from_ref(&key))
        .await
        .unwrap();

    assert_eq!(packed.packed_trx, EXPECTED_PACKED_TRX);
    assert_eq!(packed.compression, 0);
    assert_eq!(packed.packed_context_free_data, "");
    assert_eq!(node.translations(), 1);
    // The payload was resolved in place.
    assert_eq!(
        transaction.actions[0].data.as_raw().unwrap().as_slice(),
        [0x03]
    );
    assert_signature_binds(&packed, &key);
}

#[tokio::test]
async fn signs_a_raw_payload_without_touching_the_node() {
    let node = NodeStub::new();
    let key: PrivateKey = TEST_WIF.parse().unwrap();
    let mut transaction = fixture_transaction(vec![0x03]);

    let packed = sign_transaction(&node, &mut transaction, std::slice::from_ref(&key))
        .await
        .unwrap();

    assert_eq!(packed.packed_trx, EXPECTED_PACKED_TRX);
    assert_eq!(node.translations(), 0);
    assert_signature_binds(&packed, &key);
}

#[tokio::test]
async fn signs_a_typed_payload_locally() {
    // A contract payload with a single uint8 field.
    #[derive(Debug)]
    struct TestPayload {
        a: u8,
    }

    impl Pack for TestPayload {
        fn pack(&self, out: &mut Vec<u8>) -> antelope_abi::Result<()> {
            self.a.pack(out)
        }
    }

    let node = NodeStub::new();
    let key: PrivateKey = TEST_WIF.parse().unwrap();
    let mut transaction = fixture_transaction(ActionData::typed(TestPayload { a: 3 }));

    let packed = sign_transaction(&node, &mut transaction, std::slice::from_ref(&key))
        .await
        .unwrap();

    assert_eq!(packed.packed_trx, EXPECTED_PACKED_TRX);
    assert_eq!(node.translations(), 0);
}

#[tokio::test]
async fn deterministic_across_payload_forms() {
    let node = NodeStub::new();
    let key: PrivateKey = TEST_WIF.parse().unwrap();

    let mut from_json = fixture_transaction(ActionData::json(json!({"a": 3})));
    let mut from_bytes = fixture_transaction(vec![0x03]);

    let a = sign_transaction(&node, &mut from_json, std::slice::from_ref(&key)).await.unwrap();
    let b = sign_transaction(&node, &mut from_bytes, std::slice::from_ref(&key)).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn translates_context_free_actions_too() {
    let node = NodeStub::new();
    let key: PrivateKey = TEST_WIF.parse().unwrap();
    let mut transaction = fixture_transaction(vec![0x03]);
    transaction.context_free_actions =
        vec![Action::new(name("aioeos.test1"), name("test"), vec![], json!({"a": 3}))];

    sign_transaction(&node, &mut transaction, std::slice::from_ref(&key)).await.unwrap();
    assert_eq!(node.translations(), 1);
    assert!(transaction.context_free_actions[0].data.as_raw().is_some());
}

#[tokio::test]
async fn no_signatures_without_keys() {
    let node = NodeStub::new();
    let mut transaction = fixture_transaction(vec![0x03]);
    let packed = sign_transaction(&node, &mut transaction, &[]).await.unwrap();
    assert!(packed.signatures.is_empty());
    assert_eq!(packed.packed_trx, EXPECTED_PACKED_TRX);
}

#[tokio::test]
async fn translation_failure_aborts_before_signing() {
    let node = NodeStub::new();
    let key: PrivateKey = TEST_WIF.parse().unwrap();
    let mut transaction = fixture_transaction(ActionData::json(json!({"poison": true})));

    let err = sign_transaction(&node, &mut transaction, std::slice::from_ref(&key))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
    // The payload is still unresolved; the caller must treat the record as
    // poisoned.
    assert!(transaction.actions[0].data.is_unresolved());
}
