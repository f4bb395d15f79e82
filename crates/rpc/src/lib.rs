#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{Error, NodeError, NodeErrorKind, Result};

mod types;
pub use types::{ChainId, ChainInfo, GetTableRows, PackedTransaction, RawAbi};

mod client;
pub use client::RpcClient;

mod sign;
pub use sign::{sign_transaction, sign_transaction_with_context, ChainApi};
