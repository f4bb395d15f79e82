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

/// The ABI wire-format codec.
#[doc(inline)]
pub use antelope_abi as abi;

/// The chain data model: transactions, actions, authorities.
#[doc(inline)]
pub use antelope_chain as chain;

/// The node REST client and signing pipeline.
#[doc(inline)]
pub use antelope_rpc as rpc;

/// Key material, text formats and signing.
#[doc(inline)]
pub use antelope_signer as signer;
