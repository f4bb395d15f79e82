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
pub use error::{Error, Result};

mod base58;

mod private;
pub use private::PrivateKey;

mod public;
pub use public::PublicKey;

mod signature;
pub use signature::Signature;

mod account;
pub use account::{Account, AccountKey};

/// The only key-type tag this signer implements. `R1` and `WA` keys use
/// other curves entirely.
pub const KEY_TYPE_K1: &str = "K1";
