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

mod authority;
pub use authority::{Authority, KeyWeight, PermissionLevel, PermissionLevelWeight, WaitWeight};

mod action;
pub use action::{AbiData, Action, ActionData};

mod transaction;
pub use transaction::{Extension, Transaction};

pub mod contracts;
