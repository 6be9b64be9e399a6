//! Blockfall (workspace facade crate).
//!
//! This package exposes the `blockfall::{core,store,types}` public API while
//! the implementation lives in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_store as store;
pub use blockfall_types as types;
