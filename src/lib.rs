//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{types,core,engine}` so callers
//! and integration tests depend on a single package.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
