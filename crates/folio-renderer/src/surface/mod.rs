//! Render surface adapter: context traits, viewport sizing, ownership.

mod adapter;
mod context;
mod types;

pub use adapter::*;
pub use context::*;
pub use types::*;
