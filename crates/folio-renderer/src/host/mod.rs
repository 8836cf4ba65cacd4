//! The page-level owner of the background.
//!
//! [`BackgroundHost`] resolves the theme through the registry, hands the
//! animation its palette and drives it from a [`crate::clock::FrameQueue`].
//! It is also the failure boundary: nothing an animation does can take the
//! host down.

mod background_host;
mod types;

pub use background_host::*;
pub use types::*;

#[cfg(test)]
mod tests;
