mod color;
mod core;
mod theme;

pub use self::core::*;
pub use color::*;
pub use theme::*;
