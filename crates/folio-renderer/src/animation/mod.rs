//! Animated backgrounds.
//!
//! A [`BackgroundAnimation`] is mounted into a container, driven by frame
//! callbacks and disposed. Two adapters do the bookkeeping:
//! [`ShaderBackground`] for full-screen fragment shaders and
//! [`CanvasBackground`] for 2D raster scenes. The themes themselves live in
//! [`variants`].

mod canvas_background;
mod shader_background;
mod types;
pub mod variants;

pub use canvas_background::*;
pub use shader_background::*;
pub use types::*;
pub use variants::builtin;
