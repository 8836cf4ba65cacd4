//! Animated page backgrounds.
//!
//! A [`BackgroundHost`] picks an animation from the [`BackgroundRegistry`],
//! resolves its palette and drives it with explicit frame tokens. Shader
//! themes compile WGSL through [`shader::ShaderProgram`]; canvas themes draw
//! through a [`surface::RasterContext`]. The [`headless`] backends run both
//! without a display; the `gpu` feature adds a wgpu backend.

pub mod animation;
pub mod clock;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod headless;
pub mod host;
pub mod perf;
pub mod pointer;
pub mod registry;
pub mod shader;
pub mod surface;

pub use animation::{AnimationError, AnimationSettings, BackgroundAnimation};
pub use clock::{FrameQueue, FrameScheduler, FrameToken};
pub use headless::HeadlessHost;
pub use host::{BackgroundHost, FallbackView, HostView};
pub use perf::FrameTimer;
pub use pointer::PointerEvent;
pub use registry::{AnimationConstructor, BackgroundRegistry};
pub use surface::{SurfaceHost, Viewport};
