//! wgpu backend, enabled with the `gpu` feature.
//!
//! Renders shader backgrounds offscreen on a real device and reads the
//! result back so it can be exported like any headless frame.

mod context;
mod device;
mod host;
mod pipeline;
mod target;
mod types;

pub use context::*;
pub use device::*;
pub use host::*;
pub use pipeline::*;
pub use target::{RenderTarget, TARGET_FORMAT};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::target::{align_to, copy_tight_rows};
    use super::*;
    use crate::animation::AnimationSettings;
    use crate::host::{BackgroundHost, HostView};
    use crate::registry::BackgroundRegistry;
    use crate::surface::Viewport;
    use folio_common::ThemeId;

    #[test]
    fn gpu_error_display() {
        assert_eq!(GpuError::AdapterNotFound.to_string(), "no suitable GPU adapter found");
        assert_eq!(
            GpuError::Readback("timeout".into()).to_string(),
            "readback error: timeout"
        );
    }

    #[test]
    fn rows_are_aligned_for_copies() {
        assert_eq!(align_to(4, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(1028, 256), 1280);
    }

    #[test]
    fn padding_is_stripped() {
        let padded = [1, 2, 9, 9, 3, 4, 9, 9];
        assert_eq!(copy_tight_rows(&padded, 2, 4, 2).unwrap(), vec![1, 2, 3, 4]);
        assert!(copy_tight_rows(&padded, 2, 4, 3).is_err());
    }

    #[test]
    fn renders_a_shader_background_when_a_device_exists() {
        let host = match WgpuHost::new(Viewport::new(64.0, 48.0, 1.0)) {
            Ok(host) => host,
            Err(e) => {
                eprintln!("skipping: {e}");
                return;
            }
        };
        let observer = host.clone();
        let mut background = BackgroundHost::new(
            Box::new(host),
            BackgroundRegistry::with_builtins(),
            AnimationSettings::default(),
        );
        background.set_theme("aurora", 0.0);
        assert_eq!(background.view(), &HostView::Animated { theme: ThemeId::Aurora });
        assert_eq!(background.tick(16.0), 1);
        assert_eq!(observer.snapshot().dimensions(), (64, 48));
        assert_eq!(observer.stats().gpu_draw_calls, 1);
    }
}
