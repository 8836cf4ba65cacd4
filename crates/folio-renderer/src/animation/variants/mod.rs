//! The built-in backgrounds, one module per theme.

mod aurora;
mod blackhole;
mod cityscape;
mod eye;
mod ocean;
mod rain;
mod starfield;
mod waves;

pub use aurora::AuroraScene;
pub use blackhole::BlackholeScene;
pub use cityscape::CityscapeScene;
pub use eye::{EyeScene, GazeController, GazeState};
pub use ocean::{OceanScene, Particle};
pub use rain::{RainDrop, RainScene};
pub use starfield::{Star, StarfieldScene};
pub use waves::WavesScene;

use folio_common::ThemeId;

use super::canvas_background::CanvasBackground;
use super::shader_background::ShaderBackground;
use super::types::{AnimationSettings, BackgroundAnimation};

/// Move `current` toward `target` by `factor` per 60 Hz frame, scaled to a
/// `dt`-second step.
pub(crate) fn ease(current: f32, target: f32, factor: f32, dt: f32) -> f32 {
    let k = 1.0 - (1.0 - factor).powf(dt * 60.0);
    current + (target - current) * k
}

/// Construct the built-in animation for `theme`.
pub fn builtin(theme: ThemeId, settings: &AnimationSettings) -> Box<dyn BackgroundAnimation> {
    let settings = settings.clone();
    let seed = settings.seed;
    match theme {
        ThemeId::Starfield => Box::new(CanvasBackground::new(StarfieldScene::new(seed), settings)),
        ThemeId::Waves => Box::new(CanvasBackground::new(WavesScene::new(seed), settings)),
        ThemeId::Rain => Box::new(CanvasBackground::new(RainScene::new(seed), settings)),
        ThemeId::Ocean => Box::new(CanvasBackground::new(OceanScene::new(seed), settings)),
        ThemeId::Aurora => Box::new(ShaderBackground::new(AuroraScene::new(), settings)),
        ThemeId::Blackhole => Box::new(ShaderBackground::new(BlackholeScene::new(), settings)),
        ThemeId::Eye => Box::new(ShaderBackground::new(EyeScene::new(seed), settings)),
        ThemeId::Cityscape => Box::new(ShaderBackground::new(CityscapeScene::new(), settings)),
    }
}
