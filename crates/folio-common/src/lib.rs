pub mod errors;
pub mod types;

pub use errors::{ConfigError, FolioError};
pub use types::{Color, ColorSet, Rect, Section, ThemeId};

pub type Result<T> = std::result::Result<T, FolioError>;
