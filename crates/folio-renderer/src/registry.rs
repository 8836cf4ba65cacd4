//! Theme id → animation constructor.

use std::collections::HashMap;
use std::sync::Arc;

use folio_common::ThemeId;

use crate::animation::{builtin, AnimationSettings, BackgroundAnimation};

/// Builds a fresh, unmounted animation.
pub type AnimationConstructor = Arc<dyn Fn(&AnimationSettings) -> Box<dyn BackgroundAnimation> + Send + Sync>;

/// Maps theme ids to constructors.
///
/// Ids are matched case-insensitively. Unknown ids resolve to the default
/// constructor, so a stale theme name in config still gets a background.
pub struct BackgroundRegistry {
    constructors: HashMap<String, AnimationConstructor>,
    default_id: String,
    default_constructor: AnimationConstructor,
}

impl BackgroundRegistry {
    /// Registry holding every built-in theme, defaulting to
    /// [`ThemeId::Starfield`].
    pub fn with_builtins() -> Self {
        let default_constructor = builtin_constructor(ThemeId::default());
        let mut registry = Self {
            constructors: HashMap::new(),
            default_id: ThemeId::default().id().to_string(),
            default_constructor,
        };
        for &theme in ThemeId::all() {
            registry.register(theme.id(), builtin_constructor(theme));
        }
        registry
    }

    /// Register `constructor` under `id`, replacing any earlier entry.
    pub fn register(&mut self, id: &str, constructor: AnimationConstructor) {
        let key = normalize(id);
        if key == self.default_id {
            self.default_constructor = constructor.clone();
        }
        if self.constructors.insert(key, constructor).is_some() {
            tracing::debug!(id, "replaced background constructor");
        }
    }

    /// Constructor for `id`, or the default one.
    pub fn resolve(&self, id: &str) -> AnimationConstructor {
        match self.constructors.get(&normalize(id)) {
            Some(constructor) => constructor.clone(),
            None => {
                tracing::debug!(id, fallback = %self.default_id, "unknown background id");
                self.default_constructor.clone()
            }
        }
    }

    pub fn default_constructor(&self) -> AnimationConstructor {
        self.default_constructor.clone()
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.constructors.contains_key(&normalize(id))
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Default for BackgroundRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn builtin_constructor(theme: ThemeId) -> AnimationConstructor {
    Arc::new(move |settings: &AnimationSettings| builtin(theme, settings))
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}
