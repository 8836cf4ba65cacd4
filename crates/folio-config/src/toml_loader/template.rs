//! Default TOML config template with inline documentation comments.

/// Default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Folio backdrop configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[background]
theme = "starfield"      # starfield, waves, aurora, blackhole, eye, rain, ocean, cityscape
# section = "all"        # hero, about, portfolio, all
# reduced_motion = false # true renders one static frame
# width = 1280           # 1-8192 CSS px
# height = 720           # 1-8192 CSS px
# pixel_ratio = 1.0      # 0.5-4.0

[clock]
# time_scale = 1.0       # 0.0-4.0
# static_elapsed = 0.0   # seconds shown in reduced-motion mode
# frame_rate = 60        # 30-240

[pointer]
# damping = 0.12         # 0.01-1.0
# idle_timeout_ms = 1500 # 250-5000
# snap_epsilon = 0.05    # CSS px

[palette]
# overrides = ""         # path to a YAML file of per-theme role overrides

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
