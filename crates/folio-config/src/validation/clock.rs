//! Clock and pointer section validation.

use crate::schema::{FolioConfig, MAX_POINTER_DAMPING};

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_clock(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_range_f64(errors, "clock.time_scale", config.clock.time_scale, 0.0, 4.0);
    validate_range_f64(
        errors,
        "clock.static_elapsed",
        config.clock.static_elapsed,
        0.0,
        3600.0,
    );
    validate_range(errors, "clock.frame_rate", config.clock.frame_rate, 30, 240);
}

pub(crate) fn validate_pointer(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_range_f64(
        errors,
        "pointer.damping",
        config.pointer.damping,
        0.01,
        MAX_POINTER_DAMPING,
    );
    validate_range(
        errors,
        "pointer.idle_timeout_ms",
        config.pointer.idle_timeout_ms,
        250,
        5000,
    );
    validate_range_f64(
        errors,
        "pointer.snap_epsilon",
        config.pointer.snap_epsilon,
        0.0,
        10.0,
    );
}
