//! Grass cover erosion by direct wave impact.
//!
//! Resistance is expressed as a time line: the load duration after which a
//! grass cover fails under waves of height `H`,
//! `T(H) = ln((H - C) / A) / B`.

/// Load duration in seconds that a grass cover withstands waves of height `h`.
pub fn time_line(wave_height_impact: f64, a: f64, b: f64, c: f64) -> f64 {
    ((wave_height_impact - c) / a).ln() / b
}

/// Wave height belonging to the longest load duration of the time line.
pub fn minimum_wave_height(a: f64, b: f64, c: f64, te_max: f64) -> f64 {
    a * (b * te_max).exp() + c
}

/// Wave height belonging to the shortest load duration of the time line.
pub fn maximum_wave_height(a: f64, b: f64, c: f64, te_min: f64) -> f64 {
    a * (b * te_min).exp() + c
}

/// Impact reduction for oblique waves; `wave_angle` in degrees.
///
/// Waves from behind the dike normal keep a linearly decaying share `q` of
/// the impact over the first `r` degrees beyond 90.
pub fn wave_angle_impact(wave_angle: f64, n: f64, q: f64, r: f64) -> f64 {
    let angle = wave_angle.abs();
    if angle <= 90.0 {
        (1.0 - q) * angle.to_radians().cos().powf(n) + q
    } else {
        q * ((90.0 + r - angle) / r).max(0.0)
    }
}

/// Effective impacting wave height, limited to the time line's validity.
pub fn wave_height_impact(
    minimum_wave_height: f64,
    maximum_wave_height: f64,
    wave_angle_impact: f64,
    wave_height_hm0: f64,
) -> f64 {
    (wave_angle_impact * wave_height_hm0).clamp(minimum_wave_height, maximum_wave_height)
}

pub fn upper_limit_loading(water_level: f64, wave_height_hm0: f64, a_ul: f64) -> f64 {
    water_level - a_ul * wave_height_hm0
}

pub fn lower_limit_loading(water_level: f64, wave_height_hm0: f64, a_ll: f64) -> f64 {
    water_level - a_ll * wave_height_hm0
}

/// Damage increment: the fraction of the time line consumed by the step.
pub fn increment_damage(time_step_duration: f64, time_line: f64) -> f64 {
    time_step_duration / time_line
}
