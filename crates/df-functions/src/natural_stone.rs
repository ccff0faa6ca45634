//! Natural stone revetments: hydraulic load, slope geometry and degradation.
//!
//! Damage here is stateful. The degradation curve `(t / (1000 Tm10))^0.1` is
//! concave, so the increment of a step depends on how far along the curve
//! the damage at the start of the step already is. That position is
//! recovered as a reference degradation and converted to an equivalent load
//! duration before the step's own duration is added.

/// Coefficients of the hydraulic load relation `Hm0 / (A xi^N + B xi + C)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicLoadCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub n: f64,
}

impl HydraulicLoadCoefficients {
    pub const PLUNGING: Self = Self {
        a: 4.0,
        b: 0.0,
        c: 0.0,
        n: -0.9,
    };

    pub const SURGING: Self = Self {
        a: 0.8,
        b: 0.0,
        c: 0.0,
        n: 0.6,
    };
}

/// Hydraulic load on the top layer.
///
/// Plunging coefficients apply below the transition `xi_b`, surging
/// coefficients from it on.
pub fn hydraulic_load(
    surf_similarity_parameter: f64,
    wave_height_hm0: f64,
    plunging: HydraulicLoadCoefficients,
    surging: HydraulicLoadCoefficients,
    xi_b: f64,
) -> f64 {
    let xi = surf_similarity_parameter;
    let k = if xi < xi_b { plunging } else { surging };
    wave_height_hm0 / (k.a * xi.powf(k.n) + k.b * xi + k.c)
}

/// Resistance of the top layer.
pub fn resistance(relative_density: f64, thickness_top_layer: f64) -> f64 {
    relative_density * thickness_top_layer
}

/// Upper level of the slope section that determines the local slope.
pub fn slope_upper_level(
    outer_toe_height: f64,
    outer_crest_height: f64,
    water_level: f64,
    wave_height_hm0: f64,
    slope_upper_level_a_us: f64,
) -> f64 {
    let level = water_level + slope_upper_level_a_us * wave_height_hm0;
    outer_toe_height.max(outer_crest_height.min(level))
}

/// Lower level of the slope section that determines the local slope.
pub fn slope_lower_level(
    outer_toe_height: f64,
    slope_upper_level: f64,
    wave_height_hm0: f64,
    slope_lower_level_a_ls: f64,
) -> f64 {
    outer_toe_height.max(slope_upper_level - slope_lower_level_a_ls * wave_height_hm0)
}

/// Crest and notch of an outer berm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BermLevels {
    pub crest_position: f64,
    pub crest_height: f64,
    pub notch_position: f64,
    pub notch_height: f64,
}

/// Geometry needed to resolve the local outer slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterSlopeInput {
    pub slope_lower_position: f64,
    pub slope_lower_level: f64,
    pub slope_upper_position: f64,
    pub slope_upper_level: f64,
    pub outer_toe_height: f64,
    pub outer_crest_height: f64,
    pub berm: Option<BermLevels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlopeZone {
    Lower,
    Berm,
    Upper,
    Outside,
}

fn slope_zone(level: f64, toe: f64, berm: &BermLevels, crest: f64) -> SlopeZone {
    if level >= toe && level < berm.crest_height {
        SlopeZone::Lower
    } else if level >= berm.crest_height && level < berm.notch_height {
        SlopeZone::Berm
    } else if level >= berm.notch_height && level <= crest {
        SlopeZone::Upper
    } else {
        SlopeZone::Outside
    }
}

/// Local outer slope between the slope lower and upper points.
///
/// Without a berm this is rise over run. With a berm the two points are
/// classified into lower slope, berm and upper slope zones; combinations the
/// geometry does not define yield `f64::INFINITY`.
pub fn outer_slope(input: &OuterSlopeInput) -> f64 {
    let rise_over_run = |lower_z: f64, lower_x: f64, upper_z: f64, upper_x: f64| {
        (upper_z - lower_z) / (upper_x - lower_x)
    };
    let (lower_x, lower_z) = (input.slope_lower_position, input.slope_lower_level);
    let (upper_x, upper_z) = (input.slope_upper_position, input.slope_upper_level);

    let Some(berm) = input.berm else {
        return rise_over_run(lower_z, lower_x, upper_z, upper_x);
    };

    let lower_zone = slope_zone(lower_z, input.outer_toe_height, &berm, input.outer_crest_height);
    let upper_zone = slope_zone(upper_z, input.outer_toe_height, &berm, input.outer_crest_height);

    match (lower_zone, upper_zone) {
        (SlopeZone::Lower, SlopeZone::Lower)
        | (SlopeZone::Berm, SlopeZone::Berm)
        | (SlopeZone::Upper, SlopeZone::Upper) => rise_over_run(lower_z, lower_x, upper_z, upper_x),
        (SlopeZone::Lower, SlopeZone::Berm) => {
            rise_over_run(lower_z, lower_x, berm.crest_height, berm.crest_position)
        }
        (SlopeZone::Berm, SlopeZone::Upper) => {
            rise_over_run(berm.notch_height, berm.notch_position, upper_z, upper_x)
        }
        (SlopeZone::Lower, SlopeZone::Upper) => {
            let average_berm_height = (berm.crest_height + berm.notch_height) / 2.0;
            let distance_lower = (berm.crest_position - lower_x) * (average_berm_height - lower_z)
                / (berm.crest_height - lower_z);
            let distance_upper = (upper_x - berm.notch_position) * (upper_z - average_berm_height)
                / (upper_z - berm.notch_height);
            (upper_z - lower_z) / (distance_lower + distance_upper)
        }
        _ => f64::INFINITY,
    }
}

/// Horizontal distance to the point of maximum wave elevation.
pub fn distance_maximum_wave_elevation(
    impact_factor: f64,
    wave_steepness_deep_water: f64,
    wave_height_hm0: f64,
    a_wm: f64,
    b_wm: f64,
) -> f64 {
    impact_factor * wave_height_hm0 * (a_wm / wave_steepness_deep_water.sqrt() - b_wm)
}

/// Width of the zone hit by wave impacts.
pub fn normative_width_wave_impact(
    surf_similarity_parameter: f64,
    wave_height_hm0: f64,
    a_wi: f64,
    b_wi: f64,
) -> f64 {
    (a_wi - b_wi * surf_similarity_parameter) * wave_height_hm0
}

/// Depth of the maximum wave load below the water level; slope angle in degrees.
pub fn depth_maximum_wave_load(
    distance_maximum_wave_elevation: f64,
    normative_width_wave_impact: f64,
    slope_angle: f64,
) -> f64 {
    let angle = slope_angle.to_radians();
    (distance_maximum_wave_elevation - 0.5 * normative_width_wave_impact * angle.cos()) * angle.tan()
}

/// Coefficients of the loading band limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingLimitCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LoadingLimitCoefficients {
    pub const UPPER: Self = Self {
        a: 0.1,
        b: 0.6,
        c: 4.0,
    };

    pub const LOWER: Self = Self {
        a: 0.1,
        b: 0.2,
        c: 4.0,
    };
}

pub fn upper_limit_loading(
    depth_maximum_wave_load: f64,
    surf_similarity_parameter: f64,
    water_level: f64,
    wave_height_hm0: f64,
    k: LoadingLimitCoefficients,
) -> f64 {
    let d = depth_maximum_wave_load;
    water_level - 2.0 * d
        + (d + k.a * wave_height_hm0)
            .max(k.b * wave_height_hm0 * surf_similarity_parameter.min(k.c))
}

pub fn lower_limit_loading(
    depth_maximum_wave_load: f64,
    surf_similarity_parameter: f64,
    water_level: f64,
    wave_height_hm0: f64,
    k: LoadingLimitCoefficients,
) -> f64 {
    let d = depth_maximum_wave_load;
    water_level - 2.0 * d
        + (d - k.a * wave_height_hm0)
            .min(k.b * wave_height_hm0 * surf_similarity_parameter.min(k.c))
}

/// Impact reduction for oblique waves; angles in degrees.
pub fn wave_angle_impact(wave_angle: f64, wave_angle_max: f64) -> f64 {
    wave_angle.abs().min(wave_angle_max).to_radians().cos().powf(2.0 / 3.0)
}

/// Degradation reached after `t` seconds of loading.
pub fn degradation(time: f64, wave_period_tm10: f64) -> f64 {
    (time / (1000.0 * wave_period_tm10)).powf(0.1)
}

/// Degradation equivalent to `damage_at_start` under this step's load.
pub fn reference_degradation(
    resistance: f64,
    hydraulic_load: f64,
    wave_angle_impact: f64,
    damage_at_start: f64,
) -> f64 {
    damage_at_start * resistance / (hydraulic_load * wave_angle_impact)
}

/// Load duration that produces `reference_degradation`.
pub fn reference_time_degradation(reference_degradation: f64, wave_period_tm10: f64) -> f64 {
    1000.0 * wave_period_tm10 * reference_degradation.powi(10)
}

pub fn increment_degradation(
    reference_time_degradation: f64,
    time_step_duration: f64,
    wave_period_tm10: f64,
) -> f64 {
    degradation(reference_time_degradation + time_step_duration, wave_period_tm10)
        - degradation(reference_time_degradation, wave_period_tm10)
}

pub fn increment_damage(
    hydraulic_load: f64,
    resistance: f64,
    increment_degradation: f64,
    wave_angle_impact: f64,
) -> f64 {
    hydraulic_load / resistance * increment_degradation * wave_angle_impact
}
