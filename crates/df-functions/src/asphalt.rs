//! Asphalt revetments: fatigue under wave impacts.
//!
//! The top layer is modelled as a beam on an elastic foundation loaded by a
//! uniform impact pressure. The bending stress it causes is compared with the
//! failure tension through a fatigue relation and summed over the joint
//! distribution of impact width, impact depth and impact factor (Miner's rule).

/// Default distribution of the relative impact width, `(factor, probability)`.
pub const WIDTH_FACTORS: [(f64, f64); 10] = [
    (0.1, 0.0055),
    (0.2, 0.0545),
    (0.3, 0.14),
    (0.4, 0.24),
    (0.5, 0.24),
    (0.6, 0.17),
    (0.7, 0.095),
    (0.8, 0.035),
    (0.9, 0.015),
    (1.0, 0.005),
];

/// Default distribution of the relative impact depth, `(factor, probability)`.
pub const DEPTH_FACTORS: [(f64, f64); 9] = [
    (-1.0, 0.005),
    (-0.875, 0.0095),
    (-0.75, 0.0295),
    (-0.625, 0.0575),
    (-0.5, 0.1),
    (-0.375, 0.1435),
    (-0.25, 0.2),
    (-0.125, 0.2505),
    (0.0, 0.2045),
];

/// Default distribution of the impact factor, `(factor, probability)`.
pub const IMPACT_FACTORS: [(f64, f64); 11] = [
    (2.0, 0.039),
    (2.4, 0.1),
    (2.8, 0.18),
    (3.2, 0.235),
    (3.6, 0.2),
    (4.0, 0.13),
    (4.4, 0.08),
    (4.8, 0.02),
    (5.2, 0.01),
    (5.6, 0.005),
    (6.0, 0.001),
];

pub fn log_failure_tension(failure_tension: f64) -> f64 {
    failure_tension.log10()
}

/// Equivalent single-layer thickness of the asphalt package.
///
/// The upper layer is scaled by the cube root of its stiffness over the sub
/// layer stiffness before the sub layer thickness is added.
pub fn computational_thickness(
    thickness_upper_layer: f64,
    thickness_sub_layer: f64,
    elastic_modulus_upper_layer: f64,
    elastic_modulus_sub_layer: f64,
) -> f64 {
    thickness_upper_layer * (elastic_modulus_upper_layer / elastic_modulus_sub_layer).cbrt()
        + thickness_sub_layer
}

/// Characteristic wave number of the beam on elastic foundation (1/m).
pub fn stiffness_relation(
    computational_thickness: f64,
    equivalent_elastic_modulus: f64,
    soil_elasticity: f64,
    stiffness_relation_nu: f64,
) -> f64 {
    (3.0 * soil_elasticity * (1.0 - stiffness_relation_nu.powi(2))
        / (equivalent_elastic_modulus * computational_thickness.powi(3)))
    .powf(0.25)
}

/// Maximum impact pressure in MPa.
pub fn maximum_peak_stress(
    wave_height_hm0: f64,
    gravitational_acceleration: f64,
    density_of_water: f64,
) -> f64 {
    density_of_water * gravitational_acceleration * wave_height_hm0 / 1e6
}

pub fn impact_number(outer_slope: f64, impact_factor: f64, impact_number_c: f64) -> f64 {
    4.0 * impact_number_c * outer_slope * impact_factor
}

fn decay(lambda: f64) -> f64 {
    (-lambda).exp() * lambda.sin()
}

/// Everything one increment evaluation needs.
#[derive(Debug, Clone, Copy)]
pub struct WaveImpactInput<'a> {
    pub log_failure_tension: f64,
    pub average_number_of_waves: f64,
    pub maximum_peak_stress: f64,
    pub stiffness_relation: f64,
    pub computational_thickness: f64,
    pub outer_slope: f64,
    pub width_factors: &'a [(f64, f64)],
    pub depth_factors: &'a [(f64, f64)],
    pub impact_factors: &'a [(f64, f64)],
    pub z: f64,
    pub water_level: f64,
    pub wave_height_hm0: f64,
    pub fatigue_alpha: f64,
    pub fatigue_beta: f64,
    pub impact_number_c: f64,
}

impl WaveImpactInput<'_> {
    /// Spatial distribution of the bending stress for one width/depth pair.
    fn bending_shape(&self, width_factor: f64, depth_factor: f64) -> f64 {
        let beta = self.stiffness_relation;
        let half_width = beta * width_factor * self.wave_height_hm0 / 2.0;
        let impact_level = self.water_level + depth_factor * self.wave_height_hm0;
        let distance =
            beta * (self.z - impact_level).abs() / self.outer_slope.atan().sin();

        if distance < half_width {
            decay(half_width - distance) + decay(half_width + distance)
        } else {
            decay(distance + half_width) - decay(distance - half_width)
        }
    }

    /// Bending stress in MPa.
    pub fn bending_stress(&self, width_factor: f64, depth_factor: f64, impact_factor: f64) -> f64 {
        let beta = self.stiffness_relation;
        let h = self.computational_thickness;
        let load = impact_number(self.outer_slope, impact_factor, self.impact_number_c)
            * self.maximum_peak_stress;
        3.0 * load * self.bending_shape(width_factor, depth_factor).abs()
            / (2.0 * beta.powi(2) * h.powi(2))
    }

    fn fatigue(&self, bending_stress: f64) -> f64 {
        if bending_stress <= 0.0 {
            return 0.0;
        }
        let margin = (self.log_failure_tension - bending_stress.log10()).max(0.0);
        10f64.powf(-self.fatigue_beta * margin.powf(self.fatigue_alpha))
    }
}

/// Fatigue damage of one step, summed over all impact combinations.
pub fn increment_damage(input: &WaveImpactInput<'_>) -> f64 {
    let mut sum = 0.0;
    for &(width_factor, width_probability) in input.width_factors {
        for &(depth_factor, depth_probability) in input.depth_factors {
            for &(impact_factor, impact_probability) in input.impact_factors {
                let stress = input.bending_stress(width_factor, depth_factor, impact_factor);
                sum += width_probability
                    * depth_probability
                    * impact_probability
                    * input.fatigue(stress);
            }
        }
    }
    input.average_number_of_waves * sum
}
