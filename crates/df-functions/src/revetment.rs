//! Damage bookkeeping shared by every revetment type.

/// Cumulative damage at the end of a step.
pub fn damage(increment_damage: f64, damage_at_start: f64) -> f64 {
    damage_at_start + increment_damage
}

/// True when the failure number is crossed within the step.
///
/// Damage that already reached the failure number before the step does not
/// count as a new failure.
pub fn failure_revetment(damage_at_start: f64, damage: f64, failure_number: f64) -> bool {
    damage_at_start < failure_number && failure_number <= damage
}

/// Seconds into the step at which the damage reaches `failure_number`.
///
/// Linear in the fraction of the increment needed to reach the threshold.
pub fn duration_in_time_step_failure(
    time_step_duration: f64,
    increment_damage: f64,
    failure_number: f64,
    damage_at_start: f64,
) -> f64 {
    time_step_duration * (failure_number - damage_at_start) / increment_damage
}

/// Absolute time of failure in seconds.
pub fn time_of_failure(
    begin_time: f64,
    time_step_duration: f64,
    increment_damage: f64,
    failure_number: f64,
    damage_at_start: f64,
) -> f64 {
    begin_time
        + duration_in_time_step_failure(
            time_step_duration,
            increment_damage,
            failure_number,
            damage_at_start,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn failure_is_detected_once() {
        assert!(failure_revetment(0.8, 1.1, 1.0));
        assert!(failure_revetment(0.8, 1.0, 1.0));
        assert!(!failure_revetment(1.0, 1.3, 1.0));
        assert!(!failure_revetment(0.2, 0.9, 1.0));
    }

    #[test]
    fn failure_half_way() {
        assert_eq!(time_of_failure(3600.0, 3600.0, 0.4, 1.0, 0.8), 3600.0 + 1800.0);
    }

    #[test]
    fn failure_exactly_at_end() {
        assert_eq!(time_of_failure(0.0, 900.0, 0.5, 1.0, 0.5), 900.0);
    }

    proptest! {
        #[test]
        fn failure_time_lies_within_step(
            begin in -1e6_f64..1e6,
            duration in 1.0_f64..1e5,
            damage_at_start in 0.0_f64..1.0,
            fraction in 1e-6_f64..=1.0,
            increment in 1e-3_f64..10.0,
        ) {
            let failure_number = damage_at_start + fraction * increment;
            prop_assume!(failure_revetment(damage_at_start, damage(increment, damage_at_start), failure_number));

            let t = time_of_failure(begin, duration, increment, failure_number, damage_at_start);
            let end = begin + duration;
            prop_assert!(t >= begin - 1e-6 && t <= end + 1e-6);

            let expected = begin + fraction * duration;
            prop_assert!((t - expected).abs() <= 1e-6 * end.abs().max(duration));
        }
    }
}
