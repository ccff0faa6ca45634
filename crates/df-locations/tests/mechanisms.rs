//! Integration tests for df-locations: every mechanism over a storm timeline.

use df_core::units::{hours, s};
use df_core::{Diagnostics, TimeStep, seconds};
use df_locations::{
    AsphaltWaveImpact, AsphaltWaveImpactParameters, GrassOvertopping, GrassWaveImpact,
    GrassWaveRunup, LocationError, LocationInput, MechanismKind, NaturalStone,
    NaturalStoneParameters, StepOutput,
};
use df_profile::{CharacteristicPointType, Profile, ProfileBuilder, ProfilePoint};
use proptest::prelude::*;

fn dike() -> Profile {
    let p = ProfilePoint::new;
    let points = [p(0.0, 0.0), p(20.0, 5.0), p(24.0, 5.0), p(34.0, 0.0)];
    ProfileBuilder::new(0.0)
        .polyline(&points, 1.0)
        .characteristic_point(CharacteristicPointType::OuterToe, points[0])
        .characteristic_point(CharacteristicPointType::OuterCrest, points[1])
        .characteristic_point(CharacteristicPointType::InnerCrest, points[2])
        .characteristic_point(CharacteristicPointType::InnerToe, points[3])
        .build()
        .unwrap()
}

fn storm(water_levels: &[f64], wave_height_hm0: f64) -> Vec<TimeStep> {
    water_levels
        .iter()
        .enumerate()
        .map(|(i, &wl)| {
            let begin = 3600.0 * i as f64;
            TimeStep::new(s(begin), s(begin + 3600.0), wl, wave_height_hm0, 5.0, 0.0).unwrap()
        })
        .collect()
}

fn locations() -> Vec<LocationInput> {
    vec![
        LocationInput::new(22.0, GrassOvertopping::default()),
        LocationInput::new(14.0, GrassWaveRunup::default()),
        LocationInput::new(14.0, GrassWaveImpact::default()),
        LocationInput::new(14.0, NaturalStone::new(NaturalStoneParameters::new(1.65, 0.3))),
        LocationInput::new(
            14.0,
            AsphaltWaveImpact::new(AsphaltWaveImpactParameters::new(1.6, 64.0, 0.16, 18_000.0)),
        ),
    ]
}

fn assert_cumulative(initial_damage: f64, steps: &[StepOutput]) {
    let mut damage = initial_damage;
    for step in steps {
        assert!(step.increment_damage >= 0.0);
        assert_eq!(step.damage, damage + step.increment_damage);
        damage = step.damage;
    }
}

#[test]
fn every_mechanism_validates_and_accumulates() {
    let profile = dike();
    let time_steps = storm(&[3.0, 3.5, 4.0, 3.5], 1.5);
    let diagnostics = Diagnostics::new();

    for location in locations() {
        assert!(location.validate(&time_steps, &profile, &diagnostics), "{}", location.kind());
        location.initialize_derived(&profile).unwrap();

        let steps = location.calculate_all(&time_steps, &profile).unwrap();
        assert_cumulative(location.initial_damage(), &steps);

        let output = location.aggregate_output(steps).unwrap();
        assert_eq!(output.steps.len(), time_steps.len());
        assert!(output.final_damage() > 0.0, "{} caused no damage", output.mechanism);
    }
    assert!(diagnostics.is_empty());
}

#[test]
fn overtopping_reports_the_dike_height() {
    let profile = dike();
    let location = LocationInput::new(22.0, GrassOvertopping::default());
    location.initialize_derived(&profile).unwrap();
    assert_eq!(location.reference_height(), Ok(5.0));
    assert_eq!(location.kind(), MechanismKind::GrassOvertopping);
}

#[test]
fn only_natural_stone_is_stateful() {
    let stateless: Vec<bool> = locations().iter().map(LocationInput::is_stateless).collect();
    assert_eq!(stateless, [true, true, true, false, true]);
}

#[test]
fn reading_derived_data_before_initialization_fails() {
    let profile = dike();
    let time_steps = storm(&[3.0], 1.5);
    for location in locations() {
        assert!(!location.is_initialized());
        let err = location.calculate_step(&time_steps[0], &profile, 0.0).unwrap_err();
        assert_eq!(err, LocationError::NotInitialized { x: location.x() });
    }
}

#[test]
fn failed_initialization_can_be_retried_without_caching() {
    let profile = dike();
    let location = LocationInput::new(
        0.0,
        AsphaltWaveImpact::new(AsphaltWaveImpactParameters::new(1.6, 64.0, 0.16, 18_000.0)),
    );
    assert!(location.initialize_derived(&profile).is_err());
    assert!(!location.is_initialized());
    assert!(location.initialize_derived(&profile).is_err());
}

#[test]
fn failure_is_recorded_once_and_damage_keeps_growing() {
    let profile = dike();
    // z = 3.875 inside the band [3.75, 4.0]; roughly 0.025 damage per hour
    let time_steps = storm(&[4.0; 24], 0.5);
    let location = LocationInput::new(15.5, GrassWaveImpact::default()).with_failure_number(0.5);
    location.initialize_derived(&profile).unwrap();

    let steps = location.calculate_all(&time_steps, &profile).unwrap();
    let failures: Vec<_> = steps
        .iter()
        .zip(&time_steps)
        .filter_map(|(step, ts)| step.time_of_failure.map(|t| (t, ts)))
        .collect();
    assert_eq!(failures.len(), 1);

    let (time, step) = failures[0];
    assert!(time >= step.begin_time() && time <= step.end_time());
    assert!(steps.last().unwrap().damage > 0.5);
    assert!(seconds(time) < seconds(hours(24.0)));
}

proptest! {
    #[test]
    fn damage_is_the_running_sum_of_increments(
        water_levels in prop::collection::vec(0.5_f64..4.5, 1..12),
        wave_height in 0.5_f64..2.5,
        initial_damage in 0.0_f64..0.9,
    ) {
        let profile = dike();
        let time_steps = storm(&water_levels, wave_height);
        let location = LocationInput::new(14.0, GrassWaveImpact::default())
            .with_initial_damage(initial_damage);
        location.initialize_derived(&profile).unwrap();

        let steps = location.calculate_all(&time_steps, &profile).unwrap();
        let mut damage = initial_damage;
        for step in &steps {
            prop_assert!(step.increment_damage >= 0.0);
            prop_assert_eq!(step.damage, damage + step.increment_damage);
            damage = step.damage;
        }
        prop_assert!(steps.iter().filter(|s| s.time_of_failure.is_some()).count() <= 1);
    }

    #[test]
    fn natural_stone_damage_never_decreases(
        water_levels in prop::collection::vec(1.0_f64..4.5, 1..8),
    ) {
        let profile = dike();
        let time_steps = storm(&water_levels, 1.5);
        let location =
            LocationInput::new(12.0, NaturalStone::new(NaturalStoneParameters::new(1.65, 0.3)));
        location.initialize_derived(&profile).unwrap();

        let steps = location.calculate_all(&time_steps, &profile).unwrap();
        let damages: Vec<f64> = steps.iter().map(|s| s.damage).collect();
        prop_assert!(damages.windows(2).all(|w| w[1] >= w[0]));
    }
}
