//! df-locations: revetment mechanisms evaluated at calculation locations.
//!
//! Provides damage models for the supported top layers:
//! - Grass cover erosion by overtopping and by wave run-up (cumulative overload)
//! - Grass cover erosion by wave impact (time line)
//! - Natural stone top layers (stateful degradation)
//! - Asphalt top layers under wave impact (fatigue)
//!
//! Every mechanism implements [`RevetmentMechanism`]. A [`LocationInput`]
//! pairs a mechanism with a position on the profile and owns the shared
//! damage accumulation and failure timing.
//!
//! # Example
//!
//! ```
//! use df_core::{TimeStep, units::s};
//! use df_locations::{GrassWaveImpact, LocationInput};
//! use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};
//!
//! let toe = ProfilePoint::new(0.0, 0.0);
//! let crest = ProfilePoint::new(30.0, 10.0);
//! let profile = ProfileBuilder::new(0.0)
//!     .segment(toe, crest, 1.0)
//!     .characteristic_point(CharacteristicPointType::OuterToe, toe)
//!     .characteristic_point(CharacteristicPointType::OuterCrest, crest)
//!     .build()
//!     .unwrap();
//!
//! let location = LocationInput::new(13.5, GrassWaveImpact::default());
//! location.initialize_derived(&profile).unwrap();
//!
//! let step = TimeStep::new(s(0.0), s(3600.0), 5.0, 2.0, 6.0, 0.0).unwrap();
//! let output = location.calculate_step(&step, &profile, 0.0).unwrap();
//! assert!(output.damage > 0.0);
//! ```

pub mod asphalt_wave_impact;
pub mod common;
pub mod cumulative_overload;
pub mod derived;
pub mod error;
pub mod grass_overtopping;
pub mod grass_wave_impact;
pub mod grass_wave_runup;
pub mod location;
pub mod natural_stone;
pub mod output;
pub mod traits;

// Re-exports
pub use asphalt_wave_impact::{AsphaltWaveImpact, AsphaltWaveImpactParameters, SubLayer};
pub use cumulative_overload::{GrassCumulativeOverloadParameters, RayleighMethod};
pub use derived::DerivedCell;
pub use error::{LocationError, LocationResult};
pub use grass_overtopping::{GrassOvertopping, GrassOvertoppingParameters};
pub use grass_wave_impact::{GrassWaveImpact, GrassWaveImpactParameters};
pub use grass_wave_runup::{GrassWaveRunup, GrassWaveRunupParameters};
pub use location::{LocationInput, Mechanism};
pub use natural_stone::{NaturalStone, NaturalStoneParameters};
pub use output::{LocationOutput, MechanismKind, StepDetails, StepLoad, StepOutput};
pub use traits::RevetmentMechanism;
