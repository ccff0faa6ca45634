//! df-functions: closed-form revetment physics for dikeflow.
//!
//! Every function here is pure: plain `f64` in, plain `f64` out, no
//! diagnostics and no profile access. Geometry lookups and parameter
//! validation happen one layer up, in `df-locations`.
//!
//! Provides:
//! - Hydraulic load relations (wave angle, surf similarity, wave counts)
//! - Damage bookkeeping (cumulative damage, failure detection and timing)
//! - Grass cumulative overload (discrete and analytical Rayleigh)
//! - Grass wave impact time line
//! - Natural stone hydraulic load, slope geometry and degradation
//! - Asphalt wave impact fatigue
//!
//! # Example
//!
//! ```
//! use df_functions::hydraulic_load::wave_angle;
//!
//! assert_eq!(wave_angle(270.0, 45.0), -135.0);
//! assert_eq!(wave_angle(45.0, 270.0), 135.0);
//! ```

pub mod asphalt;
pub mod grass;
pub mod grass_wave_impact;
pub mod hydraulic_load;
pub mod natural_stone;
pub mod revetment;

pub use grass::CumulativeOverloadInput;
pub use natural_stone::{BermLevels, OuterSlopeInput};
