//! df-profile: dike cross-section geometry for dikeflow.
//!
//! Provides:
//! - Profile data structures (points, segments, characteristic points, foreshore)
//! - Incremental profile builder with structural validation
//! - Height/position interpolation queries
//! - Physical range validation registered on a diagnostics sink
//!
//! # Example
//!
//! ```
//! use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};
//!
//! let toe = ProfilePoint::new(0.0, 0.0);
//! let crest = ProfilePoint::new(12.0, 4.0);
//! let profile = ProfileBuilder::new(0.0)
//!     .segment(toe, crest, 1.0)
//!     .characteristic_point(CharacteristicPointType::OuterToe, toe)
//!     .characteristic_point(CharacteristicPointType::OuterCrest, crest)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(profile.height_at(6.0), 2.0);
//! assert!(profile.height_at(13.0).is_nan());
//! ```

pub mod builder;
pub mod error;
pub mod profile;
pub mod validate;

// Re-exports for ergonomics
pub use builder::ProfileBuilder;
pub use error::ProfileError;
pub use profile::{
    CharacteristicPoint, CharacteristicPointType, Foreshore, OuterBerm, Profile, ProfilePoint,
    ProfileSegment,
};
