//! # treasure-hunt-core
//!
//! Game logic for the location-based treasure hunt: great-circle
//! geometry, uniform target sampling, and the session/score rules built
//! on top of them. Rendering, navigation, and the actual position
//! subscription live in the embedding app.
//!
//! ```
//! use treasure_hunt_core::geo::{Coordinate, distance_meters};
//!
//! let london = Coordinate::new(51.5007, -0.1246).unwrap();
//! let liberty = Coordinate::new(40.6892, -74.0445).unwrap();
//!
//! let d = distance_meters(london, liberty);
//! assert!((d - 5_570_000.0).abs() < 60_000.0);
//! ```

pub mod geo;
pub mod hunt;

// Re-export auth from the auth crate
pub use treasure_hunt_auth as auth;
