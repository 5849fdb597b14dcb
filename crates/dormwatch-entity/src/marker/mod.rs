//! Map marker entity.

pub mod model;

pub use model::{CreateMarker, Marker, MarkerWithUsers};
