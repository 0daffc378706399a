//! Hand-pose interpretation.
//!
//! Turns the 21 normalized keypoints produced by an external pose estimator
//! into a per-digit extension vector, a discrete [`Gesture`], and a raster
//! pointer. Also hosts the [`CooldownGate`] used to debounce one-shot
//! gesture actions.

pub mod classifier;
pub mod cooldown;
pub mod landmarks;

pub use classifier::{
    Classification, Fingers, Gesture, classify, fingers_up, is_open_palm, is_thumbs_up,
};
pub use cooldown::CooldownGate;
pub use landmarks::{Landmark, LandmarkError, LandmarkSet};
